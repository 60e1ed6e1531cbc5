//! Sources of route templates.
//!
//! The resolver never looks inside the host framework. Instead the host
//! injects a [`RouteProvider`] that reports the current template set and,
//! when it can, a version counter that changes whenever that set changes.

use std::sync::Arc;

use arc_swap::ArcSwap;

/// Capability to enumerate the currently registered route templates.
pub trait RouteProvider: Send + Sync {
    /// Every registered template, e.g. `/users/{id}`.
    fn templates(&self) -> Vec<String>;

    /// Monotonic version of the template set.
    ///
    /// `None` means the provider cannot tell when its routes change, so a
    /// cached index built from it must not be reused.
    fn version(&self) -> Option<u64> {
        None
    }
}

/// A fixed route table known at construction time.
#[derive(Debug, Clone, Default)]
pub struct StaticRoutes(Vec<String>);

impl StaticRoutes {
    pub fn new<I, S>(routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(routes.into_iter().map(Into::into).collect())
    }
}

impl RouteProvider for StaticRoutes {
    fn templates(&self) -> Vec<String> {
        self.0.clone()
    }

    fn version(&self) -> Option<u64> {
        Some(0)
    }
}

impl<F> RouteProvider for F
where
    F: Fn() -> Vec<String> + Send + Sync,
{
    fn templates(&self) -> Vec<String> {
        self()
    }
}

#[derive(Debug, Default)]
struct Snapshot {
    version: u64,
    templates: Vec<String>,
}

/// Concurrent registry of route templates.
///
/// Cloning is cheap and clones share the same table. Readers always observe
/// a consistent (version, templates) pair.
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    snapshot: Arc<ArcSwap<Snapshot>>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a template. Returns false if it was already registered.
    pub fn register(&self, template: impl Into<String>) -> bool {
        let template = template.into();
        let mut inserted = false;

        self.snapshot.rcu(|current| {
            if current.templates.contains(&template) {
                inserted = false;
                return Arc::clone(current);
            }
            inserted = true;
            let mut templates = current.templates.clone();
            templates.push(template.clone());
            Arc::new(Snapshot {
                version: current.version + 1,
                templates,
            })
        });

        if inserted {
            tracing::debug!(template = %template, "Route registered");
        }
        inserted
    }

    pub fn len(&self) -> usize {
        self.snapshot.load().templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn current_version(&self) -> u64 {
        self.snapshot.load().version
    }
}

impl RouteProvider for RouteRegistry {
    fn templates(&self) -> Vec<String> {
        self.snapshot.load().templates.clone()
    }

    fn version(&self) -> Option<u64> {
        Some(self.current_version())
    }
}

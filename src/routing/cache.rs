//! Route index caching.
//!
//! Rebuilding the index is linear in the number of routes. Under the
//! `on_change` policy the last index is reused for as long as the provider's
//! version and the excluded-prefix set stay the same; `per_request` rebuilds
//! every time and never observes a stale table.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use serde::{Deserialize, Serialize};

use super::provider::RouteProvider;
use super::router::{ExcludedPrefixes, RouteIndex};
use crate::observability::metrics;

/// When to rebuild the route index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexPolicy {
    /// Reuse the cached index until the provider reports a new version.
    #[default]
    OnChange,
    /// Rebuild from the provider on every request.
    PerRequest,
}

#[derive(Debug)]
struct CachedIndex {
    version: u64,
    excluded: ExcludedPrefixes,
    index: Arc<RouteIndex>,
}

/// Lock-free holder of the most recently built index.
#[derive(Debug, Default)]
pub struct IndexCache {
    cached: ArcSwapOption<CachedIndex>,
}

impl IndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return an index reflecting the provider under the given policy.
    pub fn index(
        &self,
        provider: &dyn RouteProvider,
        excluded: &ExcludedPrefixes,
        policy: IndexPolicy,
    ) -> Arc<RouteIndex> {
        let version = match (policy, provider.version()) {
            (IndexPolicy::OnChange, Some(version)) => version,
            _ => return Arc::new(RouteIndex::build(provider.templates(), excluded)),
        };

        if let Some(cached) = self.cached.load_full() {
            if cached.version == version && cached.excluded == *excluded {
                return Arc::clone(&cached.index);
            }
        }

        let index = Arc::new(RouteIndex::build(provider.templates(), excluded));
        tracing::debug!(version, templates = index.len(), "Route index rebuilt");
        metrics::record_index_rebuild(index.len());

        self.cached.store(Some(Arc::new(CachedIndex {
            version,
            excluded: excluded.clone(),
            index: Arc::clone(&index),
        })));
        index
    }

    /// Drop the cached index; the next lookup rebuilds.
    pub fn invalidate(&self) {
        self.cached.store(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::provider::{RouteRegistry, StaticRoutes};
    use crate::routing::resolver::{RequestPath, Resolution};

    #[test]
    fn test_on_change_reuses_index() {
        let cache = IndexCache::new();
        let routes = StaticRoutes::new(["/a", "/b"]);
        let excluded = ExcludedPrefixes::default();

        let first = cache.index(&routes, &excluded, IndexPolicy::OnChange);
        let second = cache.index(&routes, &excluded, IndexPolicy::OnChange);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_on_change_rebuilds_after_registration() {
        let cache = IndexCache::new();
        let registry = RouteRegistry::new();
        registry.register("/a");
        let excluded = ExcludedPrefixes::default();

        let before = cache.index(&registry, &excluded, IndexPolicy::OnChange);
        assert_eq!(before.len(), 1);

        registry.register("/late/route");
        let after = cache.index(&registry, &excluded, IndexPolicy::OnChange);
        assert_eq!(after.len(), 2);
        assert!(matches!(
            after.resolve(&RequestPath::parse("/late")),
            Resolution::Directory(_)
        ));
    }

    #[test]
    fn test_excluded_change_rebuilds() {
        let cache = IndexCache::new();
        let routes = StaticRoutes::new(["/static/x", "/b"]);

        let hidden = cache.index(&routes, &ExcludedPrefixes::default(), IndexPolicy::OnChange);
        let shown = cache.index(&routes, &ExcludedPrefixes::none(), IndexPolicy::OnChange);
        assert!(!Arc::ptr_eq(&hidden, &shown));
        assert!(matches!(
            shown.resolve(&RequestPath::parse("/static")),
            Resolution::Directory(_)
        ));
    }

    #[test]
    fn test_per_request_and_unversioned_always_rebuild() {
        let cache = IndexCache::new();
        let excluded = ExcludedPrefixes::default();

        let routes = StaticRoutes::new(["/a"]);
        let first = cache.index(&routes, &excluded, IndexPolicy::PerRequest);
        let second = cache.index(&routes, &excluded, IndexPolicy::PerRequest);
        assert!(!Arc::ptr_eq(&first, &second));

        let closure = || vec!["/a".to_string()];
        let first = cache.index(&closure, &excluded, IndexPolicy::OnChange);
        let second = cache.index(&closure, &excluded, IndexPolicy::OnChange);
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_invalidate() {
        let cache = IndexCache::new();
        let routes = StaticRoutes::new(["/a"]);
        let excluded = ExcludedPrefixes::default();

        let first = cache.index(&routes, &excluded, IndexPolicy::OnChange);
        cache.invalidate();
        let second = cache.index(&routes, &excluded, IndexPolicy::OnChange);
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_policy_deserializes_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: IndexPolicy,
        }
        let w: Wrapper = toml::from_str(r#"policy = "per_request""#).unwrap();
        assert_eq!(w.policy, IndexPolicy::PerRequest);
    }
}

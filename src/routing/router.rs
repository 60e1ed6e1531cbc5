//! Route index construction.
//!
//! # Responsibilities
//! - Snapshot the registered route templates
//! - Tag templates that live under an excluded prefix
//! - Hand the snapshot to the resolver
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc without locks)
//! - No filtering at build time: excluded templates still take part in
//!   exact matching, only listings skip them
//! - Duplicate templates (after normalization) collapse to one

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use super::matcher::RouteTemplate;
use super::resolver::{self, RequestPath, Resolution};

/// Conventional prefix for static-asset routes.
pub const DEFAULT_EXCLUDED_PREFIX: &str = "static";

/// Top-level path segments whose subtrees are hidden from listings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ExcludedPrefixes(BTreeSet<String>);

impl ExcludedPrefixes {
    /// An empty set: every route is listable.
    pub fn none() -> Self {
        Self(BTreeSet::new())
    }

    pub fn contains(&self, segment: &str) -> bool {
        self.0.contains(segment)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ExcludedPrefixes {
    fn default() -> Self {
        Self::from_iter([DEFAULT_EXCLUDED_PREFIX])
    }
}

impl<S: Into<String>> FromIterator<S> for ExcludedPrefixes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Immutable snapshot of every registered route template.
#[derive(Debug, Clone, Default)]
pub struct RouteIndex {
    templates: Vec<RouteTemplate>,
}

impl RouteIndex {
    /// Build an index from raw path templates.
    pub fn build<I, S>(routes: I, excluded_prefixes: &ExcludedPrefixes) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let templates = routes
            .into_iter()
            .map(|raw| RouteTemplate::parse(raw.as_ref(), excluded_prefixes))
            .filter(|template| seen.insert(template.to_string()))
            .collect();

        Self { templates }
    }

    pub fn templates(&self) -> &[RouteTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Decide how a request path should be answered.
    pub fn resolve(&self, path: &RequestPath) -> Resolution {
        resolver::resolve(self, path)
    }
}

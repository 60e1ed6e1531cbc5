//! Prefix-to-listing resolution.
//!
//! Given a [`RouteIndex`] and a normalized request path, decides whether the
//! request belongs to a registered route (pass through), names a virtual
//! directory (synthesize a listing of the next segment), or neither.
//!
//! # Algorithm
//! ```text
//! request path (N segments)
//!     → any template consumes exactly N segments?      → ExactMatch
//!     → for each listable template longer than N whose
//!       first N segments accept the request:
//!         segment N is a parameter/catch-all          → skip
//!         segment N is literal, template ends there   → "name"
//!         segment N is literal, more segments follow  → "name/"
//!     → entries non-empty?                             → Directory
//!     → otherwise                                      → NotFound
//! ```
//!
//! A name seen both as a leaf and as a directory is listed as a directory.

use std::collections::BTreeMap;
use std::fmt;

use super::router::RouteIndex;

/// A request path split into segments.
///
/// Leading, trailing, and repeated separators are dropped; `""` and `"/"`
/// both normalize to the root (zero segments).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RequestPath {
    segments: Vec<String>,
}

impl RequestPath {
    pub fn parse(raw: &str) -> Self {
        Self {
            segments: raw
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl From<&str> for RequestPath {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<Option<&str>> for RequestPath {
    fn from(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or_default()
    }
}

impl fmt::Display for RequestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

/// Whether a listed name has further registered content beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    Leaf,
    Directory,
}

/// Set of child names under a virtual directory, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    entries: BTreeMap<String, EntryKind>,
}

impl Listing {
    /// Add a child name. Directory status dominates leaf status.
    pub fn insert(&mut self, name: impl Into<String>, kind: EntryKind) {
        let slot = self.entries.entry(name.into()).or_insert(kind);
        if kind == EntryKind::Directory {
            *slot = EntryKind::Directory;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn kind(&self, name: &str) -> Option<EntryKind> {
        self.entries.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, EntryKind)> {
        self.entries.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    /// Rendered entries: `name` for leaves, `name/` for directories.
    pub fn entries(&self) -> Vec<String> {
        self.iter()
            .map(|(name, kind)| match kind {
                EntryKind::Leaf => name.to_string(),
                EntryKind::Directory => format!("{}/", name),
            })
            .collect()
    }
}

/// How a request path should be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A registered route consumes the path; hand it to the real dispatcher.
    ExactMatch,
    /// The path is a virtual directory with at least one listable child.
    Directory(Listing),
    /// Nothing registered at or beneath the path.
    NotFound,
}

impl Resolution {
    /// Short label for logs and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            Resolution::ExactMatch => "pass_through",
            Resolution::Directory(_) => "directory",
            Resolution::NotFound => "not_found",
        }
    }
}

/// Resolve a request path against the index.
pub fn resolve(index: &RouteIndex, path: &RequestPath) -> Resolution {
    if index.templates().iter().any(|t| t.matches_exact(path)) {
        return Resolution::ExactMatch;
    }

    let depth = path.depth();
    let mut listing = Listing::default();

    for template in index.templates() {
        if template.is_excluded() || !template.extends(path) {
            continue;
        }

        // Parameterized children have an unbounded namespace
        let Some(name) = template.segment(depth).and_then(|s| s.literal()) else {
            continue;
        };

        let kind = if template.len() > depth + 1 {
            EntryKind::Directory
        } else {
            EntryKind::Leaf
        };
        listing.insert(name, kind);
    }

    if listing.is_empty() {
        Resolution::NotFound
    } else {
        Resolution::Directory(listing)
    }
}

//! Route template parsing and segment matching.
//!
//! # Responsibilities
//! - Split a registered path template into segments
//! - Classify each segment as literal, parameter, or catch-all
//! - Match templates against normalized request paths (exact or prefix)
//!
//! # Design Decisions
//! - Placeholder syntax of the common Rust and Python routers is accepted
//!   (`{id}`, `{*rest}`, `:id`, `*rest`, `<id>`, `<int:id>`, `<path:rest>`)
//! - Literal matching is case-sensitive, byte-for-byte
//! - A catch-all only has wildcard meaning in the last position; anywhere
//!   else it behaves like a single-segment parameter

use std::fmt;

use super::resolver::RequestPath;

/// One `/`-delimited component of a route template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Must match the request segment exactly.
    Literal(String),
    /// Matches any single request segment.
    Parameter(String),
    /// Matches one or more trailing request segments.
    CatchAll(String),
}

impl Segment {
    /// Classify a raw template segment.
    pub fn parse(raw: &str) -> Self {
        if let Some(inner) = raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            return match inner.strip_prefix('*') {
                Some(name) => Segment::CatchAll(name.to_string()),
                None => Segment::Parameter(inner.to_string()),
            };
        }

        if let Some(inner) = raw.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
            // Werkzeug converters: `<int:id>`, `<path:rest>`
            return match inner.split_once(':') {
                Some(("path", name)) => Segment::CatchAll(name.to_string()),
                Some((_, name)) => Segment::Parameter(name.to_string()),
                None => Segment::Parameter(inner.to_string()),
            };
        }

        if let Some(name) = raw.strip_prefix(':') {
            return Segment::Parameter(name.to_string());
        }
        if let Some(name) = raw.strip_prefix('*') {
            return Segment::CatchAll(name.to_string());
        }

        Segment::Literal(raw.to_string())
    }

    /// Returns true if this segment accepts the given request segment.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Segment::Literal(name) => name == value,
            Segment::Parameter(_) | Segment::CatchAll(_) => true,
        }
    }

    /// The literal name, if this segment can be enumerated in a listing.
    pub fn literal(&self) -> Option<&str> {
        match self {
            Segment::Literal(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(name) => f.write_str(name),
            Segment::Parameter(name) => write!(f, "{{{}}}", name),
            Segment::CatchAll(name) => write!(f, "{{*{}}}", name),
        }
    }
}

/// A registered route template decomposed into segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
    segments: Vec<Segment>,
    excluded: bool,
}

impl RouteTemplate {
    /// Parse a template string.
    ///
    /// Empty segments from leading, trailing, or doubled separators are
    /// dropped, so `""` and `"/"` both yield the root template.
    pub fn parse(raw: &str, excluded_prefixes: &super::router::ExcludedPrefixes) -> Self {
        let segments: Vec<Segment> = raw
            .split('/')
            .filter(|s| !s.is_empty())
            .map(Segment::parse)
            .collect();

        let excluded = segments
            .first()
            .and_then(Segment::literal)
            .map(|root| excluded_prefixes.contains(root))
            .unwrap_or(false);

        Self { segments, excluded }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// True when the root segment belongs to an excluded prefix group.
    pub fn is_excluded(&self) -> bool {
        self.excluded
    }

    /// Returns true if the request path consumes this template entirely.
    pub fn matches_exact(&self, path: &RequestPath) -> bool {
        let request = path.segments();
        match self.segments.split_last() {
            Some((Segment::CatchAll(_), head)) => {
                request.len() > head.len() && prefix_matches(head, request)
            }
            _ => self.segments.len() == request.len() && prefix_matches(&self.segments, request),
        }
    }

    /// Returns true if this template extends strictly beyond the request path
    /// and its leading segments accept every request segment.
    pub fn extends(&self, path: &RequestPath) -> bool {
        let request = path.segments();
        self.segments.len() > request.len() && prefix_matches(&self.segments, request)
    }

    /// Segment at `depth`, if any.
    pub fn segment(&self, depth: usize) -> Option<&Segment> {
        self.segments.get(depth)
    }
}

impl fmt::Display for RouteTemplate {
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

/// Zips template segments against request segments; extra segments on
/// either side are ignored.
fn prefix_matches(template: &[Segment], request: &[String]) -> bool {
    template
        .iter()
        .zip(request)
        .all(|(segment, value)| segment.matches(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::router::ExcludedPrefixes;

    fn template(raw: &str) -> RouteTemplate {
        RouteTemplate::parse(raw, &ExcludedPrefixes::default())
    }

    #[test]
    fn test_segment_classification() {
        assert_eq!(Segment::parse("users"), Segment::Literal("users".into()));
        assert_eq!(Segment::parse("{id}"), Segment::Parameter("id".into()));
        assert_eq!(Segment::parse(":id"), Segment::Parameter("id".into()));
        assert_eq!(Segment::parse("<id>"), Segment::Parameter("id".into()));
        assert_eq!(Segment::parse("<int:id>"), Segment::Parameter("id".into()));
        assert_eq!(Segment::parse("{*rest}"), Segment::CatchAll("rest".into()));
        assert_eq!(Segment::parse("*rest"), Segment::CatchAll("rest".into()));
        assert_eq!(Segment::parse("<path:filename>"), Segment::CatchAll("filename".into()));
        // Unbalanced markers stay literal
        assert_eq!(Segment::parse("{id"), Segment::Literal("{id".into()));
    }

    #[test]
    fn test_template_parse_drops_empty_segments() {
        let t = template("//greet///hello/");
        assert_eq!(t.len(), 2);
        assert_eq!(t.to_string(), "/greet/hello");

        assert!(template("").is_root());
        assert!(template("/").is_root());
    }

    #[test]
    fn test_excluded_flag_uses_root_literal() {
        let excluded = ExcludedPrefixes::from_iter(["static"]);
        assert!(RouteTemplate::parse("/static/{*path}", &excluded).is_excluded());
        assert!(RouteTemplate::parse("/static", &excluded).is_excluded());
        assert!(!RouteTemplate::parse("/assets/static", &excluded).is_excluded());
        assert!(!RouteTemplate::parse("/{static}/x", &excluded).is_excluded());
    }

    #[test]
    fn test_exact_match() {
        let t = template("/users/{id}/posts");
        assert!(t.matches_exact(&RequestPath::parse("/users/42/posts")));
        assert!(!t.matches_exact(&RequestPath::parse("/users/42")));
        assert!(!t.matches_exact(&RequestPath::parse("/users/42/posts/7")));
        assert!(!t.matches_exact(&RequestPath::parse("/members/42/posts")));

        assert!(template("/").matches_exact(&RequestPath::root()));
    }

    #[test]
    fn test_catch_all_consumes_remaining_segments() {
        let t = template("/static/{*path}");
        assert!(t.matches_exact(&RequestPath::parse("/static/app.css")));
        assert!(t.matches_exact(&RequestPath::parse("/static/css/site/app.css")));
        assert!(!t.matches_exact(&RequestPath::parse("/static")));
        assert!(!t.matches_exact(&RequestPath::parse("/assets/app.css")));
    }

    #[test]
    fn test_extends() {
        let t = template("/greet/{name}/shout");
        assert!(t.extends(&RequestPath::root()));
        assert!(t.extends(&RequestPath::parse("/greet")));
        assert!(t.extends(&RequestPath::parse("/greet/bob")));
        assert!(!t.extends(&RequestPath::parse("/greet/bob/shout")));
        assert!(!t.extends(&RequestPath::parse("/wave")));
    }
}

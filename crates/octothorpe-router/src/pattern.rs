/// Pattern parsing for fragment route segments
///
/// Pure functional parsing of declarative path patterns into typed segments.
/// All functions are **pure**: same input → same output, no side effects.
use std::fmt;

/// The wildcard pattern string used by the fallback route.
///
/// The wildcard is not a [`PathPattern`]; it never participates in
/// structural matching and is consulted only when every declared pattern
/// has failed to match.
pub const WILDCARD: &str = "*";

/// Represents one segment of a path pattern
///
/// Functional sum type for pattern matching path segments. The grammar has
/// exactly two segment kinds:
///
/// - **Literal**: matches itself, character for character
/// - **Param**: `:name`, matches one or more non-separator characters and
///   captures them under `name`
///
/// # Examples
///
/// ```
/// use octothorpe_router::pattern::{classify_segment, Segment};
///
/// // Literal segment
/// let seg = classify_segment("events");
/// assert_eq!(seg, Segment::Literal("events".to_string()));
///
/// // Named capture
/// let seg = classify_segment(":id");
/// assert_eq!(seg, Segment::Param("id".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Static text segment, matched by equality
    Literal(String),
    /// Named capture: `:name`, matches a single non-empty segment
    Param(String),
}

/// Classifies a raw segment into a pattern segment (pure function)
///
/// A leading `:` followed by at least one character denotes a named
/// capture; everything else is a literal, including a bare `:`.
///
/// # Examples
///
/// ```
/// use octothorpe_router::pattern::{classify_segment, Segment};
///
/// assert_eq!(classify_segment("admin"), Segment::Literal("admin".to_string()));
/// assert_eq!(classify_segment(":id"), Segment::Param("id".to_string()));
/// assert_eq!(classify_segment(":"), Segment::Literal(":".to_string()));
/// assert_eq!(classify_segment(""), Segment::Literal(String::new()));
/// ```
pub fn classify_segment(segment: &str) -> Segment {
    match segment.strip_prefix(':') {
        Some(name) if !name.is_empty() => Segment::Param(name.to_string()),
        _ => Segment::Literal(segment.to_string()),
    }
}

/// Ordered parameter map extracted from a matched path
///
/// Preserves insertion order: iteration yields parameters in their order of
/// appearance in the pattern. A successful match contains exactly the
/// parameter names declared by the pattern, no more, no fewer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    /// Creates an empty parameter map
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Looks up a parameter value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Number of captured parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no parameters were captured
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in pattern order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Parameter names in pattern order
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|(key, _)| key.as_str()).collect()
    }

    fn push(&mut self, name: &str, value: &str) {
        self.0.push((name.to_string(), value.to_string()));
    }
}

/// A compiled path pattern
///
/// Splits the declarative pattern on `/` and classifies every segment once
/// at parse time; matching is then a straight walk over the segments.
///
/// # Matching Rules
///
/// 1. **Anchored**: the whole path must be consumed (no prefix matching)
/// 2. **Separator-literal**: trailing slashes are significant, so
///    `/events` and `/events/` are distinct patterns (explicit policy)
/// 3. **Non-empty captures**: a `:name` segment never matches an empty
///    segment, so `/events//edit` does not match `/events/:id/edit`
/// 4. A failed match is `None`, never an error
///
/// # Examples
///
/// ```
/// use octothorpe_router::pattern::PathPattern;
///
/// let pattern = PathPattern::parse("/events/:id");
///
/// let params = pattern.matches("/events/42").unwrap();
/// assert_eq!(params.get("id"), Some("42"));
///
/// // Anchored: longer paths do not match
/// assert!(pattern.matches("/events/42/edit").is_none());
///
/// // Trailing slash is a different shape
/// assert!(pattern.matches("/events/42/").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parses a declarative pattern string (pure function)
    ///
    /// # Performance
    ///
    /// - O(n) over the pattern length, performed once at table construction
    /// - Matching afterwards allocates only for captured values
    pub fn parse(pattern: &str) -> Self {
        let rest = pattern.strip_prefix('/').unwrap_or(pattern);
        let segments = rest.split('/').map(classify_segment).collect();
        Self {
            raw: pattern.to_string(),
            segments,
        }
    }

    /// Matches a concrete path, extracting parameters on success
    ///
    /// Returns `None` for structural mismatches: different segment counts,
    /// literal mismatch, empty value for a named capture, or a path that is
    /// not rooted at `/`.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let rest = path.strip_prefix('/')?;
        let segments: Vec<&str> = rest.split('/').collect();

        if segments.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (expected, actual) in self.segments.iter().zip(segments.iter()) {
            match expected {
                Segment::Literal(literal) => {
                    if literal.as_str() != *actual {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if actual.is_empty() {
                        return None;
                    }
                    params.push(name, actual);
                }
            }
        }

        Some(params)
    }

    /// The original pattern string
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Declared parameter names in order of appearance
    pub fn param_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Param(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// True when the pattern declares at least one named capture
    pub fn is_dynamic(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, Segment::Param(_)))
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_literal() {
        assert_eq!(classify_segment("events"), Segment::Literal("events".to_string()));
    }

    #[test]
    fn test_classify_param() {
        assert_eq!(classify_segment(":id"), Segment::Param("id".to_string()));
    }

    #[test]
    fn test_classify_bare_colon_is_literal() {
        assert_eq!(classify_segment(":"), Segment::Literal(":".to_string()));
    }

    #[test]
    fn test_root_pattern_matches_root_only() {
        let pattern = PathPattern::parse("/");
        assert!(pattern.matches("/").is_some());
        assert!(pattern.matches("/events").is_none());
    }

    #[test]
    fn test_static_pattern() {
        let pattern = PathPattern::parse("/events");
        assert!(pattern.matches("/events").is_some());
        assert!(pattern.matches("/login").is_none());
    }

    #[test]
    fn test_trailing_slash_is_distinct() {
        let bare = PathPattern::parse("/events");
        let slashed = PathPattern::parse("/events/");

        assert!(bare.matches("/events/").is_none());
        assert!(slashed.matches("/events").is_none());
        assert!(slashed.matches("/events/").is_some());
    }

    #[test]
    fn test_param_extraction() {
        let pattern = PathPattern::parse("/events/:id");
        let params = pattern.matches("/events/42").unwrap();
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_param_rejects_empty_segment() {
        let pattern = PathPattern::parse("/events/:id/edit");
        assert!(pattern.matches("/events//edit").is_none());
    }

    #[test]
    fn test_params_keep_pattern_order() {
        let pattern = PathPattern::parse("/a/:first/:second");
        let params = pattern.matches("/a/one/two").unwrap();
        assert_eq!(params.names(), vec!["first", "second"]);
        assert_eq!(params.get("first"), Some("one"));
        assert_eq!(params.get("second"), Some("two"));
    }

    #[test]
    fn test_anchored_matching() {
        let pattern = PathPattern::parse("/admin/events/:id/edit");
        assert!(pattern.matches("/admin/events/7/edit").is_some());
        assert!(pattern.matches("/admin/events/7").is_none());
        assert!(pattern.matches("/admin/events/7/edit/extra").is_none());
    }

    #[test]
    fn test_unrooted_path_never_matches() {
        let pattern = PathPattern::parse("/events");
        assert!(pattern.matches("events").is_none());
    }

    #[test]
    fn test_param_names_declared_order() {
        let pattern = PathPattern::parse("/admin/events/:id/edit");
        assert_eq!(pattern.param_names(), vec!["id"]);
        assert!(pattern.is_dynamic());
        assert!(!PathPattern::parse("/events").is_dynamic());
    }
}

//! Path segmentation and pattern-segment classification.
//!
//! A path is split on `/` and empty segments are dropped: the leading slash,
//! a trailing slash and consecutive slashes (`/a//b`) produce no segment, and
//! `/` yields none at all. Patterns and queries go through the same split, so
//! parameter positions recorded at insertion line up with query positions.

use std::borrow::Cow;

/// Uppercase a request or registration method. `""` stays the any-method key.
pub(crate) fn normalize_method(method: &str) -> String {
    method.to_uppercase()
}

/// Prefix a route pattern with `/` when it has none.
pub(crate) fn normalize_pattern(pattern: &str) -> Cow<'_, str> {
    if pattern.starts_with('/') {
        Cow::Borrowed(pattern)
    } else {
        Cow::Owned(format!("/{pattern}"))
    }
}

/// Split a path into its segments.
///
/// ```text
/// "/"          -> []
/// "/users/42"  -> ["users", "42"]
/// "/users/"    -> ["users"]
/// "/a//b"      -> ["a", "b"]
/// ```
pub(crate) fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

/// One segment of a route pattern, classified by the pattern mini-language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PatternSegment<'a> {
    /// Exact text.
    Literal(&'a str),
    /// `:name`
    Named(&'a str),
    /// `:name(pattern)`
    Constrained { name: &'a str, pattern: &'a str },
    /// `*`
    Anonymous,
    /// `**` or `**:name`. Ends the pattern.
    CatchAll { name: &'a str, optional: bool },
}

impl<'a> PatternSegment<'a> {
    pub(crate) fn parse(segment: &'a str) -> Self {
        if segment.starts_with("**") {
            return Self::CatchAll {
                name: segment.split(':').nth(1).unwrap_or("_"),
                optional: segment == "**",
            };
        }
        if segment == "*" {
            return Self::Anonymous;
        }
        if let Some((_, name)) = segment.split_once(':') {
            return match parse_constraint(segment) {
                Some((name, pattern)) => Self::Constrained { name, pattern },
                None => Self::Named(name),
            };
        }
        Self::Literal(segment)
    }

    /// Whether this segment binds a parameter (and so lives off the static cache).
    pub(crate) fn is_dynamic(&self) -> bool {
        !matches!(self, Self::Literal(_))
    }
}

/// Split `:name(pattern)` into its parts. The name is word characters only.
fn parse_constraint(segment: &str) -> Option<(&str, &str)> {
    let body = segment.strip_prefix(':')?.strip_suffix(')')?;
    let (name, pattern) = body.split_once('(')?;
    let is_word = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    (is_word && !pattern.is_empty()).then_some((name, pattern))
}

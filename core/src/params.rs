//! Parameter bindings recorded at insertion and the extractor that replays
//! them against a queried path.

use regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;

/// Where a binding reads its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParamPosition {
    /// The single segment at this index.
    Segment(usize),
    /// Every segment from this index to the end, joined by `/`.
    Rest(usize),
}

/// What a binding writes into [`Params`].
#[derive(Debug, Clone)]
pub(crate) enum ParamName {
    /// One key, taking the whole value.
    Name(String),
    /// An anchored regex whose named groups each become a key.
    Pattern(Regex),
}

/// One entry of a route's parameter map.
#[derive(Debug, Clone)]
pub(crate) struct ParamBinding {
    pub(crate) position: ParamPosition,
    pub(crate) name: ParamName,
    /// May match when the queried path has no segment here (`*` and bare `**`).
    pub(crate) optional: bool,
}

impl ParamBinding {
    pub(crate) fn new(position: ParamPosition, name: ParamName, optional: bool) -> Self {
        Self {
            position,
            name,
            optional,
        }
    }
}

/// Path parameters extracted from a matched route.
///
/// # Example
///
/// ```
/// use fastroute::Router;
///
/// let mut router = Router::new();
/// router.add("GET", "/posts/:year/:slug", ()).unwrap();
///
/// let params = router.find("GET", "/posts/2025/hello").unwrap().params.unwrap();
/// assert_eq!(params.get("year"), Some("2025"));
/// assert_eq!(params.get("slug"), Some("hello"));
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Params {
    values: HashMap<String, String>,
}

impl Params {
    /// Value bound to `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Returns `true` if `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of bound names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Take the underlying map.
    #[must_use]
    pub fn into_inner(self) -> HashMap<String, String> {
        self.values
    }

    fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }
}

/// Rebuild `name -> value` for `bindings` from the queried `segments`.
///
/// Out-of-range positions bind the empty string; a trailing-optional
/// binding whose segment is absent therefore still shows up.
pub(crate) fn extract(segments: &[&str], bindings: &[ParamBinding]) -> Params {
    let mut params = Params::default();
    for binding in bindings {
        let value: Cow<'_, str> = match binding.position {
            ParamPosition::Segment(index) => Cow::Borrowed(segments.get(index).copied().unwrap_or("")),
            ParamPosition::Rest(index) => {
                Cow::Owned(segments.get(index..).map_or_else(String::new, |rest| rest.join("/")))
            }
        };
        match &binding.name {
            ParamName::Name(name) => params.insert(name.as_str(), value),
            ParamName::Pattern(regex) => {
                let Some(captures) = regex.captures(&value) else {
                    continue;
                };
                for name in regex.capture_names().flatten() {
                    if let Some(group) = captures.name(name) {
                        params.insert(name, group.as_str());
                    }
                }
            }
        }
    }
    params
}

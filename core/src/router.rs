//! `Router`: registration, lookup and removal of routes.
//!
//! The router owns the route tree and the static route cache. Parameter-free
//! patterns are indexed by their exact normalized text, so looking them up
//! skips segmentation and tree traversal entirely.

use crate::matcher::search;
use crate::params::{extract, ParamBinding, ParamName, ParamPosition, Params};
use crate::segment::{
    normalize_method, normalize_pattern, split_path, PatternSegment,
};
use crate::tree::{Entry, NodeId, RouteTree};
use crate::RouterError;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

/// Options for [`Router::find_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindOptions {
    /// Extract path parameters. Disable for a cheaper existence check.
    pub params: bool,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self { params: true }
    }
}

impl FindOptions {
    /// Default options: parameters are extracted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parameter extraction.
    #[must_use]
    pub fn with_params(mut self, params: bool) -> Self {
        self.params = params;
        self
    }
}

/// A successful lookup.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Match<'r, T> {
    /// The payload registered for the winning route.
    pub data: &'r T,
    /// Extracted parameters.
    ///
    /// `None` when the route has no parameters, when the static route cache
    /// answered, or when extraction was disabled.
    pub params: Option<Params>,
}

/// Segment trie router with a static fast path.
///
/// # Type Parameters
///
/// - `T`: the opaque payload stored per (pattern, method). Never inspected.
///
/// # Methods
///
/// Methods are case-insensitive and stored uppercased. The empty string
/// ([`ANY_METHOD`](crate::ANY_METHOD)) registers a route that answers every
/// method lacking its own entry at the same position.
///
/// # Example
///
/// ```
/// use fastroute::{FindOptions, Router};
///
/// let mut router = Router::new();
/// router.add("GET", "/users/:id", "get_user").unwrap();
/// router.add("PUT", "/users/:id", "update_user").unwrap();
/// router.add("", "/health", "health").unwrap();
///
/// assert_eq!(*router.find("PUT", "/users/7").unwrap().data, "update_user");
/// assert_eq!(*router.find("DELETE", "/health").unwrap().data, "health");
///
/// let m = router
///     .find_with("GET", "/users/7", FindOptions::new().with_params(false))
///     .unwrap();
/// assert!(m.params.is_none());
///
/// assert!(router.remove("GET", "/users/:id"));
/// assert!(!router.remove("GET", "/users/:id"));
/// assert!(router.find("GET", "/users/7").is_none());
/// assert!(router.find("PUT", "/users/7").is_some());
/// ```
pub struct Router<T> {
    tree: RouteTree<T>,
    /// Normalized pattern text -> leaf, for parameter-free patterns only.
    static_routes: HashMap<String, NodeId>,
    len: usize,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Router<T> {
    /// Create an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: RouteTree::new(),
            static_routes: HashMap::new(),
            len: 0,
        }
    }

    /// Register `data` for `method` on `pattern`.
    ///
    /// `pattern` need not start with `/`. Registering the same pattern and
    /// method again replaces the previous payload.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`] if an inline `:name(regex)`
    /// constraint does not compile. The router is left unchanged.
    pub fn add(&mut self, method: &str, pattern: &str, data: T) -> Result<(), RouterError> {
        let method = normalize_method(method);
        let path = normalize_pattern(pattern);
        let segments = split_path(&path);
        let regexes = compile_constraints(&path, &segments)?;

        let mut node = RouteTree::<T>::ROOT;
        let mut bindings = Vec::new();
        let mut unnamed = 0usize;

        for (position, &segment) in segments.iter().enumerate() {
            match PatternSegment::parse(segment) {
                PatternSegment::Literal(literal) => {
                    node = self.tree.static_child_or_insert(node, literal);
                }
                PatternSegment::CatchAll { name, optional } => {
                    node = self.tree.catch_all_or_insert(node);
                    bindings.push(ParamBinding::new(
                        ParamPosition::Rest(position),
                        ParamName::Name(name.to_owned()),
                        optional,
                    ));
                    break;
                }
                PatternSegment::Anonymous => {
                    node = self.tree.param_or_insert(node);
                    bindings.push(ParamBinding::new(
                        ParamPosition::Segment(position),
                        ParamName::Name(format!("_{unnamed}")),
                        true,
                    ));
                    unnamed += 1;
                }
                PatternSegment::Named(name) => {
                    node = self.tree.param_or_insert(node);
                    bindings.push(ParamBinding::new(
                        ParamPosition::Segment(position),
                        ParamName::Name(name.to_owned()),
                        false,
                    ));
                }
                PatternSegment::Constrained { .. } => {
                    node = self.tree.param_or_insert(node);
                    self.tree.node_mut(node).has_regex_param = true;
                    if let Some(regex) = regexes.get(position).cloned().flatten() {
                        bindings.push(ParamBinding::new(
                            ParamPosition::Segment(position),
                            ParamName::Pattern(regex),
                            false,
                        ));
                    }
                }
            }
        }

        let params = (!bindings.is_empty()).then_some(bindings);
        let is_static = params.is_none();
        let entry = Entry {
            data,
            regexes,
            params,
        };

        let replaced = self
            .tree
            .node_mut(node)
            .methods
            .get_or_insert_with(HashMap::new)
            .insert(method.clone(), entry)
            .is_some();
        if !replaced {
            self.len += 1;
        }
        if is_static {
            self.static_routes.insert(path.to_string(), node);
        }

        tracing::debug!(method = %method, pattern = %path, replaced, "route added");
        Ok(())
    }

    /// Find the route answering `method` on `path`, extracting parameters.
    ///
    /// Returns `None` when nothing matches.
    #[must_use]
    pub fn find(&self, method: &str, path: &str) -> Option<Match<'_, T>> {
        self.find_with(method, path, FindOptions::default())
    }

    /// Find the route answering `method` on `path`.
    ///
    /// The static route cache is probed with `path` verbatim first; on a miss
    /// the path is segmented, dropping empty segments, and the tree is searched.
    #[must_use]
    pub fn find_with(&self, method: &str, path: &str, options: FindOptions) -> Option<Match<'_, T>> {
        let method = normalize_method(method);

        if let Some(&leaf) = self.static_routes.get(path) {
            if let Some(entry) = self.tree.node(leaf).entry(&method) {
                tracing::trace!(method = %method, path, "static route hit");
                return Some(Match {
                    data: &entry.data,
                    params: None,
                });
            }
        }

        let segments = split_path(path);
        let Some(entry) = search(&self.tree, RouteTree::<T>::ROOT, &method, &segments, 0) else {
            tracing::trace!(method = %method, path, "no route");
            return None;
        };
        tracing::trace!(method = %method, path, "tree match");

        let params = match &entry.params {
            Some(bindings) if options.params => Some(extract(&segments, bindings)),
            _ => None,
        };
        Some(Match {
            data: &entry.data,
            params,
        })
    }

    /// Remove the entry registered for `method` on `pattern`.
    ///
    /// `pattern` is written the same way it was passed to [`add`](Self::add).
    /// Returns whether an entry existed and was removed. Tree nodes are kept
    /// even when they no longer carry any entry.
    pub fn remove(&mut self, method: &str, pattern: &str) -> bool {
        let method = normalize_method(method);
        let path = normalize_pattern(pattern);
        let segments = split_path(&path);
        let dynamic = segments
            .iter()
            .any(|segment| PatternSegment::parse(segment).is_dynamic());

        let leaf = if dynamic {
            self.locate(&segments)
        } else {
            self.static_routes.get(&*path).copied()
        };
        let Some(leaf) = leaf else {
            return false;
        };

        let node = self.tree.node_mut(leaf);
        let Some(methods) = node.methods.as_mut() else {
            return false;
        };
        if methods.remove(&method).is_none() {
            return false;
        }
        if methods.is_empty() {
            node.methods = None;
        }

        self.len -= 1;
        if !dynamic {
            self.static_routes.remove(&*path);
        }

        tracing::debug!(method = %method, pattern = %path, "route removed");
        true
    }

    /// Number of registered (pattern, method) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no route is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Walk the edges a pattern was inserted along. No backtracking.
    fn locate(&self, segments: &[&str]) -> Option<NodeId> {
        let mut id = RouteTree::<T>::ROOT;
        for &segment in segments {
            let node = self.tree.node(id);
            match PatternSegment::parse(segment) {
                PatternSegment::Literal(literal) => id = node.static_child(literal)?,
                PatternSegment::Anonymous
                | PatternSegment::Named(_)
                | PatternSegment::Constrained { .. } => id = node.param?,
                PatternSegment::CatchAll { .. } => return node.catch_all,
            }
        }
        Some(id)
    }
}

impl<T> fmt::Debug for Router<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.len)
            .field("static_routes", &self.static_routes.len())
            .field("nodes", &self.tree.node_count())
            .finish()
    }
}

/// Compile every `:name(pattern)` up to the first catch-all into
/// `^(?P<name>pattern)$`, indexed by segment position.
fn compile_constraints(path: &str, segments: &[&str]) -> Result<Vec<Option<Regex>>, RouterError> {
    let mut regexes = Vec::new();
    for (position, &segment) in segments.iter().enumerate() {
        match PatternSegment::parse(segment) {
            PatternSegment::CatchAll { .. } => break,
            PatternSegment::Constrained { name, pattern } => {
                let regex = Regex::new(&format!("^(?P<{name}>{pattern})$")).map_err(|e| {
                    tracing::warn!(pattern = %path, error = %e, "invalid route constraint");
                    RouterError::InvalidPattern {
                        pattern: path.to_owned(),
                        source: e.to_string(),
                    }
                })?;
                regexes.resize(position + 1, None);
                regexes[position] = Some(regex);
            }
            _ => {}
        }
    }
    Ok(regexes)
}

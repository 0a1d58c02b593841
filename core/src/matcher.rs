//! Recursive search over the route tree.
//!
//! # Precedence
//!
//! At every depth a literal child is tried first, then the parameter child,
//! then the catch-all child. A literal success is final: parameter and
//! catch-all siblings at that depth are not consulted.
//!
//! # Regex-constrained parameters
//!
//! When the parameter child carries constraints, the entry found below it is
//! accepted only if its constraint at this position matches the segment. A
//! failed constraint rejects the whole branch; the catch-all sibling is not
//! retried.

use crate::tree::{Entry, Node, NodeId, RouteTree};

/// Find the entry answering `method` for `segments[index..]` below `id`.
pub(crate) fn search<'t, T>(
    tree: &'t RouteTree<T>,
    id: NodeId,
    method: &str,
    segments: &[&str],
    index: usize,
) -> Option<&'t Entry<T>> {
    let node = tree.node(id);
    let Some(&segment) = segments.get(index) else {
        return resolve_terminal(tree, node, method);
    };

    if let Some(child) = node.static_child(segment) {
        if let Some(entry) = search(tree, child, method, segments, index + 1) {
            return Some(entry);
        }
    }

    let Some(param) = node.param else {
        return catch_all_entry(tree, node, method);
    };
    let Some(entry) = search(tree, param, method, segments, index + 1) else {
        return catch_all_entry(tree, node, method);
    };

    if tree.node(param).has_regex_param {
        return entry
            .regex_at(index)
            .is_some_and(|regex| regex.is_match(segment))
            .then_some(entry);
    }
    Some(entry)
}

/// Path exhausted: the node's own entry, else an optional trailing
/// parameter, else an optional trailing catch-all.
fn resolve_terminal<'t, T>(
    tree: &'t RouteTree<T>,
    node: &'t Node<T>,
    method: &str,
) -> Option<&'t Entry<T>> {
    node.entry(method)
        .or_else(|| optional_tail(tree, node.param, method))
        .or_else(|| optional_tail(tree, node.catch_all, method))
}

fn optional_tail<'t, T>(
    tree: &'t RouteTree<T>,
    child: Option<NodeId>,
    method: &str,
) -> Option<&'t Entry<T>> {
    child
        .and_then(|id| tree.node(id).entry(method))
        .filter(|entry| entry.has_optional_tail())
}

fn catch_all_entry<'t, T>(
    tree: &'t RouteTree<T>,
    node: &'t Node<T>,
    method: &str,
) -> Option<&'t Entry<T>> {
    node.catch_all.and_then(|id| tree.node(id).entry(method))
}

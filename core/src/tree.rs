//! Route tree: a trie over path segments.
//!
//! Nodes live in an arena owned by [`RouteTree`] and are addressed by
//! [`NodeId`]. Every node except the root is linked from exactly one parent
//! edge (a static child, the parameter child or the catch-all child), so the
//! structure is a plain ownership tree; the arena only gives the static route
//! cache a stable handle to a leaf. Nodes are never freed: removal drops
//! entries but leaves the structure in place.

use crate::params::ParamBinding;
use crate::ANY_METHOD;
use regex::Regex;
use std::collections::HashMap;

/// Stable handle to a node in a [`RouteTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// Payload for one (node, method) registration.
#[derive(Debug)]
pub(crate) struct Entry<T> {
    pub(crate) data: T,
    /// Compiled `:name(pattern)` constraints, indexed by segment position.
    pub(crate) regexes: Vec<Option<Regex>>,
    /// `None` for parameter-free routes.
    pub(crate) params: Option<Vec<ParamBinding>>,
}

impl<T> Entry<T> {
    pub(crate) fn regex_at(&self, position: usize) -> Option<&Regex> {
        self.regexes.get(position).and_then(Option::as_ref)
    }

    /// The last binding may legitimately match an absent segment.
    pub(crate) fn has_optional_tail(&self) -> bool {
        self.params
            .as_ref()
            .and_then(|bindings| bindings.last())
            .is_some_and(|binding| binding.optional)
    }
}

#[derive(Debug)]
pub(crate) struct Node<T> {
    /// Literal segment, `*` or `**`. Informational only.
    #[allow(dead_code)]
    pub(crate) key: String,
    pub(crate) statics: Option<HashMap<String, NodeId>>,
    pub(crate) param: Option<NodeId>,
    pub(crate) catch_all: Option<NodeId>,
    /// Some route through the parameter child carries a regex constraint.
    pub(crate) has_regex_param: bool,
    pub(crate) methods: Option<HashMap<String, Entry<T>>>,
}

impl<T> Node<T> {
    fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            statics: None,
            param: None,
            catch_all: None,
            has_regex_param: false,
            methods: None,
        }
    }

    pub(crate) fn static_child(&self, segment: &str) -> Option<NodeId> {
        self.statics.as_ref()?.get(segment).copied()
    }

    /// Exact method first, then the any-method entry.
    pub(crate) fn entry(&self, method: &str) -> Option<&Entry<T>> {
        let methods = self.methods.as_ref()?;
        methods.get(method).or_else(|| methods.get(ANY_METHOD))
    }
}

#[derive(Debug)]
pub(crate) struct RouteTree<T> {
    nodes: Vec<Node<T>>,
}

impl<T> RouteTree<T> {
    pub(crate) const ROOT: NodeId = NodeId(0);

    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node::new("")],
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id.0]
    }

    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn static_child_or_insert(&mut self, parent: NodeId, segment: &str) -> NodeId {
        if let Some(child) = self.node(parent).static_child(segment) {
            return child;
        }
        let child = self.push(segment);
        self.node_mut(parent)
            .statics
            .get_or_insert_with(HashMap::new)
            .insert(segment.to_owned(), child);
        child
    }

    pub(crate) fn param_or_insert(&mut self, parent: NodeId) -> NodeId {
        if let Some(child) = self.node(parent).param {
            return child;
        }
        let child = self.push("*");
        self.node_mut(parent).param = Some(child);
        child
    }

    pub(crate) fn catch_all_or_insert(&mut self, parent: NodeId) -> NodeId {
        if let Some(child) = self.node(parent).catch_all {
            return child;
        }
        let child = self.push("**");
        self.node_mut(parent).catch_all = Some(child);
        child
    }

    fn push(&mut self, key: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(key));
        id
    }
}

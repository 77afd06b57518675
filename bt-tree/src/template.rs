use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Instance, Node, NodeId, NodeKind};

/// Rejected template mutation or well-formedness violation.
///
/// These are the only programmer-error conditions in the engine: they are
/// reported immediately at the authoring boundary and can never reach
/// evaluation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("node {0} is not in this template")]
    UnknownNode(NodeId),
    #[error("a template has exactly one root node")]
    RootIsFixed,
    #[error("the root cannot be the child of another node")]
    RootAsChild,
    #[error("node {parent} cannot take another child")]
    ChildLimit { parent: NodeId },
    #[error("node {child} already has a parent; subtrees are not shared")]
    AlreadyParented { child: NodeId },
    #[error("connecting {child} under {parent} would close a cycle")]
    WouldCycle { parent: NodeId, child: NodeId },
    #[error("node {parent} is not connected to {child}")]
    NotConnected { parent: NodeId, child: NodeId },
    #[error("child {child} of node {parent} points outside the template")]
    DanglingChild { parent: NodeId, child: NodeId },
}

/// The authored node graph: an arena of nodes plus the single root.
///
/// Templates are shared and read-only at runtime; agents evaluate their own
/// [`Instance`] produced by [`Template::instantiate`]. All structural
/// mutation goes through [`add_node`](Template::add_node) /
/// [`remove_node`](Template::remove_node) / [`connect`](Template::connect) /
/// [`disconnect`](Template::disconnect), which preserve the single-root,
/// single-parent, no-cycle invariants after every call. Nodes may sit
/// detached while a tree is being authored; whatever is reachable from the
/// root is reachable exactly once.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Template {
    pub name: String,
    nodes: BTreeMap<NodeId, Node>,
    root: NodeId,
    next_id: u64,
}

impl Template {
    /// Create an empty template. The root node is created with it and lives
    /// for as long as the template does.
    pub fn new(name: impl Into<String>) -> Self {
        let mut template = Self {
            name: name.into(),
            nodes: BTreeMap::new(),
            root: NodeId::new(0),
            next_id: 0,
        };
        template.root = template.alloc(NodeKind::Root);
        template
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(id, kind));
        id
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Mutable node access for editing names and parameters. Structure
    /// (edges, identity, state) stays behind the template's own operations.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a detached node of the given kind, returning its new id.
    /// Adding a second root is rejected.
    pub fn add_node(&mut self, kind: NodeKind) -> Result<NodeId, TemplateError> {
        if matches!(kind, NodeKind::Root) {
            return Err(TemplateError::RootIsFixed);
        }
        Ok(self.alloc(kind))
    }

    /// Remove a node, detaching it from its parent. The removed node's
    /// children stay in the template as detached subtrees. The root cannot
    /// be removed.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), TemplateError> {
        if id == self.root {
            return Err(TemplateError::RootIsFixed);
        }
        if !self.nodes.contains_key(&id) {
            return Err(TemplateError::UnknownNode(id));
        }
        if let Some(parent) = self.parent_of(id) {
            if let Some(node) = self.nodes.get_mut(&parent) {
                node.children.retain(|&c| c != id);
            }
        }
        self.nodes.remove(&id);
        Ok(())
    }

    /// Make `child` the last child of `parent`.
    ///
    /// Rejects unknown ids, arity overflow, the root as a child, a child
    /// that already has a parent (no shared subtrees), and any edge that
    /// would close a cycle.
    pub fn connect(&mut self, parent: NodeId, child: NodeId) -> Result<(), TemplateError> {
        if !self.nodes.contains_key(&parent) {
            return Err(TemplateError::UnknownNode(parent));
        }
        if !self.nodes.contains_key(&child) {
            return Err(TemplateError::UnknownNode(child));
        }
        if child == self.root {
            return Err(TemplateError::RootAsChild);
        }
        let slots = &self.nodes[&parent];
        if slots.children.len() >= slots.kind.max_children() {
            return Err(TemplateError::ChildLimit { parent });
        }
        if self.parent_of(child).is_some() {
            return Err(TemplateError::AlreadyParented { child });
        }
        if parent == child || self.subtree_contains(child, parent) {
            return Err(TemplateError::WouldCycle { parent, child });
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
        Ok(())
    }

    /// Remove the `parent` -> `child` edge. Both nodes stay in the template.
    pub fn disconnect(&mut self, parent: NodeId, child: NodeId) -> Result<(), TemplateError> {
        if !self.nodes.contains_key(&child) {
            return Err(TemplateError::UnknownNode(child));
        }
        let Some(node) = self.nodes.get_mut(&parent) else {
            return Err(TemplateError::UnknownNode(parent));
        };
        let before = node.children.len();
        node.children.retain(|&c| c != child);
        if node.children.len() == before {
            return Err(TemplateError::NotConnected { parent, child });
        }
        Ok(())
    }

    /// Find the node owning `id` as a child, if any.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes
            .values()
            .find(|node| node.children.contains(&id))
            .map(Node::id)
    }

    fn subtree_contains(&self, from: NodeId, target: NodeId) -> bool {
        let mut stack = vec![from];
        let mut seen = BTreeSet::new();
        while let Some(id) = stack.pop() {
            if id == target {
                return true;
            }
            if !seen.insert(id) {
                continue;
            }
            if let Some(node) = self.nodes.get(&id) {
                stack.extend(node.children.iter().copied());
            }
        }
        false
    }

    /// Check full well-formedness: the single root exists, every edge
    /// resolves, arity holds, no node has two parents, and no cycle exists.
    ///
    /// Mutations through this API cannot break these invariants; `validate`
    /// is for templates that arrive through deserialization or had a node's
    /// variant swapped through [`Node::kind_mut`].
    pub fn validate(&self) -> Result<(), TemplateError> {
        let root = self
            .nodes
            .get(&self.root)
            .ok_or(TemplateError::UnknownNode(self.root))?;
        if !matches!(root.kind, NodeKind::Root) {
            return Err(TemplateError::RootIsFixed);
        }

        let mut parent_seen: BTreeMap<NodeId, NodeId> = BTreeMap::new();
        for node in self.nodes.values() {
            if node.id() != self.root && matches!(node.kind, NodeKind::Root) {
                return Err(TemplateError::RootIsFixed);
            }
            if node.children.len() > node.kind.max_children() {
                return Err(TemplateError::ChildLimit { parent: node.id() });
            }
            for &child in &node.children {
                if !self.nodes.contains_key(&child) {
                    return Err(TemplateError::DanglingChild {
                        parent: node.id(),
                        child,
                    });
                }
                if child == self.root {
                    return Err(TemplateError::RootAsChild);
                }
                if parent_seen.insert(child, node.id()).is_some() {
                    return Err(TemplateError::AlreadyParented { child });
                }
            }
        }

        // With at most one parent per node, any cycle is a loop of nodes
        // none of which is the root; walking parent edges from each node
        // either terminates or revisits the start.
        for start in self.nodes.keys().copied() {
            let mut current = start;
            let mut hops = 0usize;
            while let Some(&parent) = parent_seen.get(&current) {
                if parent == start || hops > self.nodes.len() {
                    return Err(TemplateError::WouldCycle {
                        parent: current,
                        child: start,
                    });
                }
                current = parent;
                hops += 1;
            }
        }
        Ok(())
    }

    /// Deep-copy this template into a fresh running instance: same node
    /// identities, every state reset to inactive, overall state `Running`.
    pub fn instantiate(&self) -> Instance {
        Instance::new(self)
    }
}

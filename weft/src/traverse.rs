//! Traversal: lazy iteration over a flow's nodes and edges.
//!
//! Walks the graph from its entry node without invoking any node function —
//! structure only, for visualization or analysis. Depth-first over an
//! explicit LIFO work list: popping a node yields the node, then one
//! [`Edge`] per outgoing link (branch entries in insertion order), pushing
//! each not-yet-scheduled target.
//!
//! A node is marked scheduled when pushed and checked before every push, so
//! every reachable node is yielded exactly once, even with fan-in from
//! several predecessors or cycles; edges are still yielded once per link.
//! Terminates for any graph with finitely many distinct nodes.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use crate::link::FlowHead;
use crate::node::Node;

/// Edge name used for a step's linear successor link.
pub const NEXT_EDGE: &str = "next";

/// Synthesized view of one link between two nodes.
///
/// Not part of the graph itself; computed on demand during traversal.
/// `name` is [`NEXT_EDGE`] for linear links or the branch key for
/// conditional links.
pub struct Edge<V> {
    /// Link name: [`NEXT_EDGE`] or a branch key.
    pub name: String,
    /// Node the link leaves.
    pub from: Node<V>,
    /// Node the link enters.
    pub to: Node<V>,
}

impl<V> Clone for Edge<V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
        }
    }
}

impl<V> fmt::Debug for Edge<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Edge")
            .field("name", &self.name)
            .field("from", &self.from.name())
            .field("to", &self.to.name())
            .finish()
    }
}

/// One traversal item: a node or a synthesized edge.
pub enum GraphItem<V> {
    /// A node, yielded before its outgoing edges.
    Node(Node<V>),
    /// One outgoing link of the most recently yielded node.
    Edge(Edge<V>),
}

impl<V> GraphItem<V> {
    /// The node, if this item is one.
    pub fn as_node(&self) -> Option<&Node<V>> {
        match self {
            GraphItem::Node(node) => Some(node),
            GraphItem::Edge(_) => None,
        }
    }

    /// The edge, if this item is one.
    pub fn as_edge(&self) -> Option<&Edge<V>> {
        match self {
            GraphItem::Node(_) => None,
            GraphItem::Edge(edge) => Some(edge),
        }
    }
}

impl<V> Clone for GraphItem<V> {
    fn clone(&self) -> Self {
        match self {
            GraphItem::Node(node) => GraphItem::Node(node.clone()),
            GraphItem::Edge(edge) => GraphItem::Edge(edge.clone()),
        }
    }
}

impl<V> fmt::Debug for GraphItem<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphItem::Node(node) => f.debug_tuple("Node").field(node).finish(),
            GraphItem::Edge(edge) => f.debug_tuple("Edge").field(edge).finish(),
        }
    }
}

/// Lazy depth-first walk over a flow's structure.
///
/// Created by [`traverse`]. State is fresh per call, so traversal is
/// restartable by calling `traverse` again.
pub struct Traversal<V> {
    stack: Vec<Node<V>>,
    scheduled: HashSet<usize>,
    /// Edges of the node most recently popped, drained before the next pop.
    pending: VecDeque<GraphItem<V>>,
}

/// Starts a traversal from the flow's entry node.
///
/// Never invokes any node's computation function.
pub fn traverse<V>(flow: &impl FlowHead<V>) -> Traversal<V> {
    let first = flow.first();
    let mut scheduled = HashSet::new();
    scheduled.insert(first.key());
    Traversal {
        stack: vec![first],
        scheduled,
        pending: VecDeque::new(),
    }
}

impl<V> Traversal<V> {
    /// Pushes `node` unless it was already scheduled.
    fn schedule(&mut self, node: &Node<V>) {
        if self.scheduled.insert(node.key()) {
            self.stack.push(node.clone());
        }
    }
}

impl<V> Iterator for Traversal<V> {
    type Item = GraphItem<V>;

    fn next(&mut self) -> Option<GraphItem<V>> {
        if let Some(item) = self.pending.pop_front() {
            return Some(item);
        }

        let node = self.stack.pop()?;
        match &node {
            Node::Step(step) => {
                if let Some(next) = step.next() {
                    self.pending.push_back(GraphItem::Edge(Edge {
                        name: NEXT_EDGE.to_string(),
                        from: node.clone(),
                        to: next.clone(),
                    }));
                    self.schedule(&next);
                }
            }
            Node::Branch(branch) => {
                for (key, target) in branch.branches() {
                    self.pending.push_back(GraphItem::Edge(Edge {
                        name: key.to_string(),
                        from: node.clone(),
                        to: target.clone(),
                    }));
                    self.schedule(target);
                }
            }
        }
        Some(GraphItem::Node(node))
    }
}

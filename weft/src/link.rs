//! Linking: the [`FlowHead`] / [`FlowTail`] capabilities and [`join`].
//!
//! `FlowHead` is something a flow can step into; `FlowTail` is something it
//! can step out of. `join(a, b)` wires `b`'s entry node as the successor of
//! `a`'s tail step — the single integrity check of construction lives here.

use crate::error::DuplicateSuccessor;
use crate::node::{Branch, Node, Step};

/// Something a flow can step into: resolves to its entry node.
///
/// Implemented by bare nodes and by builder handles, so `run`, `traverse`,
/// `join`, and branch targets all accept either. Resolution is total and
/// side-effect-free.
pub trait FlowHead<V> {
    /// The entry node of this value.
    fn first(&self) -> Node<V>;
}

/// Something a flow can step out of: resolves to its tail step.
///
/// Only a [`Step`] can take a successor, so tails are always steps. A
/// [`Branch`](crate::Branch) closes a chain and has no tail; the type system
/// keeps it out of this trait.
pub trait FlowTail<V> {
    /// The tail step further links attach to.
    fn last(&self) -> Step<V>;
}

impl<V> FlowHead<V> for Step<V> {
    fn first(&self) -> Node<V> {
        Node::Step(self.clone())
    }
}

impl<V> FlowHead<V> for Branch<V> {
    fn first(&self) -> Node<V> {
        Node::Branch(self.clone())
    }
}

impl<V> FlowHead<V> for Node<V> {
    fn first(&self) -> Node<V> {
        self.clone()
    }
}

impl<V> FlowTail<V> for Step<V> {
    fn last(&self) -> Step<V> {
        self.clone()
    }
}

/// Attaches `b`'s entry node as the successor of `a`'s tail step.
///
/// Fails with [`DuplicateSuccessor`] if the tail step is already linked; the
/// existing link is left untouched. Mutates the shared node in place — every
/// handle aliasing the tail sees the new successor.
pub fn join<V>(a: &impl FlowTail<V>, b: &impl FlowHead<V>) -> Result<(), DuplicateSuccessor> {
    a.last().link(b.first())
}

//! Graph node model: [`Step`], [`Branch`], and the [`Node`] union.
//!
//! A flow is a linked structure of nodes threading one value type `V`.
//! A `Step` transforms the value and has at most one successor, set exactly
//! once by `join`; a `Branch` selects one of several named successors fixed
//! at construction. Nodes are cheap-to-clone shared handles: cloning aliases
//! the same node, and identity is pointer identity, not name equality.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use once_cell::sync::OnceCell;

use crate::error::{DuplicateSuccessor, RunError};

/// Boxed async transform stored in a [`Step`].
pub type StepFn<V> = Box<dyn Fn(V) -> BoxFuture<'static, Result<V, RunError>> + Send + Sync>;

/// Boxed async selection stored in a [`Branch`].
pub type BranchFn<V> =
    Box<dyn Fn(V) -> BoxFuture<'static, Result<Selection<V>, RunError>> + Send + Sync>;

/// Result of a branch selection: which edge to follow and the value to send
/// along it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<V> {
    /// Key of the outgoing edge to take. Must be present in the branch map.
    pub edge: String,
    /// Value propagated to the selected successor.
    pub value: V,
}

impl<V> Selection<V> {
    /// Creates a selection of `edge` carrying `value`.
    pub fn new(edge: impl Into<String>, value: V) -> Self {
        Self {
            edge: edge.into(),
            value,
        }
    }
}

pub(crate) struct StepInner<V> {
    name: String,
    func: StepFn<V>,
    /// Write-once successor slot; absent means the step is terminal.
    next: OnceCell<Node<V>>,
}

/// A linear computation node: one async transform, at most one successor.
///
/// Build with [`Step::new`] or [`Step::effect`], link with
/// [`join`](crate::join) or the fluent builder. The handle is shared;
/// linking mutates the node in place for every alias.
pub struct Step<V>(pub(crate) Arc<StepInner<V>>);

impl<V> Clone for Step<V> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<V: Send + 'static> Step<V> {
    /// Creates a step from a name and an async transform.
    ///
    /// The name is diagnostic (tracing, error messages) and need not be
    /// unique.
    pub fn new<F, Fut>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(V) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, RunError>> + Send + 'static,
    {
        Self(Arc::new(StepInner {
            name: name.into(),
            func: Box::new(move |value| func(value).boxed()),
            next: OnceCell::new(),
        }))
    }

    /// Creates a side-effect-only step: runs `func` for effect and passes the
    /// step's input through unchanged, whatever `func` returns on success.
    /// An error from `func` still aborts the run.
    pub fn effect<F, Fut, T>(name: impl Into<String>, func: F) -> Self
    where
        V: Clone,
        F: Fn(V) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, RunError>> + Send + 'static,
    {
        Self::new(name, move |value: V| {
            let fut = func(value.clone());
            async move {
                fut.await?;
                Ok(value)
            }
        })
    }
}

impl<V> Step<V> {
    /// The step's diagnostic name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The successor, if one has been linked.
    pub fn next(&self) -> Option<Node<V>> {
        self.0.next.get().cloned()
    }

    /// Sets the successor. Fails if one is already in place, leaving the
    /// existing link untouched.
    pub(crate) fn link(&self, next: Node<V>) -> Result<(), DuplicateSuccessor> {
        if self.0.next.set(next).is_err() {
            let existing = self
                .0
                .next
                .get()
                .map(|n| n.name().to_string())
                .unwrap_or_default();
            return Err(DuplicateSuccessor {
                step: self.0.name.clone(),
                next: existing,
            });
        }
        Ok(())
    }

    pub(crate) fn invoke(&self, value: V) -> BoxFuture<'static, Result<V, RunError>> {
        (self.0.func)(value)
    }
}

impl<V> fmt::Debug for Step<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.0.name)
            .field("next", &self.0.next.get().map(|n| n.name()))
            .finish()
    }
}

pub(crate) struct BranchInner<V> {
    name: String,
    func: BranchFn<V>,
    /// Edge key -> successor, in insertion order. Fixed at construction.
    branches: Vec<(String, Node<V>)>,
}

/// A conditional fan-out node: an async selection over named successors.
///
/// The branch map is fixed at construction; each target may be a bare node
/// or a sub-flow normalized to its entry node via `Into<Node<V>>`.
pub struct Branch<V>(pub(crate) Arc<BranchInner<V>>);

impl<V> Clone for Branch<V> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<V: Send + 'static> Branch<V> {
    /// Creates a branch from a name, its edge map, and an async selection.
    ///
    /// Duplicate edge keys keep the last entry. The selection function must
    /// return a key present in the map, or the run fails with
    /// [`RunError::UnresolvedEdge`].
    pub fn new<K, H, F, Fut>(
        name: impl Into<String>,
        branches: impl IntoIterator<Item = (K, H)>,
        func: F,
    ) -> Self
    where
        K: Into<String>,
        H: Into<Node<V>>,
        F: Fn(V) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Selection<V>, RunError>> + Send + 'static,
    {
        let mut map: Vec<(String, Node<V>)> = Vec::new();
        for (key, head) in branches {
            let key = key.into();
            let target = head.into();
            match map.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = target,
                None => map.push((key, target)),
            }
        }
        Self(Arc::new(BranchInner {
            name: name.into(),
            func: Box::new(move |value| func(value).boxed()),
            branches: map,
        }))
    }
}

impl<V> Branch<V> {
    /// The branch's diagnostic name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Edge keys and their targets, in insertion order.
    pub fn branches(&self) -> impl Iterator<Item = (&str, &Node<V>)> + '_ {
        self.0.branches.iter().map(|(k, n)| (k.as_str(), n))
    }

    /// The successor under `edge`, if the key exists.
    pub fn target(&self, edge: &str) -> Option<Node<V>> {
        self.0
            .branches
            .iter()
            .find(|(k, _)| k == edge)
            .map(|(_, n)| n.clone())
    }

    pub(crate) fn invoke(&self, value: V) -> BoxFuture<'static, Result<Selection<V>, RunError>> {
        (self.0.func)(value)
    }
}

impl<V> fmt::Debug for Branch<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.0.branches.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("Branch")
            .field("name", &self.0.name)
            .field("branches", &keys)
            .finish()
    }
}

/// A graph node: either a [`Step`] or a [`Branch`].
///
/// A closed union — consumers match both variants exhaustively; there is no
/// other node shape.
pub enum Node<V> {
    /// Linear node with at most one successor.
    Step(Step<V>),
    /// Conditional node with named successors.
    Branch(Branch<V>),
}

impl<V> Node<V> {
    /// The node's diagnostic name.
    pub fn name(&self) -> &str {
        match self {
            Node::Step(step) => step.name(),
            Node::Branch(branch) => branch.name(),
        }
    }

    /// Pointer identity: whether two handles alias the same node.
    /// Names are not required to be unique, so this is the only reliable
    /// identity test.
    pub fn ptr_eq(&self, other: &Node<V>) -> bool {
        self.key() == other.key()
    }

    /// Stable per-node key derived from the shared allocation.
    pub(crate) fn key(&self) -> usize {
        match self {
            Node::Step(step) => Arc::as_ptr(&step.0) as *const () as usize,
            Node::Branch(branch) => Arc::as_ptr(&branch.0) as *const () as usize,
        }
    }
}

impl<V> Clone for Node<V> {
    fn clone(&self) -> Self {
        match self {
            Node::Step(step) => Node::Step(step.clone()),
            Node::Branch(branch) => Node::Branch(branch.clone()),
        }
    }
}

impl<V> fmt::Debug for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Step(step) => fmt::Debug::fmt(step, f),
            Node::Branch(branch) => fmt::Debug::fmt(branch, f),
        }
    }
}

impl<V> From<Step<V>> for Node<V> {
    fn from(step: Step<V>) -> Self {
        Node::Step(step)
    }
}

impl<V> From<Branch<V>> for Node<V> {
    fn from(branch: Branch<V>) -> Self {
        Node::Branch(branch)
    }
}

//! Fluent builder: grow a chain of steps, close it with a branch.
//!
//! [`FlowBuilder::new`] starts an empty chain; `step`/`effect`/`next` extend
//! it and return a [`StepBuilder`] tracking `(first, last)`; `branch` closes
//! it into a [`Flow`] that exposes only the entry node. A multi-way tail is
//! not a single attachment point, so the type system forbids linear
//! extension once a branch has closed the chain.
//!
//! Handles are plain values threaded between calls; the node objects they
//! point into are shared and mutated in place by linking.

use std::future::Future;

use crate::error::{DuplicateSuccessor, RunError};
use crate::link::{join, FlowHead, FlowTail};
use crate::node::{Branch, Node, Selection, Step};

/// Empty builder: the starting point of a fluent chain.
///
/// Starting a chain cannot fail — there is no tail to collide with yet —
/// so these operations return a [`StepBuilder`] directly.
///
/// # Example
///
/// ```rust
/// use weft::{run, FlowBuilder};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let flow = FlowBuilder::new()
///     .step("double", |x: i32| async move { Ok(x * 2) })
///     .step("add_one", |x| async move { Ok(x + 1) })?
///     .finish();
///
/// assert_eq!(run(&flow, 3).await?, 7);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct FlowBuilder;

impl FlowBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self
    }

    /// Starts a chain with a freshly constructed step.
    pub fn step<V, F, Fut>(&self, name: impl Into<String>, func: F) -> StepBuilder<V>
    where
        V: Send + 'static,
        F: Fn(V) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, RunError>> + Send + 'static,
    {
        self.next(Step::new(name, func))
    }

    /// Starts a chain with a side-effect-only step (input passes through).
    pub fn effect<V, F, Fut, T>(&self, name: impl Into<String>, func: F) -> StepBuilder<V>
    where
        V: Clone + Send + 'static,
        F: Fn(V) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, RunError>> + Send + 'static,
    {
        self.next(Step::effect(name, func))
    }

    /// Starts a chain from an already-built step.
    pub fn next<V>(&self, step: Step<V>) -> StepBuilder<V> {
        StepBuilder {
            first: Node::Step(step.clone()),
            last: step,
        }
    }
}

/// Extendable chain handle: entry node plus current tail.
///
/// Every linear extension returns a new handle whose `last` is the appended
/// step; the entry node never changes once the chain began. The handle does
/// not own the nodes apart from the graph — it is a pair of references into
/// the same structure later handed to `run` or `traverse`.
#[derive(Debug)]
pub struct StepBuilder<V> {
    first: Node<V>,
    last: Step<V>,
}

impl<V> Clone for StepBuilder<V> {
    fn clone(&self) -> Self {
        Self {
            first: self.first.clone(),
            last: self.last.clone(),
        }
    }
}

impl<V: Send + 'static> StepBuilder<V> {
    /// Appends a freshly constructed step.
    ///
    /// Fails with [`DuplicateSuccessor`] if the tail was linked outside the
    /// builder in the meantime.
    pub fn step<F, Fut>(
        self,
        name: impl Into<String>,
        func: F,
    ) -> Result<StepBuilder<V>, DuplicateSuccessor>
    where
        F: Fn(V) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, RunError>> + Send + 'static,
    {
        self.next(Step::new(name, func))
    }

    /// Appends a side-effect-only step (input passes through).
    pub fn effect<F, Fut, T>(
        self,
        name: impl Into<String>,
        func: F,
    ) -> Result<StepBuilder<V>, DuplicateSuccessor>
    where
        V: Clone,
        F: Fn(V) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, RunError>> + Send + 'static,
    {
        self.next(Step::effect(name, func))
    }

    /// Appends an already-built step — the escape hatch for attaching
    /// externally constructed nodes.
    pub fn next(self, step: Step<V>) -> Result<StepBuilder<V>, DuplicateSuccessor> {
        join(&self.last, &step)?;
        Ok(StepBuilder {
            first: self.first,
            last: step,
        })
    }

    /// Closes the chain with a branch node.
    ///
    /// Each branch target may be a bare node or a sub-flow; it is normalized
    /// to its entry node via `Into<Node<V>>`. The returned [`Flow`] exposes
    /// only the entry node: a multi-way tail cannot be linearly extended.
    pub fn branch<K, H, F, Fut>(
        self,
        name: impl Into<String>,
        branches: impl IntoIterator<Item = (K, H)>,
        func: F,
    ) -> Result<Flow<V>, DuplicateSuccessor>
    where
        K: Into<String>,
        H: Into<Node<V>>,
        F: Fn(V) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Selection<V>, RunError>> + Send + 'static,
    {
        let branch = Branch::new(name, branches, func);
        join(&self.last, &branch)?;
        Ok(Flow { first: self.first })
    }

    /// Closes the chain without branching.
    pub fn finish(self) -> Flow<V> {
        Flow { first: self.first }
    }
}

impl<V> FlowHead<V> for StepBuilder<V> {
    fn first(&self) -> Node<V> {
        self.first.clone()
    }
}

impl<V> FlowTail<V> for StepBuilder<V> {
    fn last(&self) -> Step<V> {
        self.last.clone()
    }
}

impl<V> From<StepBuilder<V>> for Node<V> {
    fn from(builder: StepBuilder<V>) -> Self {
        builder.first
    }
}

/// Closed chain handle: entry node only.
///
/// Produced by [`StepBuilder::branch`] or [`StepBuilder::finish`]; hand it
/// to [`run`](crate::run) or [`traverse`](crate::traverse), or use it as a
/// branch target inside a larger flow.
pub struct Flow<V> {
    first: Node<V>,
}

impl<V> Clone for Flow<V> {
    fn clone(&self) -> Self {
        Self {
            first: self.first.clone(),
        }
    }
}

impl<V> FlowHead<V> for Flow<V> {
    fn first(&self) -> Node<V> {
        self.first.clone()
    }
}

impl<V> From<Flow<V>> for Node<V> {
    fn from(flow: Flow<V>) -> Self {
        flow.first
    }
}

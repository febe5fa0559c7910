//! # Weft
//!
//! A minimal workflow-definition and execution library. Compose a directed
//! graph of asynchronous nodes — linear [`Step`]s and conditional
//! [`Branch`]es — with a fluent builder, execute it by threading a single
//! value through it with [`run`], and introspect its structure with
//! [`traverse`] without executing anything.
//!
//! ## Design principles
//!
//! - **Single value type**: each graph threads one value type `V` through
//!   all of its nodes — value in, value out, no separate input/output types
//!   per node.
//! - **Write-once edges**: a step's successor is set exactly once by
//!   [`join`]; relinking fails with [`DuplicateSuccessor`] instead of
//!   silently rewiring the chain.
//! - **Open or closed handles**: an extendable chain ([`StepBuilder`])
//!   carries an entry node and a tail; closing it with a branch yields a
//!   [`Flow`] carrying only the entry node, so the type system forbids
//!   linear extension past a fan-out.
//! - **Structure is data**: [`traverse`] yields every reachable node and a
//!   synthesized [`Edge`] per link, lazily and without running node
//!   functions — rendering is an external concern.
//!
//! Cycles are a legitimate graph shape: nothing validates against them, and
//! a run over a cycle terminates only when some branch selects an edge
//! leading to a terminal node. Timeouts and cancellation are the caller's
//! to layer on.
//!
//! ## Quick start
//!
//! ```rust
//! use weft::{run, FlowBuilder, Selection, Step};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let big = Step::new("big", |x: i32| async move { Ok(x - 10) });
//! let small = Step::new("small", |x: i32| async move { Ok(x + 10) });
//!
//! let flow = FlowBuilder::new()
//!     .step("double", |x: i32| async move { Ok(x * 2) })
//!     .branch(
//!         "size",
//!         [("big", big), ("small", small)],
//!         |x| async move {
//!             let edge = if x > 10 { "big" } else { "small" };
//!             Ok(Selection::new(edge, x))
//!         },
//!     )?;
//!
//! assert_eq!(run(&flow, 20).await?, 30); // double -> big
//! assert_eq!(run(&flow, 2).await?, 14); // double -> small
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`node`]: [`Step`], [`Branch`], the [`Node`] union, [`Selection`].
//! - [`link`]: [`FlowHead`] / [`FlowTail`] capabilities and [`join`].
//! - [`builder`]: [`FlowBuilder`], [`StepBuilder`], [`Flow`].
//! - [`engine`]: [`run`] — the interpreter loop.
//! - [`traverse`]: [`Traversal`], [`Edge`], [`GraphItem`] — structure only.
//! - [`error`]: [`DuplicateSuccessor`], [`RunError`].
//!
//! Execution emits `tracing` events (one per node entered); enable them
//! with e.g. `RUST_LOG=weft=debug`.

pub mod builder;
pub mod engine;
pub mod error;
pub mod link;
mod logging;
pub mod node;
pub mod traverse;

pub use builder::{Flow, FlowBuilder, StepBuilder};
pub use engine::run;
pub use error::{DuplicateSuccessor, RunError};
pub use link::{join, FlowHead, FlowTail};
pub use node::{Branch, BranchFn, Node, Selection, Step, StepFn};
pub use traverse::{traverse, Edge, GraphItem, Traversal, NEXT_EDGE};

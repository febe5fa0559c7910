//! Flow errors: construction (`DuplicateSuccessor`) and execution (`RunError`).
//!
//! Construction failures surface synchronously at the call that wires the
//! graph together, before anything runs. Execution failures surface from
//! `run` at the node where they occur, not before.

use thiserror::Error;

/// Error when linking a successor onto a step that already has one.
///
/// Returned by `join` and by the fluent builder's chain-extending operations.
/// The link already in place is left untouched; a step has at most one
/// outgoing linear edge, ever.
#[derive(Debug, Error)]
#[error("step \"{step}\" already has next step \"{next}\"")]
pub struct DuplicateSuccessor {
    /// Name of the step that already has a successor.
    pub step: String,
    /// Name of the successor already in place.
    pub next: String,
}

/// Error during flow execution.
///
/// `UnresolvedEdge` is the engine's own failure mode (a misconfigured
/// branch); `Node` carries a step or branch function's failure through
/// unchanged — the engine never catches, retries, or wraps it.
#[derive(Debug, Error)]
pub enum RunError {
    /// A branch selection returned an edge key absent from the branch map.
    /// Execution stops; no further node runs.
    #[error("branch \"{branch}\" has no edge \"{edge}\"")]
    UnresolvedEdge {
        /// Name of the branch node whose selection failed to resolve.
        branch: String,
        /// The edge key the selection function returned.
        edge: String,
    },

    /// A step or branch function failed. Propagated transparently so callers
    /// can downcast to the original error type.
    #[error(transparent)]
    Node(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl RunError {
    /// Wraps an error raised inside a step or branch function.
    pub fn node<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        RunError::Node(Box::new(err))
    }

    /// Ad-hoc failure from a message.
    pub fn message(msg: impl Into<String>) -> Self {
        RunError::Node(msg.into().into())
    }
}

//! Tracing helpers for flow execution.
//!
//! One event per node entry plus flow start/complete/error, emitted by the
//! run loop. Advisory diagnostics only — not a machine-readable contract.
//! Enable with e.g. `RUST_LOG=weft=debug`.

use crate::error::RunError;

pub(crate) fn log_flow_start(entry: &str) {
    tracing::debug!(entry = %entry, "flow start");
}

/// Emitted before each node executes; the structured form of the original
/// `--> <name>` trace line.
pub(crate) fn log_node_enter(name: &str) {
    tracing::debug!(node = %name, "--> entering node");
}

pub(crate) fn log_flow_complete() {
    tracing::debug!("flow complete");
}

pub(crate) fn log_flow_error(node: &str, err: &RunError) {
    tracing::error!(node = %node, error = %err, "flow failed");
}

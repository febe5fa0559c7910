//! Execution engine: interpret a flow against a value.
//!
//! A single-task loop: apply the current node's function, advance along the
//! linear `next` link or the selected branch edge, stop when no node
//! remains. Nodes execute strictly one at a time along the one path branch
//! choices dictate; there is no speculative or parallel execution.
//!
//! No cycle detection: a graph whose branch logic never reaches a terminal
//! node runs forever. Termination is the caller's responsibility, as is any
//! timeout or cancellation layered on top of the returned future.

use crate::error::RunError;
use crate::link::FlowHead;
use crate::logging;
use crate::node::{Node, Selection};

/// Runs a flow to completion, threading `value` through it.
///
/// `flow` may be a bare node, a [`Flow`](crate::Flow), or a still-open
/// [`StepBuilder`](crate::StepBuilder); it is normalized to its entry node.
/// Returns the value produced by the last node on the executed path.
///
/// Step and branch failures propagate unchanged. A branch selecting an edge
/// key absent from its map fails with [`RunError::UnresolvedEdge`], and no
/// further node executes.
pub async fn run<V>(flow: &impl FlowHead<V>, mut value: V) -> Result<V, RunError> {
    let entry = flow.first();
    logging::log_flow_start(entry.name());

    let mut current = Some(entry);
    while let Some(node) = current {
        logging::log_node_enter(node.name());
        match &node {
            Node::Step(step) => {
                match step.invoke(value).await {
                    Ok(out) => value = out,
                    Err(err) => {
                        logging::log_flow_error(step.name(), &err);
                        return Err(err);
                    }
                }
                current = step.next();
            }
            Node::Branch(branch) => {
                let Selection { edge, value: out } = match branch.invoke(value).await {
                    Ok(selection) => selection,
                    Err(err) => {
                        logging::log_flow_error(branch.name(), &err);
                        return Err(err);
                    }
                };
                value = out;
                match branch.target(&edge) {
                    Some(next) => current = Some(next),
                    None => {
                        let err = RunError::UnresolvedEdge {
                            branch: branch.name().to_string(),
                            edge,
                        };
                        logging::log_flow_error(branch.name(), &err);
                        return Err(err);
                    }
                }
            }
        }
    }

    logging::log_flow_complete();
    Ok(value)
}

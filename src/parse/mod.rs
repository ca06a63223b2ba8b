//! Parse phase: JSON → Rust types + shared graph view.

pub mod graph;
pub mod types;

pub use graph::WorkflowGraph;
pub use types::*;

use crate::error::{ParseError, PlannerError};

/// Deserialize a workflow JSON string into a `Workflow` struct.
pub fn parse(json: &str) -> Result<Workflow, Vec<PlannerError>> {
    serde_json::from_str::<Workflow>(json)
        .map_err(|e| vec![ParseError::Workflow(e).into()])
}

/// Deserialize a single node, as sent by the editor's node inspector.
pub fn parse_node(json: &str) -> Result<WorkflowNode, Vec<PlannerError>> {
    serde_json::from_str::<WorkflowNode>(json).map_err(|e| vec![ParseError::Node(e).into()])
}

//! Validation phase.
//!
//! Structural rules, per-node configuration rules and loop-aware cycle
//! detection over a workflow snapshot. Nothing here fails: every violation is
//! collected as a diagnostic.

pub mod cycle;
pub mod node_rules;
pub mod structural;

use serde::Serialize;

use crate::error::PlannerError;
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::{Workflow, WorkflowNode};

pub use cycle::{CycleAnalysis, analyze_cycles, has_cycle};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<PlannerError>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<PlannerError>) -> Self {
        ValidationReport {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// The human-readable error strings, in report order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }
}

/// Validate a workflow snapshot: structure, cycles and node configs.
pub fn validate(workflow: &Workflow) -> ValidationReport {
    let graph = WorkflowGraph::build(workflow);
    let cycles = analyze_cycles(&graph);
    ValidationReport::from_errors(validate_graph(workflow, &graph, &cycles))
}

/// Validate against an already-built graph view and cycle analysis.
pub fn validate_graph(
    workflow: &Workflow,
    graph: &WorkflowGraph<'_>,
    cycles: &CycleAnalysis,
) -> Vec<PlannerError> {
    let mut errors = structural::validate_structural(workflow, graph, cycles);

    for node in &workflow.nodes {
        errors.extend(validate_node(node));
    }

    errors
}

/// Validate a single node's configuration.
pub fn validate_node(node: &WorkflowNode) -> Vec<PlannerError> {
    node_rules::validate_node_config(node)
}

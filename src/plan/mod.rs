//! Planning phase: execution order, time estimate and the dry-run report.
//!
//! `dry_run` never aborts early. Validation errors, a best-effort order and
//! a time estimate are always returned together so the editor can show what
//! is wrong next to what would run.

pub mod estimate;
pub mod topo;

use serde::Serialize;

use crate::error::PlannerError;
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::{Workflow, WorkflowNode};
use crate::validate::{self, analyze_cycles};

pub use estimate::{CostModel, Estimate, NodeEstimate, estimate_execution_time};
pub use topo::{ExecutionPlan, execution_order};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DryRunReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub diagnostics: Vec<PlannerError>,
    pub execution_order: Vec<WorkflowNode>,
    pub skipped_nodes: Vec<String>,
    pub estimated_time: u64,
    pub node_estimates: Vec<NodeEstimate>,
    pub node_count: usize,
    pub edge_count: usize,
}

impl DryRunReport {
    pub fn execution_order_ids(&self) -> Vec<&str> {
        self.execution_order.iter().map(|n| n.id()).collect()
    }
}

/// Dry run with the default cost model.
pub fn dry_run(workflow: &Workflow) -> DryRunReport {
    dry_run_with(workflow, &CostModel::default())
}

pub fn dry_run_with(workflow: &Workflow, costs: &CostModel) -> DryRunReport {
    let graph = WorkflowGraph::build(workflow);
    let cycles = analyze_cycles(&graph);

    let mut diagnostics = validate::validate_graph(workflow, &graph, &cycles);
    let plan = topo::plan(workflow, &graph, &cycles);

    if !plan.unscheduled.is_empty() {
        let ids: Vec<&str> = plan.unscheduled.iter().map(|n| n.id()).collect();
        tracing::warn!(unscheduled = ?ids, "execution order is incomplete");
        diagnostics.push(PlannerError::plan(
            "T001",
            format!(
                "{} node(s) could not be placed in the execution order: {}",
                ids.len(),
                ids.join(", ")
            ),
            None,
        ));
    }

    let estimate = estimate::estimate(workflow, costs);

    tracing::debug!(
        workflow = %workflow.name,
        nodes = workflow.nodes.len(),
        edges = workflow.edges.len(),
        errors = diagnostics.len(),
        ordered = plan.order.len(),
        estimated_ms = estimate.total,
        "dry run complete"
    );

    DryRunReport {
        valid: diagnostics.is_empty(),
        errors: diagnostics.iter().map(|e| e.message.clone()).collect(),
        diagnostics,
        execution_order: plan.order.into_iter().cloned().collect(),
        skipped_nodes: plan.skipped.iter().map(|n| n.id().to_string()).collect(),
        estimated_time: estimate.total,
        node_estimates: estimate.nodes,
        node_count: workflow.nodes.len(),
        edge_count: workflow.edges.len(),
    }
}

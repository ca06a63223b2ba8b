//! Graph-level structural validation rules (V001–V006).

use std::collections::HashSet;

use crate::error::PlannerError;
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::{Workflow, WorkflowNode};

use super::cycle::CycleAnalysis;

/// Branch tags a condition node may put on its outgoing edges.
const CONDITION_HANDLES: [&str; 2] = ["true", "false"];

/// Run all structural validation rules. Returns all errors found.
pub fn validate_structural(
    workflow: &Workflow,
    graph: &WorkflowGraph<'_>,
    cycles: &CycleAnalysis,
) -> Vec<PlannerError> {
    let mut errors = Vec::new();

    v001_not_empty(workflow, &mut errors);
    v002_edges_reference_existing_nodes(graph, &mut errors);
    v003_unique_node_ids(workflow, &mut errors);
    v004_no_illegal_cycles(cycles, &mut errors);
    v005_all_connected(workflow, graph, &mut errors);
    v006_condition_branch_handles(workflow, graph, &mut errors);

    errors
}

fn v001_not_empty(workflow: &Workflow, errors: &mut Vec<PlannerError>) {
    if workflow.nodes.is_empty() {
        errors.push(PlannerError::validate(
            "V001",
            "Workflow must contain at least one node",
            None,
        ));
    }
}

fn v002_edges_reference_existing_nodes(graph: &WorkflowGraph<'_>, errors: &mut Vec<PlannerError>) {
    for edge in graph.dangling_edges() {
        if graph.index_of(&edge.source).is_none() {
            errors.push(PlannerError::validate(
                "V002",
                format!(
                    "Edge '{}' references unknown source node '{}'",
                    edge.describe(),
                    edge.source
                ),
                None,
            ));
        }
        if graph.index_of(&edge.target).is_none() {
            errors.push(PlannerError::validate(
                "V002",
                format!(
                    "Edge '{}' references unknown target node '{}'",
                    edge.describe(),
                    edge.target
                ),
                None,
            ));
        }
    }
}

fn v003_unique_node_ids(workflow: &Workflow, errors: &mut Vec<PlannerError>) {
    let mut seen = HashSet::new();
    for node in &workflow.nodes {
        if !seen.insert(node.id()) {
            errors.push(PlannerError::validate(
                "V003",
                format!("Duplicate node ID '{}'", node.id()),
                Some(node.id().to_string()),
            ));
        }
    }
}

fn v004_no_illegal_cycles(cycles: &CycleAnalysis, errors: &mut Vec<PlannerError>) {
    if let Some(path) = &cycles.illegal_cycle {
        errors.push(PlannerError::validate(
            "V004",
            format!(
                "Workflow contains a cycle without a loop node ({})",
                path.join(" -> ")
            ),
            path.first().cloned(),
        ));
    }
}

fn v005_all_connected(
    workflow: &Workflow,
    graph: &WorkflowGraph<'_>,
    errors: &mut Vec<PlannerError>,
) {
    for node in &workflow.nodes {
        if node.is_entry() || graph.incoming_count(node.id()) > 0 {
            continue;
        }
        errors.push(PlannerError::validate(
            "V005",
            format!(
                "Node \"{}\" ({}) is not connected",
                node.display_label(),
                node.node_type()
            ),
            Some(node.id().to_string()),
        ));
    }
}

fn v006_condition_branch_handles(
    workflow: &Workflow,
    graph: &WorkflowGraph<'_>,
    errors: &mut Vec<PlannerError>,
) {
    for node in &workflow.nodes {
        let WorkflowNode::Condition(_) = node else {
            continue;
        };
        for label in graph.outgoing_edges(node.id()) {
            let Some(handle) = label.source_handle else {
                continue;
            };
            if !CONDITION_HANDLES.contains(&handle) {
                errors.push(PlannerError::validate(
                    "V006",
                    format!(
                        "Condition node \"{}\" has an outgoing edge on unknown branch '{}' (expected 'true' or 'false')",
                        node.display_label(),
                        handle
                    ),
                    Some(node.id().to_string()),
                ));
            }
        }
    }
}

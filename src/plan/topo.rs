//! Kahn-style topological ordering of the workflow graph.

use std::collections::VecDeque;

use crate::parse::graph::WorkflowGraph;
use crate::parse::types::{Workflow, WorkflowNode};
use crate::validate::cycle::{CycleAnalysis, analyze_cycles};

#[derive(Debug, Clone, Default)]
pub struct ExecutionPlan<'a> {
    /// Enabled nodes in the order they should run.
    pub order: Vec<&'a WorkflowNode>,
    /// Disabled nodes the planner passed over.
    pub skipped: Vec<&'a WorkflowNode>,
    /// Nodes that never reached zero in-degree, or that share an id with an
    /// earlier node.
    pub unscheduled: Vec<&'a WorkflowNode>,
}

/// Returns the enabled nodes of `workflow` in execution order.
///
/// Nodes stuck behind an illegitimate cycle are silently left out.
pub fn execution_order(workflow: &Workflow) -> Vec<&WorkflowNode> {
    let graph = WorkflowGraph::build(workflow);
    let cycles = analyze_cycles(&graph);
    plan(workflow, &graph, &cycles).order
}

/// Orders the graph with loop back-edges removed. FIFO queue seeded in node
/// list order; successors are released in edge order.
pub fn plan<'a>(
    workflow: &'a Workflow,
    graph: &WorkflowGraph<'a>,
    cycles: &CycleAnalysis,
) -> ExecutionPlan<'a> {
    let mut in_degree = graph.in_degrees(&cycles.loop_back_edges);
    let mut scheduled = vec![false; graph.node_count()];
    let mut queue: VecDeque<_> = graph
        .graph
        .node_indices()
        .filter(|idx| in_degree[idx.index()] == 0)
        .collect();

    let mut plan = ExecutionPlan::default();

    while let Some(idx) = queue.pop_front() {
        scheduled[idx.index()] = true;
        let node = graph.node(idx);
        if node.is_enabled() {
            tracing::trace!(node_id = node.id(), position = plan.order.len(), "scheduled node");
            plan.order.push(node);
        } else {
            plan.skipped.push(node);
        }

        for &(edge, target) in graph.successors(idx) {
            if cycles.loop_back_edges.contains(&edge) {
                continue;
            }
            let degree = &mut in_degree[target.index()];
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(target);
            }
        }
    }

    for node in &workflow.nodes {
        let is_scheduled = graph
            .index_of(node.id())
            .is_some_and(|idx| scheduled[idx.index()] && std::ptr::eq(graph.node(idx), node));
        if !is_scheduled {
            plan.unscheduled.push(node);
        }
    }

    plan
}

//! Cycle detection that tolerates loop constructs.
//!
//! Depth-first search with white/gray/black coloring. A back-edge is judged
//! on its own: if it touches a `loop` node (normally the loop header it
//! returns to) it closes an intentional loop body and is recorded, otherwise
//! it is an illegitimate cycle. The first such cycle is kept for reporting and
//! the search runs to completion so every loop back-edge is still recorded.

use std::collections::HashSet;

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::parse::graph::WorkflowGraph;
use crate::parse::types::Workflow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

#[derive(Debug, Clone, Default)]
pub struct CycleAnalysis {
    /// Back-edges that close a legitimate loop body.
    pub loop_back_edges: HashSet<EdgeIndex>,
    /// Node ids of the first illegitimate cycle found, starting and ending
    /// with the back-edge target.
    pub illegal_cycle: Option<Vec<String>>,
}

impl CycleAnalysis {
    pub fn has_illegal_cycle(&self) -> bool {
        self.illegal_cycle.is_some()
    }
}

/// True if the workflow contains a cycle that is not closed by a loop node.
pub fn has_cycle(workflow: &Workflow) -> bool {
    let graph = WorkflowGraph::build(workflow);
    analyze_cycles(&graph).has_illegal_cycle()
}

pub fn analyze_cycles(graph: &WorkflowGraph<'_>) -> CycleAnalysis {
    let mut analysis = CycleAnalysis::default();
    let mut color = vec![Color::White; graph.node_count()];
    // (node, position of the next successor to visit)
    let mut stack: Vec<(NodeIndex, usize)> = Vec::new();

    for start in graph.graph.node_indices() {
        if color[start.index()] != Color::White {
            continue;
        }
        color[start.index()] = Color::Gray;
        stack.push((start, 0));

        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            let successors = graph.successors(node);
            let Some(&(edge, target)) = successors.get(next) else {
                color[node.index()] = Color::Black;
                stack.pop();
                continue;
            };
            frame.1 += 1;

            match color[target.index()] {
                Color::White => {
                    color[target.index()] = Color::Gray;
                    stack.push((target, 0));
                }
                Color::Gray if graph.node(target).is_loop() || graph.node(node).is_loop() => {
                    analysis.loop_back_edges.insert(edge);
                }
                Color::Gray => {
                    if analysis.illegal_cycle.is_none() {
                        analysis.illegal_cycle = Some(cycle_path(graph, &stack, target));
                    }
                }
                Color::Black => {}
            }
        }
    }

    analysis
}

/// Path of node ids from `target` down the DFS stack, closed by `target`.
fn cycle_path(graph: &WorkflowGraph<'_>, stack: &[(NodeIndex, usize)], target: NodeIndex) -> Vec<String> {
    let start = stack
        .iter()
        .position(|(node, _)| *node == target)
        .unwrap_or(0);
    stack[start..]
        .iter()
        .map(|(node, _)| graph.node(*node).id().to_string())
        .chain(std::iter::once(graph.node(target).id().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::types::*;

    fn click(id: &str) -> WorkflowNode {
        WorkflowNode::Click(NodeBase::new(id, id, ClickConfig::default()))
    }

    fn looped(id: &str) -> WorkflowNode {
        WorkflowNode::Loop(NodeBase::new(id, id, LoopConfig::default()))
    }

    fn edge(source: &str, target: &str) -> WorkflowEdge {
        WorkflowEdge {
            id: None,
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }

    #[test]
    fn reports_path_of_illegal_cycle() {
        let workflow = Workflow {
            nodes: vec![click("a"), click("b"), click("c")],
            edges: vec![edge("a", "b"), edge("b", "c"), edge("c", "b")],
            ..Default::default()
        };
        let graph = WorkflowGraph::build(&workflow);
        let analysis = analyze_cycles(&graph);
        assert_eq!(
            analysis.illegal_cycle,
            Some(vec!["b".to_string(), "c".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn records_loop_back_edge() {
        let workflow = Workflow {
            nodes: vec![looped("l"), click("body")],
            edges: vec![edge("l", "body"), edge("body", "l")],
            ..Default::default()
        };
        let graph = WorkflowGraph::build(&workflow);
        let analysis = analyze_cycles(&graph);
        assert!(!analysis.has_illegal_cycle());
        assert_eq!(analysis.loop_back_edges.len(), 1);
        let back = *analysis.loop_back_edges.iter().next().unwrap();
        assert_eq!(graph.graph[back].position, 1);
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        let workflow = Workflow {
            nodes: vec![click("a"), click("b"), click("c"), click("d")],
            edges: vec![edge("a", "b"), edge("a", "c"), edge("b", "d"), edge("c", "d")],
            ..Default::default()
        };
        assert!(!has_cycle(&workflow));
    }
}

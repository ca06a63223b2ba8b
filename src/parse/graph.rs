//! petgraph-based directed graph view over a workflow snapshot.
//!
//! Built once per analysis and shared by the validator, the cycle detector
//! and the planner. Building never fails: edges whose endpoints are missing
//! are kept aside as dangling so the validator can report them.

use std::collections::{HashMap, HashSet};

use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use super::types::{Workflow, WorkflowEdge, WorkflowNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeLabel<'a> {
    /// Index of the edge in `Workflow::edges`.
    pub position: usize,
    pub source_handle: Option<&'a str>,
}

pub struct WorkflowGraph<'a> {
    pub graph: DiGraph<&'a WorkflowNode, EdgeLabel<'a>>,
    pub node_indices: HashMap<&'a str, NodeIndex>,
    /// Outgoing edges per node, in edge-insertion order.
    outgoing: Vec<Vec<(EdgeIndex, NodeIndex)>>,
    dangling: Vec<&'a WorkflowEdge>,
}

impl<'a> WorkflowGraph<'a> {
    pub fn build(workflow: &'a Workflow) -> Self {
        let mut graph: DiGraph<&'a WorkflowNode, EdgeLabel<'a>> =
            DiGraph::with_capacity(workflow.nodes.len(), workflow.edges.len());
        let mut node_indices: HashMap<&'a str, NodeIndex> = HashMap::new();
        let mut dangling = Vec::new();

        // Duplicate ids resolve to the first node carrying them.
        for node in &workflow.nodes {
            if !node_indices.contains_key(node.id()) {
                let idx = graph.add_node(node);
                node_indices.insert(node.id(), idx);
            }
        }

        for (position, edge) in workflow.edges.iter().enumerate() {
            let source = node_indices.get(edge.source.as_str());
            let target = node_indices.get(edge.target.as_str());
            match (source, target) {
                (Some(&s), Some(&t)) => {
                    graph.add_edge(
                        s,
                        t,
                        EdgeLabel {
                            position,
                            source_handle: edge.source_handle.as_deref(),
                        },
                    );
                }
                _ => dangling.push(edge),
            }
        }

        let outgoing = graph
            .node_indices()
            .map(|idx| {
                let mut edges: Vec<(EdgeIndex, NodeIndex)> = graph
                    .edges_directed(idx, Direction::Outgoing)
                    .map(|e| (e.id(), e.target()))
                    .collect();
                edges.sort_by_key(|(edge, _)| edge.index());
                edges
            })
            .collect();

        WorkflowGraph {
            graph,
            node_indices,
            outgoing,
            dangling,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn index_of(&self, node_id: &str) -> Option<NodeIndex> {
        self.node_indices.get(node_id).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> &'a WorkflowNode {
        self.graph[idx]
    }

    /// Successors of `idx` with the connecting edge, in edge-insertion order.
    pub fn successors(&self, idx: NodeIndex) -> &[(EdgeIndex, NodeIndex)] {
        &self.outgoing[idx.index()]
    }

    pub fn outgoing_edges(&self, node_id: &str) -> Vec<&EdgeLabel<'a>> {
        let Some(idx) = self.index_of(node_id) else {
            return vec![];
        };
        self.successors(idx)
            .iter()
            .map(|(edge, _)| &self.graph[*edge])
            .collect()
    }

    /// Incoming edges from other nodes; self-loops are not counted.
    pub fn incoming_count(&self, node_id: &str) -> usize {
        let Some(idx) = self.index_of(node_id) else {
            return 0;
        };
        self.graph
            .edges_directed(idx, Direction::Incoming)
            .filter(|e| e.source() != idx)
            .count()
    }

    pub fn outgoing_count(&self, node_id: &str) -> usize {
        self.index_of(node_id)
            .map_or(0, |idx| self.successors(idx).len())
    }

    /// In-degree per node (indexed by `NodeIndex::index`), ignoring `excluded` edges.
    pub fn in_degrees(&self, excluded: &HashSet<EdgeIndex>) -> Vec<usize> {
        let mut degrees = vec![0; self.graph.node_count()];
        for edge in self.graph.edge_references() {
            if !excluded.contains(&edge.id()) {
                degrees[edge.target().index()] += 1;
            }
        }
        degrees
    }

    /// Edges whose source or target is not a node of the workflow.
    pub fn dangling_edges(&self) -> &[&'a WorkflowEdge] {
        &self.dangling
    }
}

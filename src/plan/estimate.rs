//! Heuristic wall-clock estimate for a workflow.
//!
//! An upper-bound planning aid for dry runs, not a measured or guaranteed
//! duration.

use serde::{Deserialize, Serialize};

use crate::parse::types::{Workflow, WorkflowNode};

/// Per-node-type costs in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CostModel {
    /// Used when a navigate node has no positive timeout.
    pub navigate_timeout_ms: u64,
    /// Used when a wait node has no positive duration.
    pub wait_duration_ms: u64,
    /// Click and input.
    pub interaction_ms: u64,
    pub extract_ms: u64,
    pub loop_iteration_ms: u64,
    pub api_call_ms: u64,
    /// Every other node type.
    pub default_ms: u64,
}

impl Default for CostModel {
    fn default() -> Self {
        CostModel {
            navigate_timeout_ms: 30_000,
            wait_duration_ms: 1_000,
            interaction_ms: 1_000,
            extract_ms: 2_000,
            loop_iteration_ms: 5_000,
            api_call_ms: 3_000,
            default_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeEstimate {
    pub node_id: String,
    pub estimated_time: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub total: u64,
    /// Enabled nodes only, in node list order.
    pub nodes: Vec<NodeEstimate>,
}

/// Estimated duration in milliseconds using the default cost model.
pub fn estimate_execution_time(workflow: &Workflow) -> u64 {
    estimate(workflow, &CostModel::default()).total
}

/// Sums the cost of every enabled node.
pub fn estimate(workflow: &Workflow, model: &CostModel) -> Estimate {
    let nodes: Vec<NodeEstimate> = workflow
        .nodes
        .iter()
        .filter(|node| node.is_enabled())
        .map(|node| NodeEstimate {
            node_id: node.id().to_string(),
            estimated_time: node_cost(node, model),
        })
        .collect();
    let total = nodes
        .iter()
        .fold(0u64, |sum, n| sum.saturating_add(n.estimated_time));
    Estimate { total, nodes }
}

/// Cost of a single node, regardless of whether it is enabled.
pub fn node_cost(node: &WorkflowNode, model: &CostModel) -> u64 {
    match node {
        WorkflowNode::Navigate(n) => positive(n.data.config.timeout).unwrap_or(model.navigate_timeout_ms),
        WorkflowNode::Wait(n) => positive(n.data.config.duration).unwrap_or(model.wait_duration_ms),
        WorkflowNode::Click(_) | WorkflowNode::Input(_) => model.interaction_ms,
        WorkflowNode::Extract(_) => model.extract_ms,
        WorkflowNode::Loop(n) => positive(n.data.config.iterations)
            .unwrap_or(1)
            .saturating_mul(model.loop_iteration_ms),
        WorkflowNode::ApiCall(_) => model.api_call_ms,
        WorkflowNode::Condition(_)
        | WorkflowNode::Scroll(_)
        | WorkflowNode::Screenshot(_)
        | WorkflowNode::Variable(_)
        | WorkflowNode::Transform(_) => model.default_ms,
    }
}

fn positive(value: Option<i64>) -> Option<u64> {
    value.filter(|v| *v > 0).and_then(|v| u64::try_from(v).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::types::*;

    #[test]
    fn non_positive_values_fall_back_to_defaults() {
        let model = CostModel::default();
        let nav = WorkflowNode::Navigate(NodeBase::new(
            "n",
            "n",
            NavigateConfig {
                timeout: Some(0),
                ..Default::default()
            },
        ));
        let looped = WorkflowNode::Loop(NodeBase::new(
            "l",
            "l",
            LoopConfig {
                iterations: Some(-4),
                ..Default::default()
            },
        ));
        assert_eq!(node_cost(&nav, &model), 30_000);
        assert_eq!(node_cost(&looped, &model), 5_000);
    }

    #[test]
    fn cost_model_fills_missing_fields() {
        let model: CostModel = serde_json::from_str(r#"{"extractMs": 250}"#).unwrap();
        assert_eq!(model.extract_ms, 250);
        assert_eq!(model.navigate_timeout_ms, 30_000);
    }
}

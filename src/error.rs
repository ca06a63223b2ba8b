//! Unified diagnostic type shared by every analysis phase.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Parse,
    Validate,
    Plan,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Parse => write!(f, "Parse"),
            Phase::Validate => write!(f, "Validate"),
            Phase::Plan => write!(f, "Plan"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerError {
    pub code: String,
    pub phase: Phase,
    pub message: String,
    pub node_id: Option<String>,
}

impl std::fmt::Display for PlannerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.node_id {
            Some(id) => write!(
                f,
                "[{}:{}] {} (node '{}')",
                self.phase, self.code, self.message, id
            ),
            None => write!(f, "[{}:{}] {}", self.phase, self.code, self.message),
        }
    }
}

impl std::error::Error for PlannerError {}

impl PlannerError {
    pub fn parse(code: &str, message: impl Into<String>) -> Self {
        PlannerError {
            code: code.into(),
            phase: Phase::Parse,
            message: message.into(),
            node_id: None,
        }
    }

    pub fn validate(code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        PlannerError {
            code: code.into(),
            phase: Phase::Validate,
            message: message.into(),
            node_id,
        }
    }

    pub fn plan(code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        PlannerError {
            code: code.into(),
            phase: Phase::Plan,
            message: message.into(),
            node_id,
        }
    }
}

/// Failures turning editor JSON into typed values.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to parse workflow JSON: {0}")]
    Workflow(#[source] serde_json::Error),

    #[error("Failed to parse node JSON: {0}")]
    Node(#[source] serde_json::Error),

    #[error("Failed to parse cost model JSON: {0}")]
    CostModel(#[source] serde_json::Error),
}

impl From<ParseError> for PlannerError {
    fn from(e: ParseError) -> Self {
        PlannerError::parse("P001", e.to_string())
    }
}

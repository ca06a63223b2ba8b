//! Rust types mirroring the editor's workflow JSON.
//!
//! These types are the serde target for persisted workflows. Unknown fields
//! (canvas metadata, styling, editor-only state) are ignored on every object.
//! Every node config field is optional so that half-configured nodes still
//! parse; missing values surface as validation diagnostics instead.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// TOP-LEVEL WORKFLOW
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub nodes: Vec<WorkflowNode>,
    #[serde(default)]
    pub edges: Vec<WorkflowEdge>,
    /// Initial variable bindings, name → value.
    #[serde(default)]
    pub variables: Map<String, Value>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEdge {
    #[serde(default)]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub source_handle: Option<String>,
    #[serde(default)]
    pub target_handle: Option<String>,
}

impl WorkflowEdge {
    /// Name used in diagnostics: the edge id, or `source->target` when unnamed.
    pub fn describe(&self) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("{}->{}", self.source, self.target),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

// =============================================================================
// NODE BASE
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorHandling {
    #[serde(default)]
    pub continue_on_error: bool,
    #[serde(default)]
    pub retry_count: u32,
}

fn enabled_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData<C> {
    #[serde(default)]
    pub label: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub error_handling: Option<ErrorHandling>,
    #[serde(default)]
    pub config: C,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "C: Deserialize<'de> + Default"))]
pub struct NodeBase<C> {
    pub id: String,
    #[serde(default)]
    pub position: Option<Position>,
    pub data: NodeData<C>,
}

impl<C> NodeBase<C> {
    pub fn new(id: impl Into<String>, label: impl Into<String>, config: C) -> Self {
        NodeBase {
            id: id.into(),
            position: None,
            data: NodeData {
                label: label.into(),
                enabled: true,
                error_handling: None,
                config,
            },
        }
    }
}

// =============================================================================
// WORKFLOW NODE — tagged union over the 12 step types
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkflowNode {
    // Browser
    Navigate(NodeBase<NavigateConfig>),
    Click(NodeBase<ClickConfig>),
    Input(NodeBase<InputConfig>),
    Extract(NodeBase<ExtractConfig>),
    Scroll(NodeBase<ScrollConfig>),
    Screenshot(NodeBase<ScreenshotConfig>),
    Wait(NodeBase<WaitConfig>),

    // Control flow
    Condition(NodeBase<ConditionConfig>),
    Loop(NodeBase<LoopConfig>),

    // Data
    ApiCall(NodeBase<ApiCallConfig>),
    Variable(NodeBase<VariableConfig>),
    Transform(NodeBase<TransformConfig>),
}

/// Applies `$body` to the `NodeBase` of whichever variant `$node` holds.
macro_rules! with_base {
    ($node:expr, $n:ident => $body:expr) => {
        match $node {
            WorkflowNode::Navigate($n) => $body,
            WorkflowNode::Click($n) => $body,
            WorkflowNode::Input($n) => $body,
            WorkflowNode::Extract($n) => $body,
            WorkflowNode::Scroll($n) => $body,
            WorkflowNode::Screenshot($n) => $body,
            WorkflowNode::Wait($n) => $body,
            WorkflowNode::Condition($n) => $body,
            WorkflowNode::Loop($n) => $body,
            WorkflowNode::ApiCall($n) => $body,
            WorkflowNode::Variable($n) => $body,
            WorkflowNode::Transform($n) => $body,
        }
    };
}

impl WorkflowNode {
    pub fn id(&self) -> &str {
        with_base!(self, n => &n.id)
    }

    pub fn label(&self) -> &str {
        with_base!(self, n => &n.data.label)
    }

    /// Label for diagnostics, falling back to the id for unlabeled nodes.
    pub fn display_label(&self) -> &str {
        let label = self.label();
        if label.trim().is_empty() { self.id() } else { label }
    }

    pub fn is_enabled(&self) -> bool {
        with_base!(self, n => n.data.enabled)
    }

    pub fn error_handling(&self) -> Option<&ErrorHandling> {
        with_base!(self, n => n.data.error_handling.as_ref())
    }

    pub fn node_type(&self) -> &'static str {
        match self {
            WorkflowNode::Navigate(_) => "navigate",
            WorkflowNode::Click(_) => "click",
            WorkflowNode::Input(_) => "input",
            WorkflowNode::Extract(_) => "extract",
            WorkflowNode::Scroll(_) => "scroll",
            WorkflowNode::Screenshot(_) => "screenshot",
            WorkflowNode::Wait(_) => "wait",
            WorkflowNode::Condition(_) => "condition",
            WorkflowNode::Loop(_) => "loop",
            WorkflowNode::ApiCall(_) => "api_call",
            WorkflowNode::Variable(_) => "variable",
            WorkflowNode::Transform(_) => "transform",
        }
    }

    /// Human-facing type name used at the start of diagnostics.
    pub fn type_title(&self) -> &'static str {
        match self {
            WorkflowNode::Navigate(_) => "Navigate",
            WorkflowNode::Click(_) => "Click",
            WorkflowNode::Input(_) => "Input",
            WorkflowNode::Extract(_) => "Extract",
            WorkflowNode::Scroll(_) => "Scroll",
            WorkflowNode::Screenshot(_) => "Screenshot",
            WorkflowNode::Wait(_) => "Wait",
            WorkflowNode::Condition(_) => "Condition",
            WorkflowNode::Loop(_) => "Loop",
            WorkflowNode::ApiCall(_) => "API call",
            WorkflowNode::Variable(_) => "Variable",
            WorkflowNode::Transform(_) => "Transform",
        }
    }

    /// Navigate nodes may start a workflow without an incoming edge.
    pub fn is_entry(&self) -> bool {
        matches!(self, WorkflowNode::Navigate(_))
    }

    pub fn is_loop(&self) -> bool {
        matches!(self, WorkflowNode::Loop(_))
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        with_base!(self, n => n.data.enabled = enabled)
    }
}

// =============================================================================
// BROWSER CONFIGS
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigateConfig {
    pub url: Option<String>,
    /// Milliseconds.
    pub timeout: Option<i64>,
    pub wait_until: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickConfig {
    pub selector: Option<String>,
    pub button: Option<String>,
    pub click_count: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputConfig {
    pub selector: Option<String>,
    pub value: Option<String>,
    pub clear_first: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractConfig {
    pub selector: Option<String>,
    pub variable_name: Option<String>,
    pub attribute: Option<String>,
    pub multiple: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollConfig {
    pub direction: Option<String>,
    pub amount: Option<i64>,
    pub selector: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotConfig {
    pub full_page: Option<bool>,
    pub selector: Option<String>,
    pub variable_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitCondition {
    Time,
    Element,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitConfig {
    pub wait_condition: Option<WaitCondition>,
    /// Milliseconds, used by `time` waits.
    pub duration: Option<i64>,
    /// Used by `element` waits.
    pub selector: Option<String>,
    pub timeout: Option<i64>,
}

// =============================================================================
// CONTROL FLOW CONFIGS
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionConfig {
    pub variable: Option<String>,
    pub operator: Option<String>,
    pub value: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopType {
    Count,
    Foreach,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopConfig {
    pub loop_type: Option<LoopType>,
    pub iterations: Option<i64>,
    pub array_variable: Option<String>,
    pub item_variable: Option<String>,
}

// =============================================================================
// DATA CONFIGS
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCallConfig {
    pub url: Option<String>,
    pub method: Option<String>,
    pub headers: Option<Map<String, Value>>,
    pub body: Option<Value>,
    pub variable_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableConfig {
    pub variable_name: Option<String>,
    pub value: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformConfig {
    pub input_variable: Option<String>,
    pub output_variable: Option<String>,
    pub expression: Option<String>,
}

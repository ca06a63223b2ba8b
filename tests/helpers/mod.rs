use planner::error::PlannerError;
use planner::parse::*;

// =============================================================================
// Workflow builders
// =============================================================================

pub fn workflow(nodes: Vec<WorkflowNode>, edges: Vec<WorkflowEdge>) -> Workflow {
    Workflow {
        name: "Test Workflow".into(),
        nodes,
        edges,
        ..Default::default()
    }
}

pub fn edge(source: &str, target: &str) -> WorkflowEdge {
    WorkflowEdge {
        id: Some(format!("{}-{}", source, target)),
        source: source.into(),
        target: target.into(),
        source_handle: None,
        target_handle: None,
    }
}

pub fn branch(source: &str, target: &str, handle: &str) -> WorkflowEdge {
    WorkflowEdge {
        source_handle: Some(handle.into()),
        ..edge(source, target)
    }
}

pub fn disabled(mut node: WorkflowNode) -> WorkflowNode {
    node.set_enabled(false);
    node
}

// =============================================================================
// Node builders (valid configs unless the name says otherwise)
// =============================================================================

pub fn navigate(id: &str, url: &str) -> WorkflowNode {
    WorkflowNode::Navigate(NodeBase::new(
        id,
        format!("Open {}", id),
        NavigateConfig {
            url: Some(url.into()),
            ..Default::default()
        },
    ))
}

pub fn navigate_with_timeout(id: &str, url: &str, timeout: i64) -> WorkflowNode {
    WorkflowNode::Navigate(NodeBase::new(
        id,
        format!("Open {}", id),
        NavigateConfig {
            url: Some(url.into()),
            timeout: Some(timeout),
            ..Default::default()
        },
    ))
}

pub fn click(id: &str) -> WorkflowNode {
    WorkflowNode::Click(NodeBase::new(
        id,
        format!("Click {}", id),
        ClickConfig {
            selector: Some(format!("#{}", id)),
            ..Default::default()
        },
    ))
}

pub fn input(id: &str, value: &str) -> WorkflowNode {
    WorkflowNode::Input(NodeBase::new(
        id,
        format!("Type into {}", id),
        InputConfig {
            selector: Some(format!("input[name={}]", id)),
            value: Some(value.into()),
            ..Default::default()
        },
    ))
}

pub fn extract(id: &str, variable: &str) -> WorkflowNode {
    WorkflowNode::Extract(NodeBase::new(
        id,
        format!("Extract {}", id),
        ExtractConfig {
            selector: Some(".title".into()),
            variable_name: Some(variable.into()),
            ..Default::default()
        },
    ))
}

pub fn extract_without_variable(id: &str) -> WorkflowNode {
    WorkflowNode::Extract(NodeBase::new(
        id,
        format!("Extract {}", id),
        ExtractConfig {
            selector: Some(".title".into()),
            ..Default::default()
        },
    ))
}

pub fn wait_time(id: &str, duration: i64) -> WorkflowNode {
    WorkflowNode::Wait(NodeBase::new(
        id,
        format!("Wait {}", id),
        WaitConfig {
            wait_condition: Some(WaitCondition::Time),
            duration: Some(duration),
            ..Default::default()
        },
    ))
}

pub fn wait_element(id: &str, selector: Option<&str>) -> WorkflowNode {
    WorkflowNode::Wait(NodeBase::new(
        id,
        format!("Wait {}", id),
        WaitConfig {
            wait_condition: Some(WaitCondition::Element),
            selector: selector.map(Into::into),
            ..Default::default()
        },
    ))
}

pub fn condition(id: &str, variable: &str) -> WorkflowNode {
    WorkflowNode::Condition(NodeBase::new(
        id,
        format!("Check {}", id),
        ConditionConfig {
            variable: Some(variable.into()),
            ..Default::default()
        },
    ))
}

pub fn loop_count(id: &str, iterations: i64) -> WorkflowNode {
    WorkflowNode::Loop(NodeBase::new(
        id,
        format!("Repeat {}", id),
        LoopConfig {
            loop_type: Some(LoopType::Count),
            iterations: Some(iterations),
            ..Default::default()
        },
    ))
}

pub fn loop_foreach(id: &str, array: &str) -> WorkflowNode {
    WorkflowNode::Loop(NodeBase::new(
        id,
        format!("For each {}", id),
        LoopConfig {
            loop_type: Some(LoopType::Foreach),
            array_variable: Some(array.into()),
            ..Default::default()
        },
    ))
}

pub fn api_call(id: &str, url: &str, variable: &str) -> WorkflowNode {
    WorkflowNode::ApiCall(NodeBase::new(
        id,
        format!("Call {}", id),
        ApiCallConfig {
            url: Some(url.into()),
            method: Some("GET".into()),
            variable_name: Some(variable.into()),
            ..Default::default()
        },
    ))
}

pub fn variable(id: &str, name: &str) -> WorkflowNode {
    WorkflowNode::Variable(NodeBase::new(
        id,
        format!("Set {}", id),
        VariableConfig {
            variable_name: Some(name.into()),
            ..Default::default()
        },
    ))
}

pub fn screenshot(id: &str) -> WorkflowNode {
    WorkflowNode::Screenshot(NodeBase::new(id, format!("Capture {}", id), ScreenshotConfig::default()))
}

pub fn transform(id: &str) -> WorkflowNode {
    WorkflowNode::Transform(NodeBase::new(id, format!("Transform {}", id), TransformConfig::default()))
}

// =============================================================================
// Assertions
// =============================================================================

pub fn assert_has_error(errors: &[PlannerError], code: &str) {
    assert!(
        errors.iter().any(|e| e.code == code),
        "Expected error {}, got: {:?}",
        code,
        errors
    );
}

pub fn assert_no_error(errors: &[PlannerError], code: &str) {
    assert!(
        !errors.iter().any(|e| e.code == code),
        "Did not expect error {}, but got: {:?}",
        code,
        errors
    );
}

pub fn ids(nodes: &[&WorkflowNode]) -> Vec<String> {
    nodes.iter().map(|n| n.id().to_string()).collect()
}

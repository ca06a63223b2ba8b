//! Per-node configuration validation.
//! Match arms here must track `WorkflowNode` in `parse/types.rs`.

use url::Url;

use crate::error::PlannerError;
use crate::parse::types::*;

const VALID_HTTP_METHODS: [&str; 7] = ["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"];

/// Validate a single node's config. Returns all errors found.
pub fn validate_node_config(node: &WorkflowNode) -> Vec<PlannerError> {
    let mut errors = Vec::new();
    let mut push = |code: &str, problem: String| {
        errors.push(PlannerError::validate(
            code,
            format!(
                "{} node \"{}\" {}",
                node.type_title(),
                node.display_label(),
                problem
            ),
            Some(node.id().to_string()),
        ));
    };

    match node {
        WorkflowNode::Navigate(n) => {
            let config = &n.data.config;
            if let Some(problem) = url_problem(config.url.as_deref()) {
                push("N001", problem);
            }
            if config.timeout.is_some_and(|t| t <= 0) {
                push("N002", "timeout must be greater than 0".into());
            }
        }
        WorkflowNode::Click(n) => {
            if is_blank(n.data.config.selector.as_deref()) {
                push("N003", "is missing a selector".into());
            }
        }
        WorkflowNode::Input(n) => {
            if is_blank(n.data.config.selector.as_deref()) {
                push("N004", "is missing a selector".into());
            }
        }
        WorkflowNode::Extract(n) => {
            let config = &n.data.config;
            if is_blank(config.selector.as_deref()) {
                push("N005", "is missing a selector".into());
            }
            if is_blank(config.variable_name.as_deref()) {
                push("N005", "is missing variable name".into());
            }
        }
        WorkflowNode::Wait(n) => {
            let config = &n.data.config;
            match config.wait_condition {
                None => push("N006", "is missing a wait condition".into()),
                Some(WaitCondition::Time) => {
                    if !config.duration.is_some_and(|d| d > 0) {
                        push("N006", "duration must be greater than 0".into());
                    }
                }
                Some(WaitCondition::Element) => {
                    if is_blank(config.selector.as_deref()) {
                        push("N006", "is missing a selector to wait for".into());
                    }
                }
            }
        }
        WorkflowNode::Condition(n) => {
            if is_blank(n.data.config.variable.as_deref()) {
                push("N007", "is missing a variable".into());
            }
        }
        WorkflowNode::Loop(n) => {
            let config = &n.data.config;
            match config.loop_type {
                None => push("N008", "is missing a loop type".into()),
                Some(LoopType::Count) => {
                    if !config.iterations.is_some_and(|i| i > 0) {
                        push("N008", "iterations must be greater than 0".into());
                    }
                }
                Some(LoopType::Foreach) => {
                    if is_blank(config.array_variable.as_deref()) {
                        push("N008", "is missing an array variable".into());
                    }
                }
            }
        }
        WorkflowNode::ApiCall(n) => {
            let config = &n.data.config;
            if let Some(problem) = url_problem(config.url.as_deref()) {
                push("N009", problem);
            }
            if let Some(method) = &config.method {
                if !VALID_HTTP_METHODS.contains(&method.to_ascii_uppercase().as_str()) {
                    push("N009", format!("has invalid HTTP method '{}'", method));
                }
            }
            if is_blank(config.variable_name.as_deref()) {
                push("N009", "is missing variable name".into());
            }
        }
        WorkflowNode::Variable(n) => {
            if is_blank(n.data.config.variable_name.as_deref()) {
                push("N010", "is missing variable name".into());
            }
        }
        WorkflowNode::Scroll(_) | WorkflowNode::Screenshot(_) | WorkflowNode::Transform(_) => {}
    }

    errors
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Describes why `url` is not a usable absolute URL, if it isn't.
fn url_problem(url: Option<&str>) -> Option<String> {
    match url.map(str::trim) {
        None | Some("") => Some("is missing a URL".into()),
        Some(raw) => Url::parse(raw)
            .err()
            .map(|e| format!("has an invalid URL '{}': {}", raw, e)),
    }
}

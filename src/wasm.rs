//! WASM entry points for the browser editor.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::{ParseError, PlannerError};
use crate::plan::{CostModel, DryRunReport};

/// Validate a workflow JSON: parse + structural, cycle and node rules.
/// Returns a `ValidationReport`, or `{status: "errors"}` if the JSON does not parse.
#[wasm_bindgen]
pub fn validate_workflow(json: &str) -> JsValue {
    let result = match crate::parse::parse(json) {
        Ok(workflow) => Outcome::Success(crate::validate::validate(&workflow)),
        Err(errors) => Outcome::Errors(errors),
    };
    to_js(&result)
}

/// Validate a single node JSON. Returns a JSON array of `PlannerError` objects.
#[wasm_bindgen]
pub fn validate_node(node_json: &str) -> JsValue {
    let errors = match crate::parse::parse_node(node_json) {
        Ok(node) => crate::validate::validate_node(&node),
        Err(errors) => errors,
    };
    to_js(&errors)
}

/// Returns `{status: "success", result: bool}`, or `{status: "errors", result: [...]}`
/// if the JSON does not parse.
#[wasm_bindgen]
pub fn has_cycle(json: &str) -> JsValue {
    let result = match crate::parse::parse(json) {
        Ok(workflow) => Outcome::Success(crate::validate::has_cycle(&workflow)),
        Err(errors) => Outcome::Errors(errors),
    };
    to_js(&result)
}

/// Full dry run with the default cost model.
#[wasm_bindgen]
pub fn dry_run_workflow(json: &str) -> JsValue {
    to_js(&dry_run_inner(json, None))
}

/// Full dry run with a host-supplied cost model (partial JSON is filled
/// with defaults).
#[wasm_bindgen]
pub fn dry_run_workflow_with_costs(json: &str, costs_json: &str) -> JsValue {
    to_js(&dry_run_inner(json, Some(costs_json)))
}

fn dry_run_inner(json: &str, costs_json: Option<&str>) -> Outcome<DryRunReport> {
    let workflow = match crate::parse::parse(json) {
        Ok(w) => w,
        Err(errors) => return Outcome::Errors(errors),
    };

    let costs = match costs_json {
        Some(raw) => match serde_json::from_str::<CostModel>(raw) {
            Ok(c) => c,
            Err(e) => return Outcome::Errors(vec![ParseError::CostModel(e).into()]),
        },
        None => CostModel::default(),
    };

    Outcome::Success(crate::plan::dry_run_with(&workflow, &costs))
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

// ---------------------------------------------------------------------------
// Result envelope for JS
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(tag = "status", content = "result")]
enum Outcome<T> {
    #[serde(rename = "success")]
    Success(T),
    #[serde(rename = "errors")]
    Errors(Vec<PlannerError>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_envelope_shape() {
        let success = serde_json::to_value(Outcome::<bool>::Success(false)).unwrap();
        assert_eq!(success, serde_json::json!({"status": "success", "result": false}));

        let errors = serde_json::to_value(Outcome::<bool>::Errors(vec![PlannerError::parse(
            "P001", "bad",
        )]))
        .unwrap();
        assert_eq!(errors["status"], "errors");
        assert_eq!(errors["result"][0]["code"], "P001");
    }
}

use serde::{Deserialize, Serialize};
use uo_core::{ParameterMap, ParameterValue};

/// A declared step of a node's execution sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionStep {
    pub operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExecutionStep {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            condition: None,
            description: None,
        }
    }

    pub fn when(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Whether `step` runs for the given parameters.
///
/// Only `<param> == <token>` is understood: both sides are trimmed and the
/// parameter is compared strictly against `true`, `false` or the token as a
/// string. Missing conditions and any other shape leave the step active.
pub fn evaluate_step_condition(step: &ExecutionStep, parameters: &ParameterMap) -> bool {
    let Some(condition) = step.condition.as_deref() else {
        return true;
    };

    match split_equality(condition) {
        Some((name, expected)) => parameters.get(name) == Some(&expected),
        None => {
            tracing::trace!(condition, "step condition is not an equality, keeping step");
            true
        }
    }
}

fn split_equality(condition: &str) -> Option<(&str, ParameterValue)> {
    let mut parts = condition.split(" == ");
    let (name, literal) = (parts.next()?.trim(), parts.next()?.trim());
    if parts.next().is_some() {
        return None;
    }
    let expected = match literal {
        "true" => ParameterValue::Bool(true),
        "false" => ParameterValue::Bool(false),
        token => ParameterValue::Text(token.to_string()),
    };
    Some((name, expected))
}

#[cfg(test)]
#[path = "condition_test.rs"]
mod tests;

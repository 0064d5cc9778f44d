use crate::documents::{
    ParameterDependencyRule, PrimitiveConfig, Primitives, UnitOperationDocument, ValueSource,
};
use uo_core::{ParameterValue, ValidationError, ValidationErrorKind};
use uo_expr::{ConditionContext, ConditionEvaluator, ExprValue};

/// Values visible to execution conditions and dependency rules.
///
/// Only enabled primitives contribute: `<id>.<output>` holds the latest
/// result (or null) and `<id>.<parameter>` the current value. Range values
/// are exposed as `<id>.<parameter>.start` and `.end`.
pub fn build_condition_context(primitives: &Primitives) -> ConditionContext {
    let mut context = ConditionContext::new();
    for (id, primitive) in primitives.iter().filter(|(_, primitive)| primitive.enabled) {
        for output in primitive.outputs.keys() {
            let key = format!("{id}.{output}");
            match primitive.results.get(output) {
                Some(result) => insert_value(&mut context, key, result),
                None => {
                    context.insert(key, ExprValue::Null);
                }
            }
        }
        for (parameter_id, parameter) in &primitive.parameters {
            insert_value(&mut context, format!("{id}.{parameter_id}"), &parameter.value);
        }
    }
    context
}

fn insert_value(context: &mut ConditionContext, key: String, value: &ParameterValue) {
    match value.to_expr_value() {
        Some(scalar) => {
            context.insert(key, scalar);
        }
        None => {
            if let Some((start, end)) = value.as_range() {
                context.insert(format!("{key}.start"), ExprValue::Number(start));
                context.insert(format!("{key}.end"), ExprValue::Number(end));
            }
        }
    }
}

/// Parameter-level checks local to one primitive.
pub fn validate_primitive(primitive_id: &str, primitive: &PrimitiveConfig) -> Vec<ValidationError> {
    primitive
        .parameters
        .iter()
        .filter_map(|(parameter_id, parameter)| {
            let (start, end) = parameter.value.as_range()?;
            (start >= end).then(|| {
                ValidationError::for_parameter(
                    parameter_id.as_str(),
                    "Invalid range: start value must be less than end value",
                )
                .with_primitive(primitive_id)
            })
        })
        .collect()
}

/// Checks each enabled primitive's execution condition against its siblings.
pub fn validate_cross_primitive_dependencies(primitives: &Primitives) -> Vec<ValidationError> {
    let context = build_condition_context(primitives);
    let mut evaluator = ConditionEvaluator::new();
    let mut errors = Vec::new();

    for (id, primitive) in primitives.iter().filter(|(_, primitive)| primitive.enabled) {
        let Some(condition) = &primitive.execution_condition else {
            continue;
        };

        let missing = condition
            .depends_on
            .iter()
            .filter(|dependency| {
                !primitives
                    .get(dependency.as_str())
                    .is_some_and(|primitive| primitive.enabled)
            })
            .map(String::as_str)
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            errors.push(
                ValidationError::new(
                    ValidationErrorKind::Dependency,
                    format!("Required primitives not enabled: {}", missing.join(", ")),
                )
                .with_primitive(id.as_str()),
            );
            continue;
        }

        let expression = condition.expression.trim();
        if expression.is_empty() {
            continue;
        }
        let message = match evaluator.evaluate(expression, &context) {
            Ok(true) => continue,
            Ok(false) => format!("Execution condition not met: {expression}"),
            Err(err) => format!("Execution condition not met: {expression} ({err})"),
        };
        errors.push(
            ValidationError::new(ValidationErrorKind::ConditionUnmet, message)
                .with_primitive(id.as_str()),
        );
    }

    errors
}

pub fn validate_unit_operation_rules(document: &UnitOperationDocument) -> Vec<ValidationError> {
    let rules = &document.rules;
    let enabled = document.enabled_primitive_ids();
    let mut errors = Vec::new();

    if let Some(min) = rules.min_primitives {
        if enabled.len() < min {
            errors.push(ValidationError::new(
                ValidationErrorKind::UoValidation,
                format!("At least {min} primitives must be enabled"),
            ));
        }
    }

    for required in &rules.required_primitives {
        if !enabled.contains(&required.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UoValidation,
                format!("Required primitive \"{required}\" must be enabled"),
            ));
        }
    }

    for (first, second) in &rules.incompatible_primitives {
        if enabled.contains(&first.as_str()) && enabled.contains(&second.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UoValidation,
                format!("Primitives \"{first}\" and \"{second}\" cannot be enabled at the same time"),
            ));
        }
    }

    errors
}

/// Every check for a unit operation: UO rules, required inputs, primitive
/// parameters and execution conditions.
pub fn validate_node_data(document: &UnitOperationDocument) -> Vec<ValidationError> {
    let mut errors = validate_unit_operation_rules(document);

    for (id, primitive) in document.primitives.iter().filter(|(_, primitive)| primitive.enabled) {
        for (input, required) in &primitive.inputs {
            if !required {
                continue;
            }
            let provided = document
                .primitives
                .values()
                .any(|candidate| candidate.enabled && candidate.provides(input));
            if !provided {
                errors.push(
                    ValidationError::new(
                        ValidationErrorKind::Dependency,
                        format!("Required input \"{input}\" is not provided by any enabled primitive"),
                    )
                    .with_primitive(id.as_str()),
                );
            }
        }
        errors.extend(validate_primitive(id, primitive));
    }

    errors.extend(validate_cross_primitive_dependencies(&document.primitives));
    errors
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppliedRule {
    pub primitive_id: String,
    pub parameter_id: String,
    pub previous: f64,
    pub clamped: f64,
    pub message: Option<String>,
}

/// Clamps parameters named by rules whose condition currently holds.
///
/// Rules are applied in order against a context rebuilt after each clamp.
/// Rules that fail to evaluate or name an unknown or non-numeric parameter
/// are skipped.
pub fn apply_dependency_rules(
    rules: &[ParameterDependencyRule],
    primitives: &mut Primitives,
) -> Vec<AppliedRule> {
    let mut evaluator = ConditionEvaluator::new();
    let mut applied = Vec::new();

    for rule in rules {
        let context = build_condition_context(primitives);
        match evaluator.evaluate(&rule.condition, &context) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(err) => {
                tracing::warn!(condition = %rule.condition, error = %err, "skipping dependency rule");
                continue;
            }
        }

        let Some((primitive_id, parameter_id)) = rule.then.param.split_once('.') else {
            tracing::warn!(param = %rule.then.param, "dependency rule target must be `<primitive>.<parameter>`");
            continue;
        };
        let Some(parameter) = primitives
            .get_mut(primitive_id)
            .and_then(|primitive| primitive.parameters.get_mut(parameter_id))
        else {
            tracing::warn!(param = %rule.then.param, "dependency rule target not found");
            continue;
        };
        let Some(previous) = parameter.value.as_f64() else {
            continue;
        };

        let mut clamped = previous;
        if let Some(max) = rule.then.max {
            clamped = clamped.min(max);
        }
        if let Some(min) = rule.then.min {
            clamped = clamped.max(min);
        }
        if clamped == previous {
            continue;
        }

        parameter.value = ParameterValue::Number(clamped);
        parameter.source = ValueSource::Dependency;
        applied.push(AppliedRule {
            primitive_id: primitive_id.to_string(),
            parameter_id: parameter_id.to_string(),
            previous,
            clamped,
            message: rule.then.message.clone(),
        });
    }

    applied
}

#[cfg(test)]
#[path = "primitive_test.rs"]
mod tests;

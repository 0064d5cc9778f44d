use regex::Regex;
use uo_core::{
    default_parameters, ParameterDefinition, ParameterGroups, ParameterKind, ParameterMap,
    ParameterValue, ValidationError,
};

/// Checks one value against its definition and reports the first problem.
///
/// `value` is `None` when the parameter has neither a stored value nor a
/// default. Required fields treat `false`, `0` and `""` as missing.
pub fn validate_parameter(
    parameter_id: &str,
    definition: &ParameterDefinition,
    value: Option<&ParameterValue>,
) -> Option<ValidationError> {
    let label = definition.label.as_str();
    let fail = |message: String| Some(ValidationError::for_parameter(parameter_id, message));

    if definition.required && value.map_or(true, ParameterValue::is_blank) {
        return fail(format!("{label} is required"));
    }

    let value = match value {
        Some(ParameterValue::Text(text)) if text.is_empty() => return None,
        Some(value) => value,
        None => return None,
    };

    match definition.kind {
        ParameterKind::Number => {
            let Some(number) = value.coerce_f64().filter(|number| !number.is_nan()) else {
                return fail(format!("{label} must be a number"));
            };
            check_bounds(label, definition, number).and_then(fail)
        }
        ParameterKind::Boolean => match value {
            ParameterValue::Bool(_) => None,
            _ => fail(format!("{label} must be true or false")),
        },
        ParameterKind::Select => {
            if definition.options.is_empty() {
                return None;
            }
            let selected = value.to_string();
            if definition.options.iter().any(|option| option.value == selected) {
                return None;
            }
            let allowed = definition
                .options
                .iter()
                .map(|option| option.value.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            fail(format!("{label} must be one of: {allowed}"))
        }
        ParameterKind::String => {
            let Some(pattern) = definition.pattern.as_deref() else {
                return None;
            };
            match Regex::new(pattern) {
                Ok(regex) if regex.is_match(&value.to_string()) => None,
                Ok(_) => fail(format!("{label} does not match pattern {pattern}")),
                Err(_) => fail(format!("{label} has an invalid pattern {pattern}")),
            }
        }
        ParameterKind::Range => {
            let Some((start, end)) = value.as_range() else {
                return fail(format!("{label} must be a [start, end] range"));
            };
            if start >= end {
                return fail(format!("{label} start value must be less than end value"));
            }
            check_bounds(label, definition, start)
                .or_else(|| check_bounds(label, definition, end))
                .and_then(fail)
        }
    }
}

fn check_bounds(label: &str, definition: &ParameterDefinition, number: f64) -> Option<String> {
    if let Some(min) = definition.min {
        if number < min {
            return Some(format!("{label} must be at least {min}"));
        }
    }
    if let Some(max) = definition.max {
        if number > max {
            return Some(format!("{label} must be at most {max}"));
        }
    }
    None
}

/// Whether the definition's `dependsOn` guard currently admits it.
pub fn resolve_dependency(definition: &ParameterDefinition, parameters: &ParameterMap) -> bool {
    match &definition.depends_on {
        None => true,
        Some(guard) => guard.admits(parameters.get(&guard.parameter)),
    }
}

/// Declared defaults overlaid with the stored values. Stored values for
/// parameters the groups do not declare are kept.
pub fn effective_parameters(groups: &ParameterGroups, stored: &ParameterMap) -> ParameterMap {
    let mut parameters = default_parameters(groups);
    parameters.extend(stored.iter().map(|(id, value)| (id.clone(), value.clone())));
    parameters
}

/// Definitions whose guards hold, in declaration order, with the group id
/// each belongs to.
pub fn active_parameters<'a>(
    groups: &'a ParameterGroups,
    parameters: &ParameterMap,
) -> Vec<(&'a str, &'a str, &'a ParameterDefinition)> {
    groups
        .iter()
        .flat_map(|(group_id, group)| {
            group
                .parameters
                .iter()
                .map(move |(id, definition)| (group_id.as_str(), id.as_str(), definition))
        })
        .filter(|(_, _, definition)| resolve_dependency(definition, parameters))
        .collect()
}

/// Full re-scan of every active parameter using its effective value.
pub fn validate_parameter_groups(
    groups: &ParameterGroups,
    stored: &ParameterMap,
) -> Vec<ValidationError> {
    let parameters = effective_parameters(groups, stored);
    active_parameters(groups, &parameters)
        .into_iter()
        .filter_map(|(_, id, definition)| validate_parameter(id, definition, parameters.get(id)))
        .collect()
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;

use super::units::standardize_unit;
use crate::catalog::NodeDefinition;
use crate::planner::{build_execution_plan, PlannedStep};
use crate::validate::{effective_parameters, resolve_dependency};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uo_core::{
    fingerprint_hex, DependencyGuard, FingerprintOptions, ParameterKind, ParameterMap,
    ParameterValue, SelectOption,
};

pub const EXPORT_VERSION: &str = "1.0";

const FALLBACK_CATEGORY: &str = "SDL1";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    /// Plain effective values, for handing to an executor.
    #[default]
    Execution,
    /// Values with their definitions, units and group index.
    Full,
}

impl ExportMode {
    pub fn format_name(self) -> &'static str {
        match self {
            Self::Execution => "SDL1_Execution",
            Self::Full => "SDL1_Enhanced",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub mode: ExportMode,
    pub node_id: Option<String>,
    /// Caller-supplied timestamp; left out of the fingerprint.
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterRules {
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub data_type: ParameterKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ParameterValue>,
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_with_unit: Option<String>,
    #[serde(rename = "type")]
    pub kind: ParameterKind,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<DependencyGuard>,
    pub group: String,
    pub group_label: String,
    pub validation: ParameterRules,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExportedParameter {
    Value(ParameterValue),
    Full(Box<FullParameter>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupIndex {
    pub label: String,
    pub parameter_keys: Vec<String>,
}

/// Loop or break expression handed through to the sequencer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionBlock {
    #[serde(rename = "type")]
    pub kind: String,
    pub expr: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_interval: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub version: String,
    pub format: String,
    pub export_type: ExportMode,
    pub total_parameters: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_parameters: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeExport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    pub node_type: String,
    pub label: String,
    pub description: String,
    pub category: String,
    pub primitive_operations: Vec<String>,
    pub execution_steps: Vec<PlannedStep>,
    pub total_estimated_duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loop_condition: Option<ConditionBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_condition: Option<ConditionBlock>,
    pub parameters: IndexMap<String, ExportedParameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_groups: Option<IndexMap<String, GroupIndex>>,
    pub export_metadata: ExportMetadata,
    /// SHA-256 over the export without `exportMetadata` and itself.
    pub fingerprint: String,
}

/// Builds the export document of one configured node.
///
/// Every declared parameter is listed, hidden ones included. The execution
/// plan is computed from effective values in both modes.
pub fn export_node(
    definition: &NodeDefinition,
    stored: &ParameterMap,
    options: &ExportOptions,
) -> Result<NodeExport, ExportError> {
    let effective = effective_parameters(&definition.parameter_groups, stored);
    let parameters = match options.mode {
        ExportMode::Execution => execution_parameters(definition, &effective),
        ExportMode::Full => full_parameters(definition, &effective),
    };
    let plan = build_execution_plan(&definition.primitive_operations, &effective);

    let required_parameters = (options.mode == ExportMode::Full).then(|| {
        definition
            .parameter_groups
            .values()
            .flat_map(|group| group.parameters.values())
            .filter(|parameter| parameter.required)
            .count()
    });
    let parameter_groups = (options.mode == ExportMode::Full).then(|| {
        definition
            .parameter_groups
            .iter()
            .map(|(id, group)| {
                (
                    id.clone(),
                    GroupIndex {
                        label: group.label.clone(),
                        parameter_keys: group.parameters.keys().cloned().collect(),
                    },
                )
            })
            .collect()
    });

    let loop_condition = active_text(definition, &effective, "loop_condition").map(|expr| ConditionBlock {
        kind: "expression".to_string(),
        description: format!("Loop while: {expr}"),
        max_iterations: Some(positive_number(&effective, "max_iterations").unwrap_or(100.0)),
        check_interval: None,
        expr,
    });
    let break_condition = active_text(definition, &effective, "break_condition").map(|expr| ConditionBlock {
        kind: "expression".to_string(),
        description: format!("Break when: {expr}"),
        max_iterations: None,
        check_interval: Some(positive_number(&effective, "check_interval").unwrap_or(1.0)),
        expr,
    });

    let category = if definition.category.is_empty() {
        FALLBACK_CATEGORY.to_string()
    } else {
        definition.category.clone()
    };

    let mut export = NodeExport {
        node_id: options.node_id.clone(),
        node_type: definition.node_type.clone(),
        label: definition.label.clone(),
        description: definition.description.clone(),
        category,
        primitive_operations: definition.primitive_operations.clone(),
        execution_steps: plan.steps,
        total_estimated_duration: plan.total_estimated_duration,
        loop_condition,
        break_condition,
        export_metadata: ExportMetadata {
            timestamp: options.timestamp.clone(),
            version: EXPORT_VERSION.to_string(),
            format: options.mode.format_name().to_string(),
            export_type: options.mode,
            total_parameters: parameters.len(),
            required_parameters,
        },
        parameters,
        parameter_groups,
        fingerprint: String::new(),
    };

    let value = serde_json::to_value(&export)?;
    export.fingerprint = fingerprint_hex(
        &value,
        &FingerprintOptions::ignoring(["exportMetadata", "fingerprint"]),
    )?;
    tracing::debug!(
        node_type = %export.node_type,
        mode = ?options.mode,
        parameters = export.export_metadata.total_parameters,
        "exported node"
    );
    Ok(export)
}

fn execution_parameters(
    definition: &NodeDefinition,
    effective: &ParameterMap,
) -> IndexMap<String, ExportedParameter> {
    definition
        .parameter_groups
        .values()
        .flat_map(|group| group.parameters.keys())
        .filter_map(|id| {
            effective
                .get(id)
                .map(|value| (id.clone(), ExportedParameter::Value(value.clone())))
        })
        .collect()
}

fn full_parameters(
    definition: &NodeDefinition,
    effective: &ParameterMap,
) -> IndexMap<String, ExportedParameter> {
    let mut parameters = IndexMap::new();
    for (group_id, group) in &definition.parameter_groups {
        for (id, parameter) in &group.parameters {
            let value = effective.get(id).cloned();
            let numeric_unit = parameter
                .unit
                .as_deref()
                .filter(|_| parameter.kind == ParameterKind::Number)
                .map(standardize_unit);
            let unit = numeric_unit.or(parameter.unit.as_deref()).map(str::to_string);
            let value_with_unit = numeric_unit
                .zip(value.as_ref())
                .map(|(unit, value)| format!("{value}_{unit}"));

            let entry = FullParameter {
                value,
                unit,
                value_with_unit,
                kind: parameter.kind,
                label: parameter.label.clone(),
                description: parameter.description.clone(),
                required: parameter.required,
                min: parameter.min,
                max: parameter.max,
                step: parameter.step,
                options: parameter.options.clone(),
                depends_on: parameter.depends_on.clone(),
                group: group_id.clone(),
                group_label: group.label.clone(),
                validation: ParameterRules {
                    required: parameter.required,
                    min: parameter.min,
                    max: parameter.max,
                    data_type: parameter.kind,
                },
            };
            parameters.insert(id.clone(), ExportedParameter::Full(Box::new(entry)));
        }
    }
    parameters
}

/// Text of `id` when it is set and, if declared, currently visible.
fn active_text(definition: &NodeDefinition, effective: &ParameterMap, id: &str) -> Option<String> {
    let value = effective.get(id).filter(|value| !value.is_blank())?;
    if let Some((_, parameter)) = definition.find_parameter(id) {
        if !resolve_dependency(parameter, effective) {
            return None;
        }
    }
    Some(value.to_string())
}

fn positive_number(effective: &ParameterMap, id: &str) -> Option<f64> {
    effective
        .get(id)
        .and_then(ParameterValue::coerce_f64)
        .filter(|number| *number != 0.0 && !number.is_nan())
}

#[cfg(test)]
#[path = "node_test.rs"]
mod tests;

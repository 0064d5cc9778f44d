use super::summary::markdown_summary;
use crate::documents::{PrimitiveConfig, UnitOperationDocument, ValueSource};
use crate::validate::{apply_dependency_rules, validate_node_data, AppliedRule};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uo_core::{ParameterMap, ParameterValue, ValidationError};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StateError {
    #[error("unknown primitive `{0}`")]
    UnknownPrimitive(String),
    #[error("primitive `{primitive_id}` has no parameter `{parameter_id}`")]
    UnknownParameter {
        primitive_id: String,
        parameter_id: String,
    },
    #[error("node type `{node_type}` declares no parameter `{parameter_id}`")]
    UnknownNodeParameter {
        node_type: String,
        parameter_id: String,
    },
}

/// Enabled primitives plus per-primitive parameter overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitOperationTemplate {
    pub enabled_primitives: Vec<String>,
    #[serde(default)]
    pub parameters: BTreeMap<String, ParameterMap>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UnitOperationAction {
    LoadData(UnitOperationDocument),
    TogglePrimitive {
        primitive_id: String,
        enabled: bool,
    },
    UpdateParameter {
        primitive_id: String,
        parameter_id: String,
        value: ParameterValue,
        source: ValueSource,
    },
    ResetPrimitive {
        primitive_id: String,
    },
    ResetAll,
    UpdateEnabledPrimitives {
        enabled: Vec<String>,
    },
    LoadTemplate(UnitOperationTemplate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    LoadData,
    TogglePrimitive,
    UpdateParameter,
    ResetPrimitive,
    ResetAll,
    UpdateEnabledPrimitives,
    LoadTemplate,
    DependencyRule,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLogEntry {
    pub sequence: u64,
    pub kind: ChangeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub detail: String,
}

/// Reducer state of one unit operation.
///
/// Every dispatched action re-applies the dependency rules and replaces the
/// validation list in the same step as the data change.
#[derive(Debug, Clone)]
pub struct UnitOperationState {
    data: UnitOperationDocument,
    validation_errors: Vec<ValidationError>,
    applied_rules: Vec<AppliedRule>,
    is_dirty: bool,
    change_log: Vec<ChangeLogEntry>,
    next_sequence: u64,
}

impl UnitOperationState {
    pub fn new(data: UnitOperationDocument) -> Self {
        let mut state = Self {
            data,
            validation_errors: Vec::new(),
            applied_rules: Vec::new(),
            is_dirty: false,
            change_log: Vec::new(),
            next_sequence: 1,
        };
        state.refresh();
        state
    }

    pub fn data(&self) -> &UnitOperationDocument {
        &self.data
    }

    pub fn validation_errors(&self) -> &[ValidationError] {
        &self.validation_errors
    }

    /// Clamps made by dependency rules during the latest dispatch.
    pub fn applied_rules(&self) -> &[AppliedRule] {
        &self.applied_rules
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn is_valid(&self) -> bool {
        self.validation_errors.is_empty()
    }

    pub fn change_log(&self) -> &[ChangeLogEntry] {
        &self.change_log
    }

    pub fn summary(&self) -> String {
        markdown_summary(&self.data, &self.validation_errors)
    }

    /// Marks the current data as persisted.
    pub fn mark_saved(&mut self) {
        self.is_dirty = false;
    }

    pub fn dispatch(&mut self, action: UnitOperationAction) -> Result<(), StateError> {
        match action {
            UnitOperationAction::LoadData(data) => {
                let detail = format!("loaded {} ({})", data.id, data.version);
                self.data = data;
                self.is_dirty = false;
                self.log(ChangeKind::LoadData, None, detail);
            }
            UnitOperationAction::TogglePrimitive {
                primitive_id,
                enabled,
            } => {
                let primitive = self
                    .data
                    .primitives
                    .get_mut(&primitive_id)
                    .ok_or_else(|| StateError::UnknownPrimitive(primitive_id.clone()))?;
                primitive.enabled = enabled;
                self.is_dirty = true;
                let detail = if enabled { "enabled" } else { "disabled" };
                self.log(ChangeKind::TogglePrimitive, Some(primitive_id), detail.to_string());
            }
            UnitOperationAction::UpdateParameter {
                primitive_id,
                parameter_id,
                value,
                source,
            } => {
                let parameter = self
                    .data
                    .primitives
                    .get_mut(&primitive_id)
                    .ok_or_else(|| StateError::UnknownPrimitive(primitive_id.clone()))?
                    .parameters
                    .get_mut(&parameter_id)
                    .ok_or_else(|| StateError::UnknownParameter {
                        primitive_id: primitive_id.clone(),
                        parameter_id: parameter_id.clone(),
                    })?;
                let detail = format!("{} -> {value}", parameter.value);
                parameter.value = value;
                parameter.source = source;
                self.is_dirty = true;
                self.log(
                    ChangeKind::UpdateParameter,
                    Some(format!("{primitive_id}.{parameter_id}")),
                    detail,
                );
            }
            UnitOperationAction::ResetPrimitive { primitive_id } => {
                let primitive = self
                    .data
                    .primitives
                    .get_mut(&primitive_id)
                    .ok_or_else(|| StateError::UnknownPrimitive(primitive_id.clone()))?;
                reset_primitive(primitive);
                self.is_dirty = true;
                self.log(ChangeKind::ResetPrimitive, Some(primitive_id), "reset to defaults".to_string());
            }
            UnitOperationAction::ResetAll => {
                self.data.primitives.values_mut().for_each(reset_primitive);
                self.is_dirty = true;
                self.log(ChangeKind::ResetAll, None, "reset all primitives".to_string());
            }
            UnitOperationAction::UpdateEnabledPrimitives { enabled } => {
                for id in &enabled {
                    if !self.data.primitives.contains_key(id) {
                        tracing::warn!(primitive_id = %id, "ignoring unknown primitive in enabled list");
                    }
                }
                for (id, primitive) in self.data.primitives.iter_mut() {
                    primitive.enabled = enabled.contains(id);
                }
                self.is_dirty = true;
                self.log(ChangeKind::UpdateEnabledPrimitives, None, enabled.join(", "));
            }
            UnitOperationAction::LoadTemplate(template) => {
                for (id, primitive) in self.data.primitives.iter_mut() {
                    primitive.enabled = template.enabled_primitives.contains(id);
                    let overrides = template.parameters.get(id);
                    for (parameter_id, parameter) in primitive.parameters.iter_mut() {
                        match overrides.and_then(|values| values.get(parameter_id)) {
                            Some(value) => {
                                parameter.value = value.clone();
                                parameter.source = ValueSource::Template;
                            }
                            None => {
                                if let Some(default) = &parameter.default_value {
                                    parameter.value = default.clone();
                                }
                                parameter.source = ValueSource::Default;
                            }
                        }
                    }
                }
                self.is_dirty = true;
                self.log(
                    ChangeKind::LoadTemplate,
                    None,
                    template.enabled_primitives.join(", "),
                );
            }
        }

        self.refresh();
        Ok(())
    }

    fn refresh(&mut self) {
        self.applied_rules = apply_dependency_rules(&self.data.dependency_rules, &mut self.data.primitives);
        for rule in self.applied_rules.clone() {
            let detail = rule
                .message
                .clone()
                .unwrap_or_else(|| format!("{} -> {}", rule.previous, rule.clamped));
            self.log(
                ChangeKind::DependencyRule,
                Some(format!("{}.{}", rule.primitive_id, rule.parameter_id)),
                detail,
            );
        }
        self.validation_errors = validate_node_data(&self.data);
        tracing::debug!(
            unit_operation = %self.data.id,
            errors = self.validation_errors.len(),
            clamped = self.applied_rules.len(),
            "revalidated unit operation"
        );
    }

    fn log(&mut self, kind: ChangeKind, target: Option<String>, detail: String) {
        tracing::info!(?kind, target = target.as_deref().unwrap_or("-"), %detail, "unit operation change");
        self.change_log.push(ChangeLogEntry {
            sequence: self.next_sequence,
            kind,
            target,
            detail,
        });
        self.next_sequence += 1;
    }
}

fn reset_primitive(primitive: &mut PrimitiveConfig) {
    primitive.enabled = false;
    for parameter in primitive.parameters.values_mut() {
        if let Some(default) = &parameter.default_value {
            parameter.value = default.clone();
        }
        parameter.source = ValueSource::Default;
    }
}

#[cfg(test)]
#[path = "unit_operation_test.rs"]
mod tests;

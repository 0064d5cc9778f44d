use super::unit_operation::StateError;
use crate::catalog::NodeDefinition;
use crate::documents::NodeDocument;
use crate::planner::{build_execution_plan, preview_steps, ExecutionPlan, ExecutionPreview};
use crate::validate::{active_parameters, effective_parameters, validate_parameter_groups};
use uo_core::{ParameterDefinition, ParameterMap, ParameterValue, ValidationError};

/// Form state of one node instance over its catalog definition.
///
/// Values of parameters hidden by a guard are kept; they are only left out
/// of validation and of the visible list.
#[derive(Debug, Clone)]
pub struct NodeFormState {
    definition: NodeDefinition,
    parameters: ParameterMap,
    validation_errors: Vec<ValidationError>,
    is_dirty: bool,
}

impl NodeFormState {
    /// Defaults overridden by `stored`.
    pub fn new(definition: NodeDefinition, stored: &ParameterMap) -> Self {
        let parameters = effective_parameters(&definition.parameter_groups, stored);
        let validation_errors = validate_parameter_groups(&definition.parameter_groups, &parameters);
        Self {
            definition,
            parameters,
            validation_errors,
            is_dirty: false,
        }
    }

    pub fn from_document(definition: NodeDefinition, document: &NodeDocument) -> Self {
        Self::new(definition, &document.parameters)
    }

    pub fn definition(&self) -> &NodeDefinition {
        &self.definition
    }

    pub fn parameters(&self) -> &ParameterMap {
        &self.parameters
    }

    pub fn validation_errors(&self) -> &[ValidationError] {
        &self.validation_errors
    }

    pub fn is_valid(&self) -> bool {
        self.validation_errors.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn set_parameter(
        &mut self,
        parameter_id: &str,
        value: impl Into<ParameterValue>,
    ) -> Result<(), StateError> {
        if self.definition.find_parameter(parameter_id).is_none() {
            return Err(StateError::UnknownNodeParameter {
                node_type: self.definition.node_type.clone(),
                parameter_id: parameter_id.to_string(),
            });
        }
        let value = value.into();
        tracing::debug!(node_type = %self.definition.node_type, parameter_id, %value, "set node parameter");
        self.parameters.insert(parameter_id.to_string(), value);
        self.is_dirty = true;
        self.revalidate();
        Ok(())
    }

    /// Back to the declared defaults.
    pub fn reset(&mut self) {
        self.parameters = self.definition.defaults();
        self.is_dirty = true;
        self.revalidate();
    }

    /// Parameters whose guards currently hold, as `(group, id, definition)`.
    pub fn visible_parameters(&self) -> Vec<(&str, &str, &ParameterDefinition)> {
        active_parameters(&self.definition.parameter_groups, &self.parameters)
    }

    pub fn execution_plan(&self) -> ExecutionPlan {
        build_execution_plan(&self.definition.primitive_operations, &self.parameters)
    }

    pub fn preview(&self) -> ExecutionPreview {
        preview_steps(&self.definition.execution_steps, &self.parameters)
    }

    pub fn to_document(&self) -> NodeDocument {
        NodeDocument::new(self.definition.node_type.clone(), self.parameters.clone())
    }

    fn revalidate(&mut self) {
        self.validation_errors = validate_parameter_groups(&self.definition.parameter_groups, &self.parameters);
    }
}

#[cfg(test)]
#[path = "node_form_test.rs"]
mod tests;

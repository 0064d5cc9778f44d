use crate::planner::ExecutionStep;
use serde::{Deserialize, Serialize};
use uo_core::{default_parameters, ParameterDefinition, ParameterGroups, ParameterMap};

/// Configuration of one node type, consumed by the generic form engine,
/// the planner and the exporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDefinition {
    pub node_type: String,
    pub label: String,
    pub category: String,
    pub description: String,
    pub parameter_groups: ParameterGroups,
    #[serde(default)]
    pub primitive_operations: Vec<String>,
    #[serde(default)]
    pub execution_steps: Vec<ExecutionStep>,
    #[serde(default)]
    pub custom: bool,
}

impl NodeDefinition {
    pub fn new(
        node_type: impl Into<String>,
        label: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            node_type: node_type.into(),
            label: label.into(),
            category: category.into(),
            description: description.into(),
            parameter_groups: ParameterGroups::new(),
            primitive_operations: Vec::new(),
            execution_steps: Vec::new(),
            custom: false,
        }
    }

    pub fn defaults(&self) -> ParameterMap {
        default_parameters(&self.parameter_groups)
    }

    /// Group id and definition of `parameter_id`, if declared.
    pub fn find_parameter(&self, parameter_id: &str) -> Option<(&str, &ParameterDefinition)> {
        self.parameter_groups.iter().find_map(|(group_id, group)| {
            group
                .parameters
                .get(parameter_id)
                .map(|definition| (group_id.as_str(), definition))
        })
    }

    pub fn parameter_count(&self) -> usize {
        self.parameter_groups
            .values()
            .map(|group| group.parameters.len())
            .sum()
    }
}

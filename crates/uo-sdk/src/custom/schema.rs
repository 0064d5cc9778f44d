use crate::catalog::NodeDefinition;
use serde::{Deserialize, Serialize};
use uo_core::{ParameterDefinition, ParameterGroup, ParameterKind, ParameterValue, SelectOption};

/// Category used when a custom schema leaves its own blank.
pub const CUSTOM_CATEGORY: &str = "custom";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomParameterKind {
    String,
    Number,
    Boolean,
    Date,
    Enum,
    Range,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomParameter {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CustomParameterKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<ParameterValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<CustomValidation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A user-built unit operation as produced by the builder.
///
/// `id`, `name` and `description` default to empty so that incomplete
/// entries decode and can be reported instead of failing the whole file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomUoSchema {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub parameters: Vec<CustomParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

impl CustomUoSchema {
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            category: CUSTOM_CATEGORY.to_string(),
            parameters: Vec::new(),
            created_at: None,
            version: default_version(),
        }
    }

    pub fn parameter(mut self, parameter: CustomParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn has_required_fields(&self) -> bool {
        !self.id.trim().is_empty() && !self.name.trim().is_empty() && !self.description.trim().is_empty()
    }

    /// Catalog entry with every parameter in a single group.
    pub fn to_node_definition(&self) -> NodeDefinition {
        let category = if self.category.trim().is_empty() {
            CUSTOM_CATEGORY
        } else {
            self.category.as_str()
        };
        let mut node = NodeDefinition::new(&self.id, &self.name, category, &self.description);
        node.custom = true;

        let group = self
            .parameters
            .iter()
            .fold(ParameterGroup::new("Parameters"), |group, parameter| {
                group.with(parameter.id.clone(), parameter.to_definition())
            });
        node.parameter_groups.insert("parameters".to_string(), group);
        node
    }
}

impl CustomParameter {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: CustomParameterKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            required: false,
            default_value: None,
            validation: None,
            unit: None,
            description: None,
        }
    }

    /// Dates are kept as text; enums become selects over their options.
    pub fn to_definition(&self) -> ParameterDefinition {
        let validation = self.validation.clone().unwrap_or_default();
        let kind = match self.kind {
            CustomParameterKind::String | CustomParameterKind::Date => ParameterKind::String,
            CustomParameterKind::Number => ParameterKind::Number,
            CustomParameterKind::Boolean => ParameterKind::Boolean,
            CustomParameterKind::Enum => ParameterKind::Select,
            CustomParameterKind::Range => ParameterKind::Range,
        };

        let mut definition = ParameterDefinition::new(kind, &self.name);
        definition.description = self.description.clone();
        definition.default_value = self.default_value.clone();
        definition.required = self.required;
        definition.unit = self.unit.clone();
        definition.min = validation.min;
        definition.max = validation.max;
        definition.pattern = validation.pattern;
        if kind == ParameterKind::Select {
            definition.options = validation.options.into_iter().map(SelectOption::plain).collect();
        }
        definition
    }
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;

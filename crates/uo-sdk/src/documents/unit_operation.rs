use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uo_core::ParameterValue;

pub const UNIT_OPERATION_DOCUMENT_SCHEMA: &str = "uo-unit-operation/0.1";

/// Primitives of a unit operation in declaration order, keyed by primitive id.
pub type Primitives = IndexMap<String, PrimitiveConfig>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    #[default]
    Default,
    User,
    Template,
    Dependency,
    Inferred,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimitiveParameter {
    pub value: ParameterValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<ParameterValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default)]
    pub source: ValueSource,
}

impl PrimitiveParameter {
    pub fn new(value: impl Into<ParameterValue>) -> Self {
        let value = value.into();
        Self {
            default_value: Some(value.clone()),
            value,
            unit: None,
            source: ValueSource::Default,
        }
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// Gate on other primitives: every id in `depends_on` must be enabled and
/// `expression` must hold over their outputs and parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionCondition {
    #[serde(alias = "enabled_if")]
    pub expression: String,
    #[serde(default)]
    pub depends_on: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimitiveConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    /// Input name -> whether the input is required.
    #[serde(default)]
    pub inputs: BTreeMap<String, bool>,
    /// Output name -> whether the primitive produces it.
    #[serde(default)]
    pub outputs: BTreeMap<String, bool>,
    /// Latest results reported by an execution, keyed by output name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub results: BTreeMap<String, ParameterValue>,
    #[serde(default)]
    pub parameters: IndexMap<String, PrimitiveParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_condition: Option<ExecutionCondition>,
}

impl PrimitiveConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            enabled: false,
            inputs: BTreeMap::new(),
            outputs: BTreeMap::new(),
            results: BTreeMap::new(),
            parameters: IndexMap::new(),
            execution_condition: None,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn input(mut self, name: impl Into<String>, required: bool) -> Self {
        self.inputs.insert(name.into(), required);
        self
    }

    pub fn output(mut self, name: impl Into<String>) -> Self {
        self.outputs.insert(name.into(), true);
        self
    }

    pub fn parameter(mut self, id: impl Into<String>, parameter: PrimitiveParameter) -> Self {
        self.parameters.insert(id.into(), parameter);
        self
    }

    pub fn condition<I, S>(mut self, expression: impl Into<String>, depends_on: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.execution_condition = Some(ExecutionCondition {
            expression: expression.into(),
            depends_on: depends_on.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn provides(&self, output: &str) -> bool {
        self.outputs.get(output).copied().unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitOperationRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_primitives: Option<usize>,
    #[serde(default)]
    pub required_primitives: Vec<String>,
    #[serde(default)]
    pub incompatible_primitives: Vec<(String, String)>,
}

/// Clamp applied to `param` (`<primitiveId>.<parameterId>`) while the rule
/// condition holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEffect {
    pub param: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDependencyRule {
    #[serde(rename = "if")]
    pub condition: String,
    pub then: RuleEffect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UnitOperationDocument {
    pub schema: String,
    pub id: String,
    pub label: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    pub primitives: Primitives,
    #[serde(default)]
    pub rules: UnitOperationRules,
    #[serde(default)]
    pub dependency_rules: Vec<ParameterDependencyRule>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl UnitOperationDocument {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            schema: UNIT_OPERATION_DOCUMENT_SCHEMA.to_string(),
            id: id.into(),
            label: label.into(),
            version: default_version(),
            description: None,
            created: None,
            primitives: Primitives::new(),
            rules: UnitOperationRules::default(),
            dependency_rules: Vec::new(),
        }
    }

    pub fn primitive(mut self, id: impl Into<String>, primitive: PrimitiveConfig) -> Self {
        self.primitives.insert(id.into(), primitive);
        self
    }

    pub fn enabled_primitive_ids(&self) -> Vec<&str> {
        self.primitives
            .iter()
            .filter(|(_, primitive)| primitive.enabled)
            .map(|(id, _)| id.as_str())
            .collect()
    }
}

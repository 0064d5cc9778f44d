use crate::value::{ParameterMap, ParameterValue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    Number,
    String,
    Boolean,
    Select,
    Range,
}

impl ParameterKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Select => "select",
            Self::Range => "range",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Option whose label is the value itself.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GuardError {
    #[error("dependsOn `{0}` must set exactly one of `value` or `values`")]
    AmbiguousValues(String),
    #[error("dependsOn `{0}` lists no values")]
    EmptyValues(String),
}

/// Visibility guard: the guarded parameter is active iff `parameter`
/// currently holds one of `values`.
///
/// Both the single `{parameter, value}` form and the list
/// `{parameter, values}` form are accepted on input; output always uses the
/// list form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDependencyGuard")]
pub struct DependencyGuard {
    pub parameter: String,
    pub values: Vec<ParameterValue>,
}

#[derive(Deserialize)]
struct RawDependencyGuard {
    parameter: String,
    #[serde(default)]
    value: Option<ParameterValue>,
    #[serde(default)]
    values: Option<Vec<ParameterValue>>,
}

impl TryFrom<RawDependencyGuard> for DependencyGuard {
    type Error = GuardError;

    fn try_from(raw: RawDependencyGuard) -> Result<Self, Self::Error> {
        let values = match (raw.value, raw.values) {
            (Some(value), None) => vec![value],
            (None, Some(values)) if values.is_empty() => {
                return Err(GuardError::EmptyValues(raw.parameter))
            }
            (None, Some(values)) => values,
            _ => return Err(GuardError::AmbiguousValues(raw.parameter)),
        };
        Ok(Self {
            parameter: raw.parameter,
            values,
        })
    }
}

impl DependencyGuard {
    pub fn equals(parameter: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        Self {
            parameter: parameter.into(),
            values: vec![value.into()],
        }
    }

    pub fn one_of<V: Into<ParameterValue>>(
        parameter: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self {
            parameter: parameter.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// A missing guard parameter never satisfies the guard.
    pub fn admits(&self, current: Option<&ParameterValue>) -> bool {
        current.is_some_and(|current| self.values.iter().any(|value| value == current))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDefinition {
    #[serde(rename = "type")]
    pub kind: ParameterKind,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<ParameterValue>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<DependencyGuard>,
}

impl ParameterDefinition {
    pub fn new(kind: ParameterKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            description: None,
            default_value: None,
            required: false,
            min: None,
            max: None,
            step: None,
            unit: None,
            options: Vec::new(),
            pattern: None,
            read_only: false,
            depends_on: None,
        }
    }

    pub fn number(label: impl Into<String>) -> Self {
        Self::new(ParameterKind::Number, label)
    }

    pub fn text(label: impl Into<String>) -> Self {
        Self::new(ParameterKind::String, label)
    }

    pub fn boolean(label: impl Into<String>) -> Self {
        Self::new(ParameterKind::Boolean, label)
    }

    pub fn range(label: impl Into<String>) -> Self {
        Self::new(ParameterKind::Range, label)
    }

    pub fn select(label: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            options,
            ..Self::new(ParameterKind::Select, label)
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<ParameterValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn bounds(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn depends_on(mut self, guard: DependencyGuard) -> Self {
        self.depends_on = Some(guard);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterGroup {
    pub label: String,
    pub parameters: IndexMap<String, ParameterDefinition>,
}

/// Groups keep declaration order; it is the presentation and export order.
pub type ParameterGroups = IndexMap<String, ParameterGroup>;

impl ParameterGroup {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            parameters: IndexMap::new(),
        }
    }

    pub fn with(mut self, id: impl Into<String>, definition: ParameterDefinition) -> Self {
        self.parameters.insert(id.into(), definition);
        self
    }
}

/// Every declared default, keyed by parameter id.
pub fn default_parameters(groups: &ParameterGroups) -> ParameterMap {
    groups
        .values()
        .flat_map(|group| group.parameters.iter())
        .filter_map(|(id, definition)| {
            definition
                .default_value
                .clone()
                .map(|value| (id.clone(), value))
        })
        .collect()
}

#[cfg(test)]
#[path = "definition_test.rs"]
mod tests;

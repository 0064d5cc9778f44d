use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use uo_expr::ExprValue;

/// Parameter bag of a node or primitive, keyed by parameter id.
pub type ParameterMap = BTreeMap<String, ParameterValue>;

/// A scalar parameter value or a `[start, end]` numeric range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Range([f64; 2]),
}

impl ParameterValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<(f64, f64)> {
        match self {
            Self::Range([start, end]) => Some((*start, *end)),
            _ => None,
        }
    }

    /// Falsy in the form-field sense: `false`, `0`, `NaN` and the empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Bool(value) => !value,
            Self::Number(value) => *value == 0.0 || value.is_nan(),
            Self::Text(value) => value.is_empty(),
            Self::Range(_) => false,
        }
    }

    /// Numeric reading of the value; numeric strings are accepted the way a
    /// text input hands them over.
    pub fn coerce_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(value) => value.trim().parse::<f64>().ok(),
            Self::Bool(_) | Self::Range(_) => None,
        }
    }

    /// Condition-grammar view of a scalar value. Ranges are exposed through
    /// their `.start` / `.end` sub-paths instead.
    pub fn to_expr_value(&self) -> Option<ExprValue> {
        match self {
            Self::Bool(value) => Some(ExprValue::Bool(*value)),
            Self::Number(value) => Some(ExprValue::Number(*value)),
            Self::Text(value) => Some(ExprValue::String(value.clone())),
            Self::Range(_) => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
            Self::Range(_) => "range",
        }
    }
}

impl Display for ParameterValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
            Self::Range([start, end]) => write!(f, "[{start}, {end}]"),
        }
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for ParameterValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<[f64; 2]> for ParameterValue {
    fn from(value: [f64; 2]) -> Self {
        Self::Range(value)
    }
}

#[cfg(test)]
#[path = "value_test.rs"]
mod tests;

use crate::field_path::FieldPath;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationErrorKind {
    Dependency,
    ConditionUnmet,
    ParameterValidation,
    UoValidation,
}

impl ValidationErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dependency => "DEPENDENCY",
            Self::ConditionUnmet => "CONDITION_UNMET",
            Self::ParameterValidation => "PARAMETER_VALIDATION",
            Self::UoValidation => "UO_VALIDATION",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primitive_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: ValidationErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            primitive_id: None,
            parameter_id: None,
            kind,
            message: message.into(),
        }
    }

    pub fn for_parameter(parameter_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::ParameterValidation, message).with_parameter(parameter_id)
    }

    pub fn with_primitive(mut self, primitive_id: impl Into<String>) -> Self {
        self.primitive_id = Some(primitive_id.into());
        self
    }

    pub fn with_parameter(mut self, parameter_id: impl Into<String>) -> Self {
        self.parameter_id = Some(parameter_id.into());
        self
    }

    pub fn sort_stable(errors: &mut [Self]) {
        errors.sort_by(|left, right| {
            (left.kind, &left.primitive_id, &left.parameter_id, &left.message).cmp(&(
                right.kind,
                &right.primitive_id,
                &right.parameter_id,
                &right.message,
            ))
        });
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.kind.as_str())?;
        if let Some(primitive_id) = &self.primitive_id {
            write!(f, " primitive={primitive_id}")?;
        }
        if let Some(parameter_id) = &self.parameter_id {
            write!(f, " parameter={parameter_id}")?;
        }
        write!(f, " {}", self.message)
    }
}

/// Problem found while loading a document or config file, located by
/// field path rather than by primitive/parameter id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentIssue {
    pub kind: String,
    pub field_path: FieldPath,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl DocumentIssue {
    pub fn new(
        kind: impl Into<String>,
        field_path: FieldPath,
        message: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            field_path,
            message: message.into(),
            reference: Some(reference.into()),
        }
    }

    pub fn parse_error(field_path: FieldPath, message: impl Into<String>, reference: &str) -> Self {
        Self::new("parse_error", field_path, message, reference)
    }

    pub fn sort_stable(issues: &mut [Self]) {
        issues.sort_by(|left, right| {
            (&left.kind, &left.field_path, &left.message).cmp(&(
                &right.kind,
                &right.field_path,
                &right.message,
            ))
        });
    }
}

impl Display for DocumentIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}: {}", self.kind, self.field_path, self.message)
    }
}

#[cfg(test)]
#[path = "issues_test.rs"]
mod tests;

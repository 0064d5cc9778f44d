use super::node::ExportMode;
use serde::Serialize;
use serde_json::{Map, Value};
use uo_core::{ParameterMap, ParameterValue};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Invalid JSON format: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid file format: missing parameters")]
    MissingParameters,
    #[error("No valid parameters found in import file")]
    Empty,
    #[error("parameter `{0}` does not hold a scalar or [start, end] value")]
    UnsupportedValue(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportFormat {
    /// Full export: each parameter carries its value under `value`.
    Enhanced,
    /// Plain `parameters` object of values.
    Legacy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportedParameters {
    pub format: ImportFormat,
    pub parameters: ParameterMap,
}

pub fn import_parameters_str(input: &str) -> Result<ImportedParameters, ImportError> {
    let document: Value = serde_json::from_str(input)?;
    import_parameters(&document)
}

/// Parameter values from an exported node document.
///
/// Enhanced entries without a `value` are skipped.
pub fn import_parameters(document: &Value) -> Result<ImportedParameters, ImportError> {
    let enhanced = document
        .pointer("/exportMetadata/format")
        .and_then(Value::as_str)
        == Some(ExportMode::Full.format_name());
    let entries = document
        .get("parameters")
        .and_then(Value::as_object);

    let (format, parameters) = if enhanced {
        let empty = Map::new();
        let parameters = entries
            .unwrap_or(&empty)
            .iter()
            .filter_map(|(id, entry)| {
                entry
                    .get("value")
                    .filter(|value| !value.is_null())
                    .map(|value| decode_value(id, value))
            })
            .collect::<Result<ParameterMap, _>>()?;
        (ImportFormat::Enhanced, parameters)
    } else {
        let entries = entries.ok_or(ImportError::MissingParameters)?;
        let parameters = entries
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(id, value)| decode_value(id, value))
            .collect::<Result<ParameterMap, _>>()?;
        (ImportFormat::Legacy, parameters)
    };

    if parameters.is_empty() {
        return Err(ImportError::Empty);
    }
    tracing::debug!(?format, count = parameters.len(), "imported node parameters");
    Ok(ImportedParameters { format, parameters })
}

fn decode_value(id: &str, value: &Value) -> Result<(String, ParameterValue), ImportError> {
    serde_json::from_value::<ParameterValue>(value.clone())
        .map(|decoded| (id.to_string(), decoded))
        .map_err(|_| ImportError::UnsupportedValue(id.to_string()))
}

#[cfg(test)]
#[path = "import_test.rs"]
mod tests;

mod json;
mod yaml;

use crate::documents::{
    NodeDocument, UnitOperationDocument, NODE_DOCUMENT_SCHEMA, UNIT_OPERATION_DOCUMENT_SCHEMA,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use uo_core::{DocumentIssue, FieldPath};

pub use json::parse_json;
pub use yaml::parse_yaml;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocumentFormat {
    #[default]
    Auto,
    Json,
    Yaml,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UoDocument {
    Node(NodeDocument),
    UnitOperation(UnitOperationDocument),
}

impl UoDocument {
    pub fn schema_id(&self) -> &'static str {
        match self {
            UoDocument::Node(_) => NODE_DOCUMENT_SCHEMA,
            UoDocument::UnitOperation(_) => UNIT_OPERATION_DOCUMENT_SCHEMA,
        }
    }
}

pub fn parse_document(input: &str) -> Result<UoDocument, Vec<DocumentIssue>> {
    parse_document_with_format(input, DocumentFormat::Auto)
}

pub fn parse_document_with_format(
    input: &str,
    format: DocumentFormat,
) -> Result<UoDocument, Vec<DocumentIssue>> {
    let value = parse_value(input, format)?;
    let schema_id = extract_schema_id(&value)?;

    let document = match schema_id.as_str() {
        NODE_DOCUMENT_SCHEMA => {
            UoDocument::Node(parse_typed_document::<NodeDocument>(value, &schema_id)?)
        }
        UNIT_OPERATION_DOCUMENT_SCHEMA => UoDocument::UnitOperation(parse_typed_document::<
            UnitOperationDocument,
        >(value, &schema_id)?),
        _ => {
            return Err(vec![DocumentIssue::parse_error(
                FieldPath::root().key("schema"),
                format!("unsupported document schema: {schema_id}"),
                "parse.unsupported_schema",
            )]);
        }
    };

    Ok(document)
}

/// Reads JSON or YAML into a JSON value without interpreting it.
pub fn parse_value(input: &str, format: DocumentFormat) -> Result<Value, Vec<DocumentIssue>> {
    match format {
        DocumentFormat::Auto => {
            if looks_like_json(input) {
                json::parse_json(input)
            } else {
                yaml::parse_yaml(input)
            }
        }
        DocumentFormat::Json => json::parse_json(input),
        DocumentFormat::Yaml => yaml::parse_yaml(input),
    }
}

fn looks_like_json(input: &str) -> bool {
    let trimmed = input.trim_start();
    trimmed.starts_with('{') || trimmed.starts_with('[')
}

fn extract_schema_id(value: &Value) -> Result<String, Vec<DocumentIssue>> {
    value
        .as_object()
        .and_then(|obj| obj.get("schema"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            vec![DocumentIssue::parse_error(
                FieldPath::root(),
                "document must contain string field `schema`",
                "parse.schema_required",
            )]
        })
}

fn parse_typed_document<T: DeserializeOwned>(
    value: Value,
    schema_id: &str,
) -> Result<T, Vec<DocumentIssue>> {
    serde_json::from_value::<T>(value).map_err(|err| {
        vec![DocumentIssue::parse_error(
            FieldPath::root(),
            format!("typed parse failed for schema {schema_id}: {err}"),
            "parse.typed_deserialize_error",
        )]
    })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

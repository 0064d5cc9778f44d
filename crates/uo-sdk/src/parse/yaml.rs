use serde_json::Value;
use uo_core::{DocumentIssue, FieldPath};

pub fn parse_yaml(input: &str) -> Result<Value, Vec<DocumentIssue>> {
    let yaml_value: serde_yaml::Value = serde_yaml::from_str(input).map_err(|err| {
        let message = err.to_string();
        let reference = if message.to_ascii_lowercase().contains("duplicate") {
            "yaml.duplicate_key"
        } else {
            "yaml.parse_error"
        };
        vec![DocumentIssue::parse_error(
            FieldPath::root(),
            format!("yaml parse failed: {message}"),
            reference,
        )]
    })?;

    serde_json::to_value(yaml_value).map_err(|err| {
        vec![DocumentIssue::parse_error(
            FieldPath::root(),
            format!("yaml-to-json conversion failed: {err}"),
            "yaml.to_json_error",
        )]
    })
}

use serde_json::Value;
use uo_core::{DocumentIssue, FieldPath};

pub fn parse_json(input: &str) -> Result<Value, Vec<DocumentIssue>> {
    serde_json::from_str::<Value>(input).map_err(|err| {
        vec![DocumentIssue::parse_error(
            FieldPath::root(),
            format!("json parse failed: {err}"),
            "json.parse_error",
        )]
    })
}

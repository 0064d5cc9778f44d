use serde::{Deserialize, Serialize};
use uo_core::ParameterMap;

pub const NODE_DOCUMENT_SCHEMA: &str = "uo-node/0.1";

/// Stored configuration of one catalog node: which node type it
/// instantiates and the values the user has set on top of its defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NodeDocument {
    pub schema: String,
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub parameters: ParameterMap,
}

impl NodeDocument {
    pub fn new(node_type: impl Into<String>, parameters: ParameterMap) -> Self {
        Self {
            schema: NODE_DOCUMENT_SCHEMA.to_string(),
            node_type: node_type.into(),
            node_id: None,
            label: None,
            parameters,
        }
    }
}

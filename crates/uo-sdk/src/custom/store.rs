use super::schema::CustomUoSchema;
use crate::catalog::{NodeCatalog, NodeDefinition};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub const CUSTOM_BUNDLE_VERSION: &str = "1.0.0";

#[derive(Debug, thiserror::Error)]
pub enum CustomStoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid schema: missing required fields")]
    MissingFields,
    #[error("A Unit Operation with the name \"{0}\" already exists")]
    DuplicateName(String),
    #[error("\"{0}\" is a built-in node type and cannot be used as a custom id")]
    ReservedId(String),
}

/// Portable bundle of every custom unit operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomExportBundle {
    #[serde(rename = "customUOs")]
    pub custom_uos: Vec<CustomUoSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CustomImportReport {
    pub imported: usize,
    pub errors: Vec<String>,
}

/// Custom unit operations persisted as one JSON object keyed by id.
#[derive(Debug)]
pub struct CustomUoStore {
    path: PathBuf,
    entries: IndexMap<String, CustomUoSchema>,
}

impl CustomUoStore {
    /// Opens the store at `path`; a missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CustomStoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            load_entries(&path)?
        } else {
            IndexMap::new()
        };
        tracing::debug!(path = %path.display(), count = entries.len(), "opened custom UO store");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-reads the backing file, discarding unsaved state.
    pub fn load(&mut self) -> Result<(), CustomStoreError> {
        self.entries = load_entries(&self.path)?;
        Ok(())
    }

    pub fn save(&self) -> Result<(), CustomStoreError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let encoded = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, encoded)?;
        tracing::debug!(path = %self.path.display(), count = self.entries.len(), "saved custom UO store");
        Ok(())
    }

    /// Adds `schema` and persists the store. Names are unique ignoring case.
    pub fn register(&mut self, schema: CustomUoSchema) -> Result<&CustomUoSchema, CustomStoreError> {
        if !schema.has_required_fields() {
            return Err(CustomStoreError::MissingFields);
        }
        if NodeCatalog::is_builtin(&schema.id) {
            return Err(CustomStoreError::ReservedId(schema.id));
        }
        let name = schema.name.to_lowercase();
        if self
            .entries
            .values()
            .any(|existing| existing.name.to_lowercase() == name)
        {
            return Err(CustomStoreError::DuplicateName(schema.name));
        }

        let id = schema.id.clone();
        self.entries.insert(id.clone(), schema);
        self.save()?;
        tracing::info!(id = %id, "registered custom unit operation");
        Ok(&self.entries[&id])
    }

    pub fn list(&self) -> impl Iterator<Item = &CustomUoSchema> {
        self.entries.values()
    }

    pub fn get(&self, id: &str) -> Option<&CustomUoSchema> {
        self.entries.get(id)
    }

    /// Returns whether an entry was removed; the file is rewritten only then.
    pub fn delete(&mut self, id: &str) -> Result<bool, CustomStoreError> {
        if self.entries.shift_remove(id).is_none() {
            return Ok(false);
        }
        self.save()?;
        tracing::info!(id, "deleted custom unit operation");
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn node_definitions(&self) -> Vec<NodeDefinition> {
        self.entries.values().map(CustomUoSchema::to_node_definition).collect()
    }

    pub fn export_bundle(&self, exported_at: Option<String>) -> CustomExportBundle {
        CustomExportBundle {
            custom_uos: self.entries.values().cloned().collect(),
            exported_at,
            version: CUSTOM_BUNDLE_VERSION.to_string(),
        }
    }

    /// Merges a bundle by id. Entries lacking id, name or description, and
    /// entries whose id is a built-in node type, are reported and skipped; a
    /// malformed document fails as a whole.
    pub fn import_bundle(&mut self, input: &str) -> Result<CustomImportReport, CustomStoreError> {
        let document: Value = serde_json::from_str(input)?;
        let mut report = CustomImportReport::default();

        let entries = document
            .get("customUOs")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        for entry in entries {
            let label = entry
                .get("name")
                .and_then(Value::as_str)
                .filter(|name| !name.is_empty())
                .unwrap_or("Unknown")
                .to_string();
            match serde_json::from_value::<CustomUoSchema>(entry) {
                Ok(schema) if NodeCatalog::is_builtin(&schema.id) => {
                    tracing::warn!(id = %schema.id, "skipping custom UO that shadows a built-in node type");
                    report.errors.push(format!("Reserved UO id: {}", schema.id));
                }
                Ok(schema) if schema.has_required_fields() => {
                    self.entries.insert(schema.id.clone(), schema);
                    report.imported += 1;
                }
                Ok(_) | Err(_) => report.errors.push(format!("Invalid UO: {label}")),
            }
        }

        self.save()?;
        tracing::info!(
            imported = report.imported,
            rejected = report.errors.len(),
            "imported custom unit operations"
        );
        Ok(report)
    }
}

fn load_entries(path: &Path) -> Result<IndexMap<String, CustomUoSchema>, CustomStoreError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

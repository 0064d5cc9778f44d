use crate::cli::{
    CatalogListCommand, CatalogShowCommand, CustomDeleteCommand, CustomExportCommand,
    CustomFileCommand, CustomListCommand, DocumentCommand, ExportCommand, ExportModeArg,
    ImportCommand, OutputFormat,
};
use crate::config::RunnerConfig;
use crate::io::{read_document, read_value, write_output};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use uo_core::{DocumentIssue, ValidationError};
use uo_sdk::{
    export_node, import_parameters, render_plan_text, render_preview_text, CatalogError,
    CustomStoreError, CustomUoSchema, CustomUoStore, ExportError, ExportMode, ExportOptions,
    ImportError, NodeCatalog, NodeDefinition, NodeDocument, NodeFormState, UnitOperationDocument,
    UnitOperationState, UoDocument,
};

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("read file failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("write file failed `{path}`: {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("document load failed: {}", render_issues(.0))]
    Document(Vec<DocumentIssue>),
    #[error("{command} requires a node document")]
    NodeDocumentRequired { command: &'static str },
    #[error("{command} requires a unit operation document")]
    UnitOperationDocumentRequired { command: &'static str },
    #[error("{0}")]
    ValidationFailed(String),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("custom UO store error: {0}")]
    Store(#[from] CustomStoreError),
    #[error("custom UO schema decode failed: {0}")]
    CustomSchemaDecode(String),
    #[error("custom UO `{0}` does not exist")]
    UnknownCustomUo(String),
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
    #[error("import failed: {0}")]
    Import(#[from] ImportError),
    #[error("import needs `--node-type` or a `nodeType` field in the file")]
    MissingNodeType,
    #[error("json encode failed: {0}")]
    JsonEncode(#[from] serde_json::Error),
}

/// Resolved runner settings shared by every command.
#[derive(Debug, Clone)]
pub struct RunContext {
    config: RunnerConfig,
    store_path: PathBuf,
}

impl RunContext {
    /// `store_override` (the `--store` flag) wins over the config's store path.
    pub fn new(config: RunnerConfig, store_override: Option<PathBuf>) -> Self {
        let store_path = store_override.unwrap_or_else(|| config.store_path.clone());
        Self { config, store_path }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    fn format(&self, requested: Option<OutputFormat>) -> OutputFormat {
        self.config.output_format(requested)
    }

    fn open_store(&self) -> Result<CustomUoStore, RunnerError> {
        Ok(CustomUoStore::open(&self.store_path)?)
    }

    /// Built-in node types followed by the store's custom ones.
    fn catalog(&self) -> Result<NodeCatalog, RunnerError> {
        let store = self.open_store()?;
        Ok(NodeCatalog::builtin().with_custom(store.node_definitions()))
    }
}

pub fn execute_validate(command: &DocumentCommand, context: &RunContext) -> Result<String, RunnerError> {
    let format = context.format(command.format);
    let report = match load_document(&command.file)? {
        UoDocument::Node(document) => {
            let form = node_form(&document, context)?;
            let errors = form.validation_errors().to_vec();
            tracing::info!(node_type = %document.node_type, errors = errors.len(), "validated node");
            ValidationReport {
                subject: format!("node {}", document.node_type),
                body: json!({
                    "document": "node",
                    "nodeType": document.node_type,
                    "valid": errors.is_empty(),
                    "errors": errors,
                }),
                notes: Vec::new(),
                errors,
            }
        }
        UoDocument::UnitOperation(document) => {
            let state = UnitOperationState::new(document);
            let errors = state.validation_errors().to_vec();
            let notes = state
                .applied_rules()
                .iter()
                .map(|rule| {
                    format!(
                        "rule clamped {}.{} from {} to {}",
                        rule.primitive_id, rule.parameter_id, rule.previous, rule.clamped
                    )
                })
                .collect::<Vec<_>>();
            tracing::info!(id = %state.data().id, errors = errors.len(), "validated unit operation");
            ValidationReport {
                subject: format!("unit operation {}", state.data().id),
                body: json!({
                    "document": "unit_operation",
                    "id": state.data().id,
                    "valid": errors.is_empty(),
                    "errors": errors,
                    "appliedRules": notes,
                }),
                notes,
                errors,
            }
        }
    };

    let rendered = match format {
        OutputFormat::Text => report.render_text(),
        OutputFormat::Json => serde_json::to_string_pretty(&report.body)?,
    };
    if report.errors.is_empty() {
        Ok(rendered)
    } else {
        Err(RunnerError::ValidationFailed(rendered))
    }
}

pub fn execute_plan(command: &DocumentCommand, context: &RunContext) -> Result<String, RunnerError> {
    let document = require_node(load_document(&command.file)?, "plan")?;
    let plan = node_form(&document, context)?.execution_plan();
    Ok(match context.format(command.format) {
        OutputFormat::Text => render_plan_text(&plan),
        OutputFormat::Json => serde_json::to_string_pretty(&plan)?,
    })
}

pub fn execute_preview(command: &DocumentCommand, context: &RunContext) -> Result<String, RunnerError> {
    let document = require_node(load_document(&command.file)?, "preview")?;
    let preview = node_form(&document, context)?.preview();
    Ok(match context.format(command.format) {
        OutputFormat::Text => render_preview_text(&preview),
        OutputFormat::Json => serde_json::to_string_pretty(&preview)?,
    })
}

pub fn execute_summary(command: &DocumentCommand, context: &RunContext) -> Result<String, RunnerError> {
    let document = require_unit_operation(load_document(&command.file)?, "summary")?;
    let state = UnitOperationState::new(document);
    Ok(match context.format(command.format) {
        OutputFormat::Text => state.summary(),
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "id": state.data().id,
            "enabledPrimitives": state.data().enabled_primitive_ids(),
            "valid": state.is_valid(),
            "errors": state.validation_errors(),
            "summary": state.summary(),
        }))?,
    })
}

pub fn execute_export(command: &ExportCommand, context: &RunContext) -> Result<String, RunnerError> {
    let document = require_node(load_document(&command.file)?, "export")?;
    let catalog = context.catalog()?;
    let definition = catalog.require(&document.node_type)?;
    let options = ExportOptions {
        mode: match command.mode {
            ExportModeArg::Execution => ExportMode::Execution,
            ExportModeArg::Full => ExportMode::Full,
        },
        node_id: command.node_id.clone().or(document.node_id),
        timestamp: command.timestamp.clone(),
    };
    let export = export_node(definition, &document.parameters, &options)?;
    tracing::info!(
        node_type = %export.node_type,
        format = %export.export_metadata.format,
        fingerprint = %export.fingerprint,
        "exported node"
    );
    let rendered = serde_json::to_string_pretty(&export)?;
    match &command.output {
        Some(path) => {
            write_file(path, &rendered)?;
            Ok(format!(
                "wrote {} export of {} to {} (fingerprint {})",
                export.export_metadata.format,
                export.node_type,
                path.display(),
                export.fingerprint
            ))
        }
        None => Ok(rendered),
    }
}

pub fn execute_import(command: &ImportCommand, context: &RunContext) -> Result<String, RunnerError> {
    let value = read_value(&command.file).map_err(RunnerError::Document)?;
    let imported = import_parameters(&value)?;
    let node_type = command
        .node_type
        .clone()
        .or_else(|| value.get("nodeType").and_then(Value::as_str).map(str::to_string))
        .ok_or(RunnerError::MissingNodeType)?;
    context.catalog()?.require(&node_type)?;

    let mut document = NodeDocument::new(node_type, imported.parameters);
    document.node_id = value.get("nodeId").and_then(Value::as_str).map(str::to_string);
    tracing::info!(
        node_type = %document.node_type,
        format = ?imported.format,
        parameters = document.parameters.len(),
        "imported node parameters"
    );
    let rendered = serde_json::to_string_pretty(&document)?;
    match &command.output {
        Some(path) => {
            write_file(path, &rendered)?;
            Ok(format!(
                "imported {} parameters for {} into {}",
                document.parameters.len(),
                document.node_type,
                path.display()
            ))
        }
        None => Ok(rendered),
    }
}

pub fn execute_catalog_list(command: &CatalogListCommand, context: &RunContext) -> Result<String, RunnerError> {
    let catalog = context.catalog()?;
    let nodes = catalog
        .list()
        .filter(|node| command.category.as_deref().map_or(true, |category| node.category == category))
        .collect::<Vec<_>>();
    Ok(match context.format(command.format) {
        OutputFormat::Text => nodes
            .iter()
            .map(|node| {
                let origin = if node.custom { "custom" } else { "builtin" };
                format!("{}\t{}\t{}\t{origin}", node.node_type, node.category, node.label)
            })
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => serde_json::to_string_pretty(
            &nodes
                .iter()
                .map(|node| {
                    json!({
                        "nodeType": node.node_type,
                        "label": node.label,
                        "category": node.category,
                        "custom": node.custom,
                        "parameterCount": node.parameter_count(),
                    })
                })
                .collect::<Vec<_>>(),
        )?,
    })
}

pub fn execute_catalog_show(command: &CatalogShowCommand, context: &RunContext) -> Result<String, RunnerError> {
    let catalog = context.catalog()?;
    let definition = catalog.require(&command.node_type)?;
    Ok(match context.format(command.format) {
        OutputFormat::Text => render_definition_text(definition),
        OutputFormat::Json => serde_json::to_string_pretty(definition)?,
    })
}

pub fn execute_custom_register(command: &CustomFileCommand, context: &RunContext) -> Result<String, RunnerError> {
    let value = read_value(&command.file).map_err(RunnerError::Document)?;
    let schema: CustomUoSchema = serde_json::from_value(value)
        .map_err(|error| RunnerError::CustomSchemaDecode(error.to_string()))?;
    let mut store = context.open_store()?;
    let registered = store.register(schema)?;
    Ok(format!(
        "registered custom UO `{}` ({}) in {}",
        registered.id,
        registered.name,
        context.store_path().display()
    ))
}

pub fn execute_custom_list(command: &CustomListCommand, context: &RunContext) -> Result<String, RunnerError> {
    let store = context.open_store()?;
    Ok(match context.format(command.format) {
        OutputFormat::Text => {
            if store.is_empty() {
                return Ok("no custom unit operations".to_string());
            }
            store
                .list()
                .map(|schema| format!("{}\t{}\t{} parameters", schema.id, schema.name, schema.parameters.len()))
                .collect::<Vec<_>>()
                .join("\n")
        }
        OutputFormat::Json => serde_json::to_string_pretty(&store.list().collect::<Vec<_>>())?,
    })
}

pub fn execute_custom_delete(command: &CustomDeleteCommand, context: &RunContext) -> Result<String, RunnerError> {
    let mut store = context.open_store()?;
    if store.delete(&command.id)? {
        Ok(format!("deleted custom UO `{}`", command.id))
    } else {
        Err(RunnerError::UnknownCustomUo(command.id.clone()))
    }
}

pub fn execute_custom_export(command: &CustomExportCommand, context: &RunContext) -> Result<String, RunnerError> {
    let store = context.open_store()?;
    let bundle = store.export_bundle(command.exported_at.clone());
    let rendered = serde_json::to_string_pretty(&bundle)?;
    match &command.output {
        Some(path) => {
            write_file(path, &rendered)?;
            Ok(format!(
                "exported {} custom UOs to {}",
                bundle.custom_uos.len(),
                path.display()
            ))
        }
        None => Ok(rendered),
    }
}

pub fn execute_custom_import(command: &CustomFileCommand, context: &RunContext) -> Result<String, RunnerError> {
    let text = fs::read_to_string(&command.file).map_err(|source| RunnerError::ReadFile {
        path: command.file.display().to_string(),
        source,
    })?;
    let mut store = context.open_store()?;
    let report = store.import_bundle(text.as_str())?;
    let mut lines = vec![format!("imported {} custom UOs", report.imported)];
    lines.extend(report.errors.iter().map(|error| format!("- {error}")));
    Ok(lines.join("\n"))
}

struct ValidationReport {
    subject: String,
    body: Value,
    notes: Vec<String>,
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    fn render_text(&self) -> String {
        let mut lines = Vec::<String>::new();
        if self.errors.is_empty() {
            lines.push(format!("{}: valid", self.subject));
        } else {
            lines.push(format!("{}: {} validation errors", self.subject, self.errors.len()));
            lines.extend(self.errors.iter().map(|error| format!("- {error}")));
        }
        lines.extend(self.notes.iter().map(|note| format!("note: {note}")));
        lines.join("\n")
    }
}

fn load_document(path: &Path) -> Result<UoDocument, RunnerError> {
    read_document(path).map_err(RunnerError::Document)
}

fn require_node(document: UoDocument, command: &'static str) -> Result<NodeDocument, RunnerError> {
    match document {
        UoDocument::Node(document) => Ok(document),
        UoDocument::UnitOperation(_) => Err(RunnerError::NodeDocumentRequired { command }),
    }
}

fn require_unit_operation(
    document: UoDocument,
    command: &'static str,
) -> Result<UnitOperationDocument, RunnerError> {
    match document {
        UoDocument::UnitOperation(document) => Ok(document),
        UoDocument::Node(_) => Err(RunnerError::UnitOperationDocumentRequired { command }),
    }
}

fn node_form(document: &NodeDocument, context: &RunContext) -> Result<NodeFormState, RunnerError> {
    let catalog = context.catalog()?;
    let definition = catalog.require(&document.node_type)?.clone();
    Ok(NodeFormState::from_document(definition, document))
}

fn render_definition_text(definition: &NodeDefinition) -> String {
    let mut lines = vec![
        format!("{} ({})", definition.label, definition.node_type),
        format!("category: {}", definition.category),
        definition.description.clone(),
    ];
    for (group_id, group) in &definition.parameter_groups {
        lines.push(format!("[{group_id}] {}", group.label));
        for (parameter_id, parameter) in &group.parameters {
            let mut line = format!("  - {parameter_id} ({})", parameter.kind.as_str());
            if let Some(default_value) = &parameter.default_value {
                line.push_str(&format!(" = {default_value}"));
            }
            if let Some(unit) = &parameter.unit {
                line.push_str(&format!(" {unit}"));
            }
            if parameter.required {
                line.push_str(" required");
            }
            lines.push(line);
        }
    }
    lines.push(format!(
        "operations: {}",
        definition.primitive_operations.join(" -> ")
    ));
    lines.join("\n")
}

fn write_file(path: &Path, content: &str) -> Result<(), RunnerError> {
    write_output(path, content).map_err(|source| RunnerError::WriteFile {
        path: path.display().to_string(),
        source,
    })
}

fn render_issues(issues: &[DocumentIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;

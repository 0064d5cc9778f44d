use serde_json::Value;
use std::fs;
use std::path::Path;
use uo_core::{DocumentIssue, FieldPath};
use uo_sdk::parse::parse_value;
use uo_sdk::{parse_document_with_format, DocumentFormat, UoDocument};

/// Reads a node or unit operation document; the file extension picks the
/// decoder and anything else is sniffed.
pub fn read_document(path: &Path) -> Result<UoDocument, Vec<DocumentIssue>> {
    let text = read_text(path)?;
    parse_document_with_format(text.as_str(), format_for(path))
        .map_err(|issues| attach_file(issues, path))
}

/// Reads a JSON or YAML file without interpreting it as a document.
pub fn read_value(path: &Path) -> Result<Value, Vec<DocumentIssue>> {
    let text = read_text(path)?;
    parse_value(text.as_str(), format_for(path)).map_err(|issues| attach_file(issues, path))
}

/// Writes `content` to `path`, creating parent directories as needed.
pub fn write_output(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote output file");
    Ok(())
}

fn read_text(path: &Path) -> Result<String, Vec<DocumentIssue>> {
    fs::read_to_string(path).map_err(|error| {
        vec![DocumentIssue::new(
            "io_error",
            FieldPath::root(),
            format!("read file `{}` failed: {error}", path.display()),
            "runner.io.read_file_failed",
        )]
    })
}

fn format_for(path: &Path) -> DocumentFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => DocumentFormat::Json,
        Some("yaml") | Some("yml") => DocumentFormat::Yaml,
        _ => DocumentFormat::Auto,
    }
}

fn attach_file(mut issues: Vec<DocumentIssue>, path: &Path) -> Vec<DocumentIssue> {
    for issue in &mut issues {
        issue.message = format!("{}: {}", path.display(), issue.message);
    }
    DocumentIssue::sort_stable(&mut issues);
    issues
}

#[cfg(test)]
#[path = "read_document_test.rs"]
mod tests;

use crate::cli::OutputFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uo_core::{DocumentIssue, FieldPath};

pub const RUNNER_CONFIG_SCHEMA: &str = "uo-runner/0.1";
pub const DEFAULT_STORE_PATH: &str = "custom_uos.json";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerConfig {
    #[serde(default = "default_runner_schema")]
    pub schema: String,
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub default_format: Option<OutputFormat>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            schema: default_runner_schema(),
            store_path: default_store_path(),
            log_level: None,
            default_format: None,
        }
    }
}

impl RunnerConfig {
    pub fn output_format(&self, requested: Option<OutputFormat>) -> OutputFormat {
        requested
            .or(self.default_format)
            .unwrap_or(OutputFormat::Text)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RunnerConfigError {
    #[error("read runner config failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("runner config parse failed: {0}")]
    Parse(String),
    #[error("runner config validation failed: {}", render_issues(.0))]
    Validation(Vec<DocumentIssue>),
}

pub fn load_runner_config(path: &Path) -> Result<RunnerConfig, RunnerConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| RunnerConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    let expanded = expand_env_placeholders(raw.as_str()).map_err(RunnerConfigError::Parse)?;
    let config: RunnerConfig = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(expanded.as_str()).map_err(|error| {
            RunnerConfigError::Parse(format!("json decode error: {error}"))
        })?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(expanded.as_str()).map_err(|error| {
            RunnerConfigError::Parse(format!("yaml decode error: {error}"))
        })?,
        _ => serde_yaml::from_str(expanded.as_str())
            .or_else(|_| serde_json::from_str(expanded.as_str()))
            .map_err(|error| RunnerConfigError::Parse(error.to_string()))?,
    };

    let mut issues = validate_runner_config(&config);
    DocumentIssue::sort_stable(&mut issues);
    if !issues.is_empty() {
        return Err(RunnerConfigError::Validation(issues));
    }
    tracing::debug!(path = %path.display(), "loaded runner config");
    Ok(config)
}

pub fn validate_runner_config(config: &RunnerConfig) -> Vec<DocumentIssue> {
    let mut issues = Vec::<DocumentIssue>::new();
    if config.schema != RUNNER_CONFIG_SCHEMA {
        issues.push(config_issue(
            "runner.config.schema",
            "schema",
            format!(
                "unsupported runner config schema `{}` (expected `{RUNNER_CONFIG_SCHEMA}`)",
                config.schema
            ),
        ));
    }
    if config.store_path.as_os_str().is_empty() {
        issues.push(config_issue(
            "runner.config.store_path.non_empty",
            "store_path",
            "store_path must not be empty".to_string(),
        ));
    }
    if let Some(level) = &config.log_level {
        if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            issues.push(config_issue(
                "runner.config.log_level",
                "log_level",
                format!("log_level `{level}` must be one of: {}", LOG_LEVELS.join(", ")),
            ));
        }
    }
    issues
}

fn config_issue(reference: &str, key: &str, message: String) -> DocumentIssue {
    DocumentIssue::new("runner_config_error", FieldPath::root().key(key), message, reference)
}

fn render_issues(issues: &[DocumentIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn default_runner_schema() -> String {
    RUNNER_CONFIG_SCHEMA.to_string()
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

fn expand_env_placeholders(input: &str) -> Result<String, String> {
    let mut out = String::with_capacity(input.len());
    let mut cursor = 0;
    while let Some(start_offset) = input[cursor..].find("${") {
        let start = cursor + start_offset;
        out.push_str(&input[cursor..start]);
        let var_start = start + 2;
        let Some(end_offset) = input[var_start..].find('}') else {
            return Err("unterminated env placeholder `${...`".to_string());
        };
        let end = var_start + end_offset;
        let key = &input[var_start..end];
        if key.is_empty() {
            return Err("empty env placeholder `${}`".to_string());
        }
        let value = std::env::var(key)
            .map_err(|_| format!("missing env var for placeholder `${{{key}}}`"))?;
        out.push_str(value.as_str());
        cursor = end + 1;
    }
    out.push_str(&input[cursor..]);
    Ok(out)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

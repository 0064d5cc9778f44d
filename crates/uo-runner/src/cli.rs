use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "uo-runner")]
#[command(about = "Unit operation validation, planning and export CLI")]
pub struct Cli {
    /// Runner config file (YAML or JSON).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Custom unit operation store; overrides the config's `store_path`.
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Validate a node or unit operation document.
    Validate(DocumentCommand),
    /// Execution plan of a node's primitive operations.
    Plan(DocumentCommand),
    /// Declared execution steps with their current activity.
    Preview(DocumentCommand),
    /// Markdown summary of a unit operation document.
    Summary(DocumentCommand),
    Export(ExportCommand),
    Import(ImportCommand),
    #[command(subcommand)]
    Catalog(CatalogCommand),
    #[command(subcommand)]
    Custom(CustomCommand),
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ExportModeArg {
    Execution,
    Full,
}

#[derive(Debug, Clone, clap::Args)]
pub struct DocumentCommand {
    #[arg(long)]
    pub file: PathBuf,
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ExportCommand {
    #[arg(long)]
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t = ExportModeArg::Execution)]
    pub mode: ExportModeArg,
    #[arg(long)]
    pub node_id: Option<String>,
    #[arg(long)]
    pub timestamp: Option<String>,
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ImportCommand {
    #[arg(long)]
    pub file: PathBuf,
    /// Node type of the result; defaults to the export's `nodeType`.
    #[arg(long)]
    pub node_type: Option<String>,
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CatalogCommand {
    List(CatalogListCommand),
    Show(CatalogShowCommand),
}

#[derive(Debug, Clone, clap::Args)]
pub struct CatalogListCommand {
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct CatalogShowCommand {
    pub node_type: String,
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CustomCommand {
    Register(CustomFileCommand),
    List(CustomListCommand),
    Delete(CustomDeleteCommand),
    Export(CustomExportCommand),
    Import(CustomFileCommand),
}

#[derive(Debug, Clone, clap::Args)]
pub struct CustomFileCommand {
    #[arg(long)]
    pub file: PathBuf,
}

#[derive(Debug, Clone, clap::Args)]
pub struct CustomListCommand {
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct CustomDeleteCommand {
    pub id: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct CustomExportCommand {
    #[arg(long)]
    pub exported_at: Option<String>,
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

mod cli;
mod config;
mod io;
mod run;

pub use cli::{
    CatalogCommand, CatalogListCommand, CatalogShowCommand, Cli, Commands, CustomCommand,
    CustomDeleteCommand, CustomExportCommand, CustomFileCommand, CustomListCommand,
    DocumentCommand, ExportCommand, ExportModeArg, ImportCommand, OutputFormat,
};
pub use config::{
    load_runner_config, validate_runner_config, RunnerConfig, RunnerConfigError,
    DEFAULT_STORE_PATH, RUNNER_CONFIG_SCHEMA,
};
pub use io::{read_document, read_value, write_output};
pub use run::{
    execute_catalog_list, execute_catalog_show, execute_custom_delete, execute_custom_export,
    execute_custom_import, execute_custom_list, execute_custom_register, execute_export,
    execute_import, execute_plan, execute_preview, execute_summary, execute_validate, RunContext,
    RunnerError,
};

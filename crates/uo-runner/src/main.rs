use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use uo_runner::{
    execute_catalog_list, execute_catalog_show, execute_custom_delete, execute_custom_export,
    execute_custom_import, execute_custom_list, execute_custom_register, execute_export,
    execute_import, execute_plan, execute_preview, execute_summary, execute_validate,
    load_runner_config, CatalogCommand, Cli, Commands, CustomCommand, RunContext, RunnerConfig,
};

fn main() {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => match load_runner_config(path) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("{error}");
                std::process::exit(1);
            }
        },
        None => RunnerConfig::default(),
    };
    init_tracing(config.log_level.as_deref());

    let context = RunContext::new(config, cli.store);
    let result = match cli.command {
        Commands::Validate(command) => execute_validate(&command, &context),
        Commands::Plan(command) => execute_plan(&command, &context),
        Commands::Preview(command) => execute_preview(&command, &context),
        Commands::Summary(command) => execute_summary(&command, &context),
        Commands::Export(command) => execute_export(&command, &context),
        Commands::Import(command) => execute_import(&command, &context),
        Commands::Catalog(catalog_command) => match catalog_command {
            CatalogCommand::List(command) => execute_catalog_list(&command, &context),
            CatalogCommand::Show(command) => execute_catalog_show(&command, &context),
        },
        Commands::Custom(custom_command) => match custom_command {
            CustomCommand::Register(command) => execute_custom_register(&command, &context),
            CustomCommand::List(command) => execute_custom_list(&command, &context),
            CustomCommand::Delete(command) => execute_custom_delete(&command, &context),
            CustomCommand::Export(command) => execute_custom_export(&command, &context),
            CustomCommand::Import(command) => execute_custom_import(&command, &context),
        },
    };

    match result {
        Ok(output) => {
            println!("{output}");
        }
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }
}

/// `RUST_LOG` wins over the config's `log_level`; logs go to stderr.
fn init_tracing(log_level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.unwrap_or("warn")));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;

// cwl-export - CloudWatch Logs to S3 export scheduling
// Copyright (c) 2025 cwl-export Contributors
// Licensed under the MIT License

use clap::Parser;
use cwl_export::cli::{Cli, Commands, EXIT_CONFIG, EXIT_FATAL};
use cwl_export::config::{load_config, resolve_config_path, AppConfig};
use cwl_export::log_error_with_context;
use cwl_export::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_level = cli.log_level.as_deref().unwrap_or("info");
    let guard = match init_logging(log_level, &cli.logging_config()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_CONFIG);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "cwl-export starting");

    let config_path = resolve_config_path(cli.config.as_deref());
    let config = match load_config(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log_error_with_context!(&e, "Failed to load configuration");
            eprintln!("Failed to load configuration: {e}");
            drop(guard);
            process::exit(EXIT_CONFIG);
        }
    };

    // The command line wins over the config file
    if cli.log_level.is_none() {
        if let Err(e) = guard.set_level(&config.application.log_level) {
            tracing::warn!(error = %e, "Keeping the default log level");
        }
    }

    let exit_code = match execute_command(&cli, &config).await {
        Ok(code) => code,
        Err(e) => {
            log_error_with_context!(&e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, config: &AppConfig) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Register(args) => args.execute(config).await,
        Commands::Export(args) => args.execute(config).await,
        Commands::Status(args) => args.execute(config).await,
    }
}

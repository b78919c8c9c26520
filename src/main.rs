// Docsheet - Firestore collection to Excel exporter
// Copyright (c) 2025 Docsheet Contributors
// Licensed under the MIT License

use docsheet::cli::commands::{LoadedConfig, EXIT_FATAL};
use docsheet::cli::{Cli, Commands};
use docsheet::config::LoggingConfig;
use docsheet::logging::init_logging;
use clap::Parser;
use std::process;

/// Log level used when neither the CLI nor the config file sets one
const FALLBACK_LOG_LEVEL: &str = "warn";

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Read once; logging uses it when it loads and the command reports any
    // load error itself.
    let loaded = LoadedConfig::load(&cli.config);
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| loaded.config().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| FALLBACK_LOG_LEVEL.to_string());
    let logging_config: LoggingConfig = loaded
        .config()
        .map(|c| c.logging.clone())
        .unwrap_or_default();

    let logging_guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_FATAL);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Docsheet - Firestore collection to Excel exporter"
    );

    // Execute command and get exit code
    let exit_code = match execute_command(&cli, loaded).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    // process::exit skips destructors; flush file logs first.
    drop(logging_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, config: LoadedConfig) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Check(args) => args.execute(config).await,
        Commands::Export(args) => args.execute(config).await,
        Commands::Interactive(args) => args.execute(config).await,
        Commands::ValidateConfig(args) => args.execute(config).await,
        Commands::Init(args) => args.execute().await,
    }
}

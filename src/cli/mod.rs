//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Docsheet using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Docsheet - Firestore collection to Excel exporter
#[derive(Parser, Debug)]
#[command(name = "docsheet")]
#[command(version, about, long_about = None)]
#[command(author = "Docsheet Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "docsheet.toml", env = "DOCSHEET_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DOCSHEET_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that a collection exists and holds documents
    Check(commands::check::CheckArgs),

    /// Check a collection, then export it to an .xlsx workbook
    Export(commands::export::ExportArgs),

    /// Run the export form in the terminal
    Interactive(commands::interactive::InteractiveArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::parse_from(["docsheet", "check", "users"]);
        assert_eq!(cli.config, "docsheet.toml");
        match cli.command {
            Commands::Check(args) => assert_eq!(args.collection, "users"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from([
            "docsheet",
            "export",
            "users",
            "--file-name",
            "users-2025",
            "--output-dir",
            "out",
        ]);
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.collection, "users");
                assert_eq!(args.file_name, "users-2025");
                assert_eq!(args.output_dir.as_deref(), Some("out"));
                assert!(args.sheet_label.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_export_requires_file_name() {
        assert!(Cli::try_parse_from(["docsheet", "export", "users"]).is_err());
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["docsheet", "--config", "custom.toml", "interactive"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::Interactive(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["docsheet", "--log-level", "debug", "validate-config"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["docsheet", "init", "--emulator"]);
        assert!(matches!(cli.command, Commands::Init(ref args) if args.emulator));
    }
}

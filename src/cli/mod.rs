//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for cwl-export using clap.

pub mod commands;

use crate::config::LoggingConfig;
use clap::{Parser, Subcommand};

/// Command completed
pub const EXIT_OK: i32 = 0;
/// Operator input made the command give up (empty catalog, no bucket, input closed)
pub const EXIT_INPUT: i32 = 1;
/// Configuration or usage error
pub const EXIT_CONFIG: i32 = 2;
/// An AWS service could not be reached
pub const EXIT_CONNECTION: i32 = 4;
/// Anything else
pub const EXIT_FATAL: i32 = 5;

/// cwl-export - CloudWatch Logs to S3 export scheduling
#[derive(Parser, Debug)]
#[command(name = "cwl-export")]
#[command(version, about, long_about = None)]
#[command(author = "cwl-export Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults to ./cwl-export.toml when present)
    #[arg(short, long, env = "CWL_EXPORT_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CWL_EXPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Also write rolling JSON log files to this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Logging configuration derived from the global flags
    pub fn logging_config(&self) -> LoggingConfig {
        let mut config = LoggingConfig {
            json: self.log_json,
            ..LoggingConfig::default()
        };
        if let Some(dir) = &self.log_dir {
            config.local_enabled = true;
            config.local_path = dir.clone();
        }
        config
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactively register log groups for scheduled export
    Register(commands::register::RegisterArgs),

    /// Create export tasks for every registered log group
    Export(commands::export::ExportArgs),

    /// List registered log groups
    Status(commands::status::StatusArgs),
}

//! Export command implementation
//!
//! This module implements the non-interactive `export` command: one
//! scheduled run of the export orchestrator. The JSON response goes to
//! stdout; logs go to stderr.

use crate::adapters::AwsClients;
use crate::cli::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use crate::config::AppConfig;
use crate::core::export::{ExportOrchestrator, InvocationResponse};
use clap::Args;
use std::path::Path;
use std::sync::Arc;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// JSON file holding the triggering event (defaults to `{}`)
    #[arg(long, value_name = "FILE")]
    pub event: Option<String>,

    /// Pretty-print the JSON response
    #[arg(long)]
    pub pretty: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config: &AppConfig) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        if let Err(e) = config.validate_for_export() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG);
        }

        let event = match self.event.as_deref() {
            Some(path) => match read_event(Path::new(path)) {
                Ok(event) => event,
                Err(e) => {
                    tracing::error!(path = %path, error = %e, "Failed to read event");
                    eprintln!("Failed to read event file {path}: {e}");
                    return Ok(EXIT_CONFIG);
                }
            },
            None => serde_json::json!({}),
        };

        let clients = AwsClients::from_store_config(&config.store).await;
        let orchestrator = ExportOrchestrator::new(
            Arc::new(clients.config_store(&config.store.table_name)),
            Arc::new(clients.cloudwatch_logs()),
            &config.export,
        );

        let response = orchestrator.handle(&event).await;
        println!("{}", self.render(&response)?);

        Ok(exit_code(&response))
    }

    fn render(&self, response: &InvocationResponse) -> serde_json::Result<String> {
        if self.pretty {
            serde_json::to_string_pretty(response)
        } else {
            serde_json::to_string(response)
        }
    }
}

/// Read an event payload from a JSON file
pub fn read_event(path: &Path) -> anyhow::Result<serde_json::Value> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// 0 for a 200 response, 5 otherwise
pub fn exit_code(response: &InvocationResponse) -> i32 {
    if response.is_success() {
        EXIT_OK
    } else {
        EXIT_FATAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_event() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"source": "aws.events", "detail-type": "Scheduled Event"}}"#).unwrap();

        let event = read_event(file.path()).unwrap();
        assert_eq!(event["source"], "aws.events");
    }

    #[test]
    fn test_read_event_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(read_event(file.path()).is_err());
    }

    #[test]
    fn test_exit_code() {
        assert_eq!(exit_code(&InvocationResponse::no_configurations()), EXIT_OK);
        assert_eq!(exit_code(&InvocationResponse::failed("boom")), EXIT_FATAL);
    }

    #[tokio::test]
    async fn test_export_requires_table_name() {
        let args = ExportArgs {
            event: None,
            pretty: false,
        };
        let code = args.execute(&AppConfig::default()).await.unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }
}

//! Register command implementation
//!
//! This module implements the interactive `register` command: list the
//! account's log groups, let the operator pick some, ask for the S3
//! destination and write one configuration record per pick.

use crate::adapters::traits::{CatalogPages, ConfigStore, LogCatalog};
use crate::adapters::AwsClients;
use crate::cli::{EXIT_CONNECTION, EXIT_INPUT, EXIT_OK};
use crate::config::AppConfig;
use crate::core::pagination::collect_all;
use crate::core::register::RegistrationWriter;
use crate::core::selection::{display_catalog, select_sources, Console};
use crate::domain::{ExportDestination, ExportToolError};
use clap::Args;
use std::io::{BufRead, Write};

/// Arguments for the register command
#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// DynamoDB table holding the export configuration
    pub table: String,
}

impl RegisterArgs {
    /// Execute the register command
    pub async fn execute(&self, config: &AppConfig) -> anyhow::Result<i32> {
        tracing::info!(table = %self.table, "Starting register command");

        let clients = AwsClients::from_store_config(&config.store).await;
        let catalog = clients.cloudwatch_logs();
        let store = clients.config_store(&self.table);

        let mut console = Console::stdio();
        run_registration(&mut console, &catalog, &store).await
    }
}

/// The registration session, over any console, catalog and store.
///
/// Returns the process exit code.
pub async fn run_registration<R, W, C, S>(
    console: &mut Console<R, W>,
    catalog: &C,
    store: &S,
) -> anyhow::Result<i32>
where
    R: BufRead,
    W: Write,
    C: LogCatalog + ?Sized,
    S: ConfigStore + ?Sized,
{
    console.say("Fetching CloudWatch log groups...")?;

    let sources = match collect_all(&CatalogPages(catalog)).await {
        Ok(sources) => sources,
        Err(e) => {
            tracing::error!(error = %e, "Failed to list log groups");
            console.say(format!("Error: {e}"))?;
            return Ok(EXIT_CONNECTION);
        }
    };

    if sources.is_empty() {
        console.say("No log groups found in your AWS account")?;
        return Ok(EXIT_INPUT);
    }

    display_catalog(console, &sources)?;

    let selected = match select_sources(console, &sources) {
        Ok(selected) => selected,
        Err(ExportToolError::InputClosed) => {
            console.say("\nInput closed; nothing was registered")?;
            return Ok(EXIT_INPUT);
        }
        Err(e) => return Err(e.into()),
    };

    let bucket = match console.ask("\nS3 Bucket Name: ") {
        Ok(line) => line.trim().to_string(),
        Err(ExportToolError::InputClosed) => String::new(),
        Err(e) => return Err(e.into()),
    };
    if bucket.is_empty() {
        console.say("Error: S3 bucket name is required")?;
        return Ok(EXIT_INPUT);
    }

    let prefix = match console.ask("S3 Prefix (optional): ") {
        Ok(line) => line.trim().to_string(),
        Err(ExportToolError::InputClosed) => String::new(),
        Err(e) => return Err(e.into()),
    };

    let destination = ExportDestination::new(bucket, Some(prefix))?;
    tracing::info!(
        count = selected.len(),
        bucket = destination.bucket(),
        prefix = destination.prefix().unwrap_or(""),
        "Registering log groups"
    );

    let writer = RegistrationWriter::new(store);
    let report = writer
        .register(&selected, &destination, |name, error| {
            let line = match error {
                None => format!("Added: {name}"),
                Some(error) => format!("Error adding log group {name}: {error}"),
            };
            if let Err(e) = console.say(line) {
                tracing::warn!(error = %e, "Failed to write progress line");
            }
        })
        .await;

    console.say(format!("\n{}", report.summary_line()))?;
    Ok(EXIT_OK)
}

//! Status command implementation
//!
//! This module implements the `status` command for listing the log groups
//! registered in a configuration table.

use crate::adapters::traits::{ConfigStore, StorePages};
use crate::adapters::AwsClients;
use crate::cli::{EXIT_CONNECTION, EXIT_OK};
use crate::config::AppConfig;
use crate::core::pagination::collect_all;
use crate::domain::ExportConfigurationRecord;
use clap::Args;
use std::io::Write;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// DynamoDB table holding the export configuration
    pub table: String,

    /// Print the records as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config: &AppConfig) -> anyhow::Result<i32> {
        tracing::info!(table = %self.table, "Checking registered log groups");

        let clients = AwsClients::from_store_config(&config.store).await;
        let store = clients.config_store(&self.table);

        let mut stdout = std::io::stdout().lock();
        self.run(&store, &mut stdout).await
    }

    /// List the records of `store` to `out`
    pub async fn run<S, W>(&self, store: &S, out: &mut W) -> anyhow::Result<i32>
    where
        S: ConfigStore + ?Sized,
        W: Write,
    {
        let records = match collect_all(&StorePages(store)).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read configuration table");
                eprintln!("Failed to read configuration table {}: {e}", self.table);
                return Ok(EXIT_CONNECTION);
            }
        };

        if self.json {
            writeln!(out, "{}", serde_json::to_string_pretty(&records)?)?;
            return Ok(EXIT_OK);
        }

        if records.is_empty() {
            writeln!(out, "No log groups registered in {}.", self.table)?;
            writeln!(out, "Run 'cwl-export register {}' to add some.", self.table)?;
            return Ok(EXIT_OK);
        }

        writeln!(out, "Found {} registered log group(s):", records.len())?;
        writeln!(out)?;
        writeln!(
            out,
            "{:<50} {:<30} {:<40} {:<20}",
            "Log Group", "S3 Bucket", "S3 Prefix", "Created"
        )?;
        writeln!(out, "{}", "-".repeat(140))?;
        for record in &records {
            writeln!(out, "{}", format_row(record))?;
        }
        Ok(EXIT_OK)
    }
}

fn format_row(record: &ExportConfigurationRecord) -> String {
    let prefix = record.s3_prefix.as_deref().unwrap_or("(default)");
    let created = record
        .created_at
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:<50} {:<30} {:<40} {:<20}",
        record.log_group_name, record.s3_bucket_name, prefix, created
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryConfigStore;
    use crate::domain::ExportDestination;
    use chrono::{TimeZone, Utc};

    fn args(json: bool) -> StatusArgs {
        StatusArgs {
            table: "log-export-config".to_string(),
            json,
        }
    }

    fn store() -> InMemoryConfigStore {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        let plain = ExportDestination::new("archive", None).unwrap();
        let custom = ExportDestination::new("archive", Some("custom".to_string())).unwrap();
        InMemoryConfigStore::with_records(vec![
            ExportConfigurationRecord::new("/aws/lambda/orders", &plain, created),
            ExportConfigurationRecord::new("web", &custom, created),
        ])
    }

    #[tokio::test]
    async fn test_status_table() {
        let mut out = Vec::new();
        let code = args(false).run(&store(), &mut out).await.unwrap();
        assert_eq!(code, EXIT_OK);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Found 2 registered log group(s)"));
        assert!(text.contains("/aws/lambda/orders"));
        assert!(text.contains("(default)"));
        assert!(text.contains("2024-03-01 08:30:00"));
    }

    #[tokio::test]
    async fn test_status_json() {
        let mut out = Vec::new();
        args(true).run(&store(), &mut out).await.unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[1]["s3Prefix"], "custom");
    }

    #[tokio::test]
    async fn test_status_empty() {
        let mut out = Vec::new();
        args(false)
            .run(&InMemoryConfigStore::new(), &mut out)
            .await
            .unwrap();
        assert!(String::from_utf8(out).unwrap().contains("No log groups registered"));
    }

    #[tokio::test]
    async fn test_status_unreachable() {
        let mut out = Vec::new();
        let code = args(false)
            .run(&InMemoryConfigStore::new().unreachable(), &mut out)
            .await
            .unwrap();
        assert_eq!(code, EXIT_CONNECTION);
    }
}

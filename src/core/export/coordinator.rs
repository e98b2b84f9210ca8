//! Export orchestrator - the scheduled export run
//!
//! Reads every configuration record, computes one trailing window for the
//! run, and requests one export task per record. Per-record failures become
//! `EXPORT_FAILED` outcomes; failures outside the per-record step become a
//! 500 response. Nothing escapes as an error.

use crate::adapters::traits::{ConfigStore, ExportApi, ExportRequest, StorePages};
use crate::config::ExportConfig;
use crate::core::export::summary::{ExportOutcome, InvocationResponse};
use crate::core::export::window::{resolve_prefix, ExportWindow};
use crate::core::pagination::collect_all;
use crate::domain::{ExportConfigurationRecord, Result};
use crate::{log_export_failed, log_export_started};
use chrono::{DateTime, NaiveDate, Utc};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;

/// Export orchestrator
pub struct ExportOrchestrator {
    store: Arc<dyn ConfigStore>,
    exporter: Arc<dyn ExportApi>,
    time_range_minutes: u32,
    max_concurrency: usize,
}

impl ExportOrchestrator {
    /// Create an orchestrator over a configuration store and export API
    pub fn new(
        store: Arc<dyn ConfigStore>,
        exporter: Arc<dyn ExportApi>,
        config: &ExportConfig,
    ) -> Self {
        Self {
            store,
            exporter,
            time_range_minutes: config.time_range_minutes,
            max_concurrency: config.max_concurrency.max(1),
        }
    }

    /// Handle one scheduled invocation.
    ///
    /// The event payload is only logged; the run always uses the current time.
    pub async fn handle(&self, event: &serde_json::Value) -> InvocationResponse {
        tracing::debug!(event = %event, "Export invocation received");
        self.run_at(Utc::now()).await
    }

    /// Run the export as of `now`.
    pub async fn run_at(&self, now: DateTime<Utc>) -> InvocationResponse {
        let start_time = Instant::now();

        let response = match self.try_run(now).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Error in export run");
                InvocationResponse::failed(e.to_string())
            }
        };

        tracing::debug!(
            duration_ms = start_time.elapsed().as_millis(),
            status_code = response.status_code,
            "Export run finished"
        );
        response
    }

    async fn try_run(&self, now: DateTime<Utc>) -> Result<InvocationResponse> {
        let records = collect_all(&StorePages(self.store.as_ref())).await?;

        if records.is_empty() {
            tracing::info!("No log group configurations found");
            return Ok(InvocationResponse::no_configurations());
        }

        let window = ExportWindow::ending_at(now, self.time_range_minutes);
        let today = now.date_naive();

        tracing::info!(
            records = records.len(),
            from_ms = window.from_ms,
            to_ms = window.to_ms,
            window_minutes = self.time_range_minutes,
            "Exporting logs from {} to {}",
            format_bound(window.from_time()),
            format_bound(window.to_time())
        );

        let outcomes: Vec<ExportOutcome> = stream::iter(records.iter())
            .map(|record| self.export_record(record, window, today))
            .buffered(self.max_concurrency)
            .collect()
            .await;

        let response = InvocationResponse::completed(outcomes);
        response.log_summary();
        Ok(response)
    }

    async fn export_record(
        &self,
        record: &ExportConfigurationRecord,
        window: ExportWindow,
        today: NaiveDate,
    ) -> ExportOutcome {
        let request = ExportRequest {
            log_group_name: record.log_group_name.clone(),
            destination_bucket: record.s3_bucket_name.clone(),
            destination_prefix: resolve_prefix(record, today),
            from_ms: window.from_ms,
            to_ms: window.to_ms,
        };

        tracing::info!(
            log_group = %request.log_group_name,
            bucket = %request.destination_bucket,
            prefix = %request.destination_prefix,
            "Requesting export"
        );

        match self.exporter.create_export(&request).await {
            Ok(task_id) => {
                log_export_started!(&request.log_group_name, &task_id);
                ExportOutcome::started(&request.log_group_name, task_id)
            }
            Err(e) => {
                log_export_failed!(&request.log_group_name, &e);
                ExportOutcome::failed(&request.log_group_name, e.to_string())
            }
        }
    }
}

fn format_bound(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M:%S%.3f UTC").to_string())
        .unwrap_or_else(|| "<out of range>".to_string())
}

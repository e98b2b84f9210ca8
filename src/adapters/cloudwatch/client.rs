//! CloudWatch Logs client wrapper
//!
//! Serves both the log catalog (DescribeLogGroups) and the export API
//! (CreateExportTask).

use crate::adapters::traits::{ExportApi, ExportRequest, LogCatalog, Page};
use crate::domain::{CatalogError, LogSourceDescriptor, Result};
use async_trait::async_trait;
use aws_sdk_cloudwatchlogs as cloudwatchlogs;
use cloudwatchlogs::error::DisplayErrorContext;

/// Log groups requested per DescribeLogGroups call (the service maximum).
const DESCRIBE_PAGE_LIMIT: i32 = 50;

/// CloudWatch Logs client wrapper
#[derive(Clone, Debug)]
pub struct CloudWatchLogsClient {
    client: cloudwatchlogs::Client,
}

impl CloudWatchLogsClient {
    /// Create a wrapper around an SDK client
    pub fn new(client: cloudwatchlogs::Client) -> Self {
        Self { client }
    }

    /// Create a client from shared SDK configuration
    pub fn from_conf(sdk_config: &aws_config::SdkConfig) -> Self {
        Self::new(cloudwatchlogs::Client::new(sdk_config))
    }
}

#[async_trait]
impl LogCatalog for CloudWatchLogsClient {
    async fn list_page(&self, token: Option<String>) -> Result<Page<LogSourceDescriptor>> {
        let response = self
            .client
            .describe_log_groups()
            .limit(DESCRIBE_PAGE_LIMIT)
            .set_next_token(token)
            .send()
            .await
            .map_err(|e| CatalogError::ListFailed(DisplayErrorContext(&e).to_string()))?;

        let items = response
            .log_groups
            .unwrap_or_default()
            .into_iter()
            .filter_map(|group| {
                let name = group.log_group_name?;
                Some(LogSourceDescriptor::from_catalog(
                    name,
                    group.stored_bytes,
                    group.creation_time,
                ))
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            count = items.len(),
            has_more = response.next_token.is_some(),
            "Fetched log group page"
        );

        Ok(Page {
            items,
            next_token: response.next_token,
        })
    }
}

#[async_trait]
impl ExportApi for CloudWatchLogsClient {
    async fn create_export(&self, request: &ExportRequest) -> Result<String> {
        let response = self
            .client
            .create_export_task()
            .log_group_name(&request.log_group_name)
            .destination(&request.destination_bucket)
            .destination_prefix(&request.destination_prefix)
            .from(request.from_ms)
            .to(request.to_ms)
            .send()
            .await
            .map_err(|e| CatalogError::ExportRejected(DisplayErrorContext(&e).to_string()))?;

        response.task_id.ok_or_else(|| {
            CatalogError::ExportRejected(format!(
                "CreateExportTask for {} returned no task id",
                request.log_group_name
            ))
            .into()
        })
    }
}

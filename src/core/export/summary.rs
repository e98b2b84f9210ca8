//! Export outcomes and the invocation response
//!
//! The response serializes to
//! `{"statusCode": 200, "body": {"message": ..., "results": [...]}}`, with each
//! result shaped `{"logGroupName", "taskId", "status": "EXPORT_STARTED"}` or
//! `{"logGroupName", "error", "status": "EXPORT_FAILED"}`.

use serde::{Deserialize, Serialize};

/// Message when the configuration table is empty
pub const MESSAGE_NO_CONFIGURATIONS: &str = "No log group configurations found";
/// Message when every record was processed
pub const MESSAGE_COMPLETED: &str = "CloudWatch Logs export process completed";
/// Message when the run failed before or outside the per-record step
pub const MESSAGE_FAILED: &str = "Error processing CloudWatch Logs export";

/// Final state of one record in a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ExportStatus {
    /// The export task was created
    #[serde(rename = "EXPORT_STARTED")]
    Started {
        #[serde(rename = "taskId")]
        task_id: String,
    },

    /// The export request was rejected
    #[serde(rename = "EXPORT_FAILED")]
    Failed { error: String },
}

/// Result for one configuration record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOutcome {
    /// Log group the record names
    pub log_group_name: String,

    /// What happened
    #[serde(flatten)]
    pub status: ExportStatus,
}

impl ExportOutcome {
    /// An export task was created
    pub fn started(log_group_name: impl Into<String>, task_id: impl Into<String>) -> Self {
        Self {
            log_group_name: log_group_name.into(),
            status: ExportStatus::Started {
                task_id: task_id.into(),
            },
        }
    }

    /// The export request failed
    pub fn failed(log_group_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            log_group_name: log_group_name.into(),
            status: ExportStatus::Failed {
                error: error.into(),
            },
        }
    }

    /// Whether an export task was created
    pub fn is_started(&self) -> bool {
        matches!(self.status, ExportStatus::Started { .. })
    }
}

/// Response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseBody {
    /// Human-readable summary
    pub message: String,

    /// Per-record outcomes, in record order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<ExportOutcome>>,

    /// Error text for a failed invocation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// What one orchestrator invocation returns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResponse {
    /// 200, or 500 when the run failed outside the per-record step
    #[serde(rename = "statusCode")]
    pub status_code: u16,

    /// Response body
    pub body: ResponseBody,
}

impl InvocationResponse {
    /// Nothing is registered
    pub fn no_configurations() -> Self {
        Self {
            status_code: 200,
            body: ResponseBody {
                message: MESSAGE_NO_CONFIGURATIONS.to_string(),
                results: None,
                error: None,
            },
        }
    }

    /// Every record was processed
    pub fn completed(results: Vec<ExportOutcome>) -> Self {
        Self {
            status_code: 200,
            body: ResponseBody {
                message: MESSAGE_COMPLETED.to_string(),
                results: Some(results),
                error: None,
            },
        }
    }

    /// The run failed as a whole
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status_code: 500,
            body: ResponseBody {
                message: MESSAGE_FAILED.to_string(),
                results: None,
                error: Some(error.into()),
            },
        }
    }

    /// Whether the invocation itself succeeded (individual exports may still have failed)
    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }

    /// Per-record outcomes (empty when there are none)
    pub fn results(&self) -> &[ExportOutcome] {
        self.body.results.as_deref().unwrap_or_default()
    }

    /// Number of export tasks created
    pub fn started_count(&self) -> usize {
        self.results().iter().filter(|o| o.is_started()).count()
    }

    /// Number of export requests rejected
    pub fn failed_count(&self) -> usize {
        self.results().len() - self.started_count()
    }

    /// Log the response
    pub fn log_summary(&self) {
        if !self.is_success() {
            tracing::error!(
                error = self.body.error.as_deref().unwrap_or(""),
                "{}",
                self.body.message
            );
            return;
        }

        tracing::info!(
            records = self.results().len(),
            started = self.started_count(),
            failed = self.failed_count(),
            "{}",
            self.body.message
        );

        if self.failed_count() > 0 {
            tracing::warn!(
                failed = self.failed_count(),
                "Some exports were not started"
            );
        }
    }
}

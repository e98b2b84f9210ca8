//! Registration writer
//!
//! Persists one configuration record per selected log group. A failed write
//! is reported and skipped; it never stops the remaining writes.

use crate::adapters::traits::ConfigStore;
use crate::domain::{ExportConfigurationRecord, ExportDestination, LogSourceDescriptor};
use chrono::{DateTime, Utc};

/// A write that did not go through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationFailure {
    /// Log group whose record was not written
    pub log_group_name: String,

    /// Error text
    pub error: String,
}

/// Result of registering a selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationReport {
    /// Log groups whose record was written, in selection order
    pub added: Vec<String>,

    /// Log groups whose write failed, in selection order
    pub failed: Vec<RegistrationFailure>,
}

impl RegistrationReport {
    /// Number of records written
    pub fn added_count(&self) -> usize {
        self.added.len()
    }

    /// Whether nothing was written
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
    }

    /// Operator-facing closing line
    pub fn summary_line(&self) -> String {
        if self.is_empty() {
            "No log groups were added to the configuration".to_string()
        } else {
            format!(
                "Successfully added {} log group(s) to the configuration",
                self.added_count()
            )
        }
    }
}

/// Writes configuration records through a [`ConfigStore`]
pub struct RegistrationWriter<'a, S: ConfigStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: ConfigStore + ?Sized> RegistrationWriter<'a, S> {
    /// Writer over `store`
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Writes one record per source, stamped with the current time.
    ///
    /// `on_result` is called after each write with the log group name and the
    /// error text, if any, so callers can report progress as it happens.
    pub async fn register<F>(
        &self,
        sources: &[LogSourceDescriptor],
        destination: &ExportDestination,
        on_result: F,
    ) -> RegistrationReport
    where
        F: FnMut(&str, Option<&str>),
    {
        self.register_at(sources, destination, Utc::now(), on_result)
            .await
    }

    /// Same as [`Self::register`] with an explicit timestamp.
    pub async fn register_at<F>(
        &self,
        sources: &[LogSourceDescriptor],
        destination: &ExportDestination,
        created_at: DateTime<Utc>,
        mut on_result: F,
    ) -> RegistrationReport
    where
        F: FnMut(&str, Option<&str>),
    {
        let mut report = RegistrationReport::default();

        for source in sources {
            let record = ExportConfigurationRecord::new(&source.name, destination, created_at);

            match self.store.put_record(&record).await {
                Ok(()) => {
                    tracing::info!(
                        log_group = %source.name,
                        bucket = %destination.bucket(),
                        prefix = destination.prefix().unwrap_or(""),
                        "Log group registered"
                    );
                    on_result(&source.name, None);
                    report.added.push(source.name.clone());
                }
                Err(e) => {
                    let error = e.to_string();
                    tracing::error!(log_group = %source.name, error = %error, "Failed to register log group");
                    on_result(&source.name, Some(&error));
                    report.failed.push(RegistrationFailure {
                        log_group_name: source.name.clone(),
                        error,
                    });
                }
            }
        }

        report
    }
}

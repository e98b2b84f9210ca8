//! DynamoDB-backed configuration store

use super::models::{from_item, key_of, start_key, to_item};
use crate::adapters::traits::{ConfigStore, Page};
use crate::domain::{ExportConfigurationRecord, Result, StoreError};
use async_trait::async_trait;
use aws_sdk_dynamodb as dynamodb;
use dynamodb::error::DisplayErrorContext;

/// Configuration table client
#[derive(Clone, Debug)]
pub struct DynamoDbConfigStore {
    client: dynamodb::Client,
    table_name: String,
}

impl DynamoDbConfigStore {
    /// Create a store for `table_name`
    pub fn new(client: dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Create a store from shared SDK configuration
    pub fn from_conf(sdk_config: &aws_config::SdkConfig, table_name: impl Into<String>) -> Self {
        Self::new(dynamodb::Client::new(sdk_config), table_name)
    }
}

#[async_trait]
impl ConfigStore for DynamoDbConfigStore {
    async fn put_record(&self, record: &ExportConfigurationRecord) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_item(record)))
            .send()
            .await
            .map_err(|e| StoreError::PutFailed {
                log_group: record.log_group_name.clone(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        tracing::debug!(
            table = %self.table_name,
            log_group = %record.log_group_name,
            "Configuration record written"
        );
        Ok(())
    }

    async fn scan_page(&self, token: Option<String>) -> Result<Page<ExportConfigurationRecord>> {
        let response = self
            .client
            .scan()
            .table_name(&self.table_name)
            .set_exclusive_start_key(token.map(start_key))
            .send()
            .await
            .map_err(|e| StoreError::ScanFailed(DisplayErrorContext(&e).to_string()))?;

        let items = response
            .items
            .unwrap_or_default()
            .iter()
            .map(from_item)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let next_token = response.last_evaluated_key.as_ref().and_then(key_of);

        tracing::debug!(
            table = %self.table_name,
            count = items.len(),
            has_more = next_token.is_some(),
            "Scanned configuration page"
        );

        Ok(Page { items, next_token })
    }
}

//! AWS client factory
//!
//! Loads the shared SDK configuration once per process and hands out the
//! concrete adapters built from it.

use super::cloudwatch::CloudWatchLogsClient;
use super::dynamodb::DynamoDbConfigStore;
use crate::config::StoreConfig;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_types::region::Region;

/// Shared AWS SDK configuration
#[derive(Clone, Debug)]
pub struct AwsClients {
    sdk_config: SdkConfig,
}

impl AwsClients {
    /// Resolve credentials and region via the default provider chain.
    ///
    /// `region` overrides the chain's region when given.
    pub async fn load(region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }
        let sdk_config = loader.load().await;

        tracing::debug!(
            region = sdk_config.region().map(|r| r.as_ref()).unwrap_or("<unset>"),
            "AWS configuration loaded"
        );

        Self { sdk_config }
    }

    /// Resolve using the region from the store configuration
    pub async fn from_store_config(store: &StoreConfig) -> Self {
        Self::load(store.region.as_deref()).await
    }

    /// CloudWatch Logs adapter (log catalog and export API)
    pub fn cloudwatch_logs(&self) -> CloudWatchLogsClient {
        CloudWatchLogsClient::from_conf(&self.sdk_config)
    }

    /// Configuration table adapter
    pub fn config_store(&self, table_name: &str) -> DynamoDbConfigStore {
        DynamoDbConfigStore::from_conf(&self.sdk_config, table_name)
    }
}

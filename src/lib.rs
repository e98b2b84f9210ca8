// cwl-export - CloudWatch Logs to S3 export scheduling
// Copyright (c) 2025 cwl-export Contributors
// Licensed under the MIT License

//! # cwl-export - CloudWatch Logs to S3 export scheduling
//!
//! cwl-export maintains a DynamoDB table mapping CloudWatch log groups to S3
//! destinations, and turns that table into CloudWatch Logs export tasks on a
//! schedule.
//!
//! ## Overview
//!
//! Two components share nothing but the configuration table:
//! - **Registration** (`cwl-export register <TABLE>`) lists the account's log
//!   groups, lets an operator pick some by number, `all` or `/regex/`, asks
//!   for the bucket and prefix and writes one record per pick
//! - **Export** (`cwl-export export`) scans the table and requests one export
//!   task per record over a trailing time window, reporting a JSON response
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Selection, registration, export orchestration, pagination
//! - [`adapters`] - CloudWatch Logs and DynamoDB behind traits, plus in-memory doubles
//! - [`domain`] - Records, descriptors and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cwl_export::adapters::AwsClients;
//! use cwl_export::config::{load_config, resolve_config_path};
//! use cwl_export::core::export::ExportOrchestrator;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config(resolve_config_path(None).as_deref())?;
//!     let clients = AwsClients::from_store_config(&config.store).await;
//!
//!     let orchestrator = ExportOrchestrator::new(
//!         Arc::new(clients.config_store(&config.store.table_name)),
//!         Arc::new(clients.cloudwatch_logs()),
//!         &config.export,
//!     );
//!
//!     let response = orchestrator.handle(&serde_json::json!({})).await;
//!     println!("{}", serde_json::to_string(&response)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Testing Without AWS
//!
//! Every AWS call sits behind a trait in [`adapters::traits`];
//! [`adapters::memory`] implements them in memory:
//!
//! ```rust
//! use cwl_export::adapters::memory::{InMemoryConfigStore, RecordingExportApi};
//! use cwl_export::config::ExportConfig;
//! use cwl_export::core::export::ExportOrchestrator;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let orchestrator = ExportOrchestrator::new(
//!     Arc::new(InMemoryConfigStore::new()),
//!     Arc::new(RecordingExportApi::new()),
//!     &ExportConfig::default(),
//! );
//! let response = orchestrator.handle(&serde_json::json!({})).await;
//! assert_eq!(response.status_code, 200);
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library code returns [`domain::Result`] with [`domain::ExportToolError`];
//! the CLI layer maps failures to exit codes.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;

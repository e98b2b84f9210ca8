//! Integration tests for the register session and its hand-off to the
//! export orchestrator through a shared configuration store.

use cwl_export::adapters::memory::{InMemoryCatalog, InMemoryConfigStore, RecordingExportApi};
use cwl_export::cli::commands::register::run_registration;
use cwl_export::cli::{EXIT_INPUT, EXIT_OK};
use cwl_export::config::ExportConfig;
use cwl_export::core::export::ExportOrchestrator;
use cwl_export::core::selection::Console;
use cwl_export::domain::LogSourceDescriptor;
use chrono::{TimeZone, Utc};
use std::io::Cursor;
use std::sync::Arc;

fn catalog() -> InMemoryCatalog {
    let created = Utc.with_ymd_and_hms(2023, 11, 5, 0, 0, 0).unwrap();
    let sources = [
        "/aws/lambda/orders",
        "/aws/lambda/payments",
        "/ecs/web",
        "/aws/rds/cluster/main/postgresql",
    ]
    .into_iter()
    .enumerate()
    .map(|(i, name)| {
        LogSourceDescriptor::new(name)
            .with_stored_bytes((i as u64 + 1) * 1_048_576)
            .with_creation_time(created)
    })
    .collect();
    InMemoryCatalog::new(sources).with_page_size(3)
}

async fn register(input: &str, store: &InMemoryConfigStore) -> (i32, String) {
    let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    let code = run_registration(&mut console, &catalog(), store)
        .await
        .unwrap();
    (code, String::from_utf8(console.into_output()).unwrap())
}

#[tokio::test]
async fn test_listing_spans_catalog_pages() {
    let store = InMemoryConfigStore::new();
    let (_, output) = register("all\narchive\n\n", &store).await;

    assert!(output.contains("Fetching CloudWatch log groups..."));
    assert!(output.contains("  1. /aws/lambda/orders (1.00 MB, created: 2023-11-05)"));
    assert!(output.contains("  4. /aws/rds/cluster/main/postgresql (4.00 MB, created: 2023-11-05)"));
    assert_eq!(store.records().len(), 4);
}

#[tokio::test]
async fn test_pattern_selection_after_rejections() {
    let store = InMemoryConfigStore::new();
    let (code, output) = register(
        "9\n/lambda/\nn\n/^/aws/lambda//\ny\narchive\nlambda/\n",
        &store,
    )
    .await;

    assert_eq!(code, EXIT_OK);
    assert!(output.contains("Invalid selection: 9. Please enter numbers between 1 and 4"));
    assert_eq!(output.matches("Matched 2 log groups:").count(), 2);

    let names: Vec<_> = store
        .records()
        .into_iter()
        .map(|r| r.log_group_name)
        .collect();
    assert_eq!(names, vec!["/aws/lambda/orders", "/aws/lambda/payments"]);
}

#[tokio::test]
async fn test_reregistering_overwrites() {
    let store = InMemoryConfigStore::new();
    register("1\ny\nold-bucket\n\n", &store).await;
    register("1\ny\nnew-bucket\nfresh\n", &store).await;

    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].s3_bucket_name, "new-bucket");
    assert_eq!(records[0].s3_prefix.as_deref(), Some("fresh"));
}

#[tokio::test]
async fn test_stdin_closed_mid_selection() {
    let store = InMemoryConfigStore::new();
    let (code, _) = register("2,3\n", &store).await;
    assert_eq!(code, EXIT_INPUT);
    assert!(store.records().is_empty());
}

#[tokio::test]
async fn test_registered_groups_are_exported() {
    let store = Arc::new(InMemoryConfigStore::new());
    register("3,1\ny\narchive\n\n", &store).await;
    register("2\ny\narchive\npayments/\n", &store).await;

    let api = Arc::new(RecordingExportApi::new());
    let orchestrator = ExportOrchestrator::new(store, api.clone(), &ExportConfig::default());
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 1, 0, 0).unwrap();
    let response = orchestrator.run_at(now).await;

    assert_eq!(response.started_count(), 3);

    let prefixes: Vec<_> = api
        .requests()
        .into_iter()
        .map(|r| (r.log_group_name, r.destination_prefix))
        .collect();
    assert!(prefixes.contains(&(
        "/aws/lambda/orders".to_string(),
        "exports//aws/lambda/orders/2024-03-01".to_string()
    )));
    assert!(prefixes.contains(&(
        "/aws/lambda/payments".to_string(),
        "payments/".to_string()
    )));
}

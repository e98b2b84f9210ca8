//! DynamoDB configuration store adapter

pub mod client;
pub mod models;

pub use client::DynamoDbConfigStore;

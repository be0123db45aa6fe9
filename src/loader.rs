//! Dataset load boundary.
//!
//! Datasets are JSON arrays of [`Record`] objects, read from a local file or
//! fetched over HTTP. The full 2005-2025 series and the 2025 snapshot share
//! the schema and are loaded independently through the same functions.

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::fetch::{BasicClient, HttpClient, fetch_bytes, is_remote};
use crate::record::Record;

/// Decodes a JSON array of records.
///
/// # Errors
///
/// Returns an error if the bytes are not a JSON array of objects with the
/// record fields.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<Record>> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Reads the raw dataset from a local file path or fetches it over HTTP.
#[tracing::instrument(skip(client))]
pub async fn read_source<C: HttpClient>(client: &C, source: &str) -> Result<Vec<u8>> {
    if is_remote(source) {
        fetch_bytes(client, source).await
    } else {
        tokio::fs::read(source)
            .await
            .with_context(|| format!("failed to read dataset file {source}"))
    }
}

/// Loads and parses a dataset with the given client.
pub async fn load_records_with<C: HttpClient>(client: &C, source: &str) -> Result<Vec<Record>> {
    let bytes = read_source(client, source).await?;
    let records =
        parse_records(&bytes).with_context(|| format!("malformed dataset at {source}"))?;

    info!(source, records = records.len(), "Dataset loaded");
    Ok(records)
}

/// Loads and parses a dataset, fetching remote sources with a [`BasicClient`].
pub async fn load_records(source: &str) -> Result<Vec<Record>> {
    load_records_with(&BasicClient::new(), source).await
}

/// Loads a dataset, logging any failure and falling back to an empty
/// collection so downstream aggregates come out empty instead of failing.
pub async fn load_records_or_empty(source: &str) -> Vec<Record> {
    match load_records(source).await {
        Ok(records) => records,
        Err(e) => {
            error!(source, error = %format!("{e:#}"), "Dataset load failed, continuing with no records");
            Vec::new()
        }
    }
}

//! Seed Module
//!
//! Loads a fixed catalog batch into the store.
//!
//! ## Workflow
//! 1. **Source**: The built-in catalog embedded in the binary, or a JSON array file.
//! 2. **Replace**: Existing records are deleted and the batch is inserted with fresh ids.
//! 3. **Report**: The inserted records are returned so callers can log or inspect them.

use crate::model::types::{Institution, NewInstitution};
use crate::storage::repository::InstitutionRepository;

use anyhow::{Context, Result};
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("escolas.json");

/// The catalog shipped with the application.
pub fn builtin_catalog() -> Result<Vec<NewInstitution>> {
    serde_json::from_str(BUILTIN_CATALOG).context("Built-in catalog is malformed")
}

/// Reads a seed batch from a JSON array file.
pub async fn load_batch(path: &Path) -> Result<Vec<NewInstitution>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;

    serde_json::from_str(&contents)
        .with_context(|| format!("Seed file {} is not a valid batch", path.display()))
}

/// Replaces the whole collection with `batch`.
pub async fn run_seed<R>(store: &R, batch: Vec<NewInstitution>) -> Result<Vec<Institution>>
where
    R: InstitutionRepository,
{
    let previous = store.count().await?;
    tracing::info!(
        "Clearing {} existing records and inserting {} new ones",
        previous,
        batch.len()
    );

    let inserted = store.replace_all(batch).await.context("Seeding failed")?;

    tracing::info!("Seed complete: {} records inserted", inserted.len());
    Ok(inserted)
}

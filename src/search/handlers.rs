use super::engine::search;
use super::types::ListParams;
use crate::error::ApiError;
use crate::model::types::Institution;
use crate::storage::repository::InstitutionRepository;
use axum::extract::Query;
use axum::{Extension, Json};
use std::sync::Arc;

/// `GET /escolas?tipo=&q=`: type pre-filter in the store, then the text filter in memory.
pub async fn handle_list<R>(
    Query(params): Query<ListParams>,
    Extension(store): Extension<Arc<R>>,
) -> Result<Json<Vec<Institution>>, ApiError>
where
    R: InstitutionRepository,
{
    if let Some(kind) = params.kind() {
        tracing::info!("Filtering by type {:?}", kind.label());
    }
    if let Some(q) = params.query() {
        tracing::info!("Searching for {:?}", q);
    }

    let candidates = store.find(&params.filter()).await.map_err(|e| {
        tracing::error!("Failed to list institutions: {}", e);
        ApiError::ListFailed(e)
    })?;

    let results = match params.query() {
        Some(q) => search(q, candidates),
        None => candidates,
    };

    tracing::info!("Found {} institutions", results.len());
    Ok(Json(results))
}

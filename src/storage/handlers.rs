use axum::{
    Json,
    extract::{Extension, Path, rejection::PathRejection},
};
use std::sync::Arc;

use super::protocol::HealthResponse;
use super::repository::InstitutionRepository;
use crate::error::ApiError;
use crate::model::id::InstitutionId;
use crate::model::types::Institution;

pub async fn handle_get_by_id<R>(
    Extension(store): Extension<Arc<R>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Institution>, ApiError>
where
    R: InstitutionRepository,
{
    // Undecodable segments (e.g. invalid UTF-8) get the same 400 body as malformed ids.
    let raw_id = match path {
        Ok(Path(raw_id)) => raw_id,
        Err(rejection) => {
            tracing::warn!("Lookup with undecodable id: {}", rejection.body_text());
            return Err(ApiError::InvalidId(rejection.body_text()));
        }
    };

    let id: InstitutionId = match raw_id.parse() {
        Ok(id) => id,
        Err(_) => {
            tracing::warn!("Lookup with malformed id {:?}", raw_id);
            return Err(ApiError::InvalidId(raw_id));
        }
    };

    tracing::info!("Fetching institution {}", id);

    match store.find_by_id(&id).await {
        Ok(Some(institution)) => {
            tracing::info!("Found institution {:?}", institution.name);
            Ok(Json(institution))
        }
        Ok(None) => {
            tracing::warn!("Institution {} not found", id);
            Err(ApiError::NotFound(raw_id))
        }
        Err(e) => {
            tracing::error!("Failed to fetch institution {}: {}", id, e);
            Err(ApiError::DetailFailed(e))
        }
    }
}

pub async fn handle_health<R>(
    Extension(store): Extension<Arc<R>>,
) -> Result<Json<HealthResponse>, ApiError>
where
    R: InstitutionRepository,
{
    let records = store.count().await.map_err(|e| {
        tracing::error!("Health check failed: {}", e);
        ApiError::ListFailed(e)
    })?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        records,
    }))
}

use crate::model::types::{Institution, InstitutionType};
use crate::search::types::ListParams;
use crate::storage::partitioner::{Categories, partition_by_type};
use crate::storage::protocol::{ENDPOINT_INSTITUTIONS, ErrorResponse};

use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Typed client for the catalog API. Requests are never retried.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /escolas`, with optional type filter and text query.
    pub async fn list(
        &self,
        kind: Option<&InstitutionType>,
        query: Option<&str>,
    ) -> Result<Vec<Institution>, ClientError> {
        let params = ListParams {
            tipo: kind.map(|kind| kind.label().to_string()),
            q: query.map(str::to_string),
        };

        let response = self
            .http_client
            .get(format!("{}{}", self.base_url, ENDPOINT_INSTITUTIONS))
            .query(&params)
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Institution>, ClientError> {
        self.list(None, Some(query)).await
    }

    /// `GET /escolas/:id`.
    pub async fn get(&self, id: &str) -> Result<Institution, ClientError> {
        let response = self
            .http_client
            .get(format!("{}{}/{}", self.base_url, ENDPOINT_INSTITUTIONS, id))
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Fetches the whole catalog and splits it into the category buckets.
    pub async fn categories(&self) -> Result<Categories, ClientError> {
        let all = self.list(None, None).await?;
        tracing::debug!("Received {} institutions for categories", all.len());
        Ok(partition_by_type(all))
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };

    Err(match status {
        StatusCode::BAD_REQUEST => ClientError::BadRequest(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        _ => ClientError::Server {
            status: status.as_u16(),
            message,
        },
    })
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::storage::protocol::{
    ErrorResponse, MSG_DETAIL_FAILED, MSG_INVALID_ID, MSG_LIST_FAILED, MSG_NOT_FOUND,
};
use crate::storage::repository::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{}", MSG_INVALID_ID)]
    InvalidId(String),

    #[error("{}", MSG_NOT_FOUND)]
    NotFound(String),

    #[error("{}", MSG_LIST_FAILED)]
    ListFailed(#[source] StoreError),

    #[error("{}", MSG_DETAIL_FAILED)]
    DetailFailed(#[source] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ListFailed(_) | ApiError::DetailFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            message: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

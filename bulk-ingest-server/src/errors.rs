use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bulk_ingest_pipeline::RequestError;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// Errors returned from the HTTP handlers.
///
/// Each variant maps to a status code and a `{"error": "..."}` body.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Request(#[from] RequestError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Request(RequestError::IndexNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Request(RequestError::Decode(_)) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        warn!(status = %status, error = %message, "Bulk request rejected");
        (status, Json(json!({ "error": message }))).into_response()
    }
}

//! REST API module for HTTP endpoints
//!
//! - `POST /api/ingest/ball` - Ingest one ball event
//! - `GET /api/match/:match_id/live` - Most recent balls of a match
//! - `GET /api/match/:match_id/patterns` - Patterns recorded for a match
//! - `GET /api/patterns/:granularity` - Signature counts
//! - `GET /api/stats` - Store row counts

pub mod ingest;
pub mod matches;
pub mod patterns;
pub mod stats;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::store::StoreResult;

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ApiError {
    /// Opaque 500 `{"error":"failed"}`
    pub fn failed() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: "failed".to_string(),
            detail: None,
        }
    }

    pub fn invalid_payload(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            error: "invalid payload".to_string(),
            detail: Some(detail.into()),
        }
    }

    pub fn invalid_transition(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            error: "invalid transition".to_string(),
            detail: Some(detail.into()),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: "bad request".to_string(),
            detail: Some(detail.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Run a store call off the async runtime
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            error!(error = %e, "store call failed");
            Err(ApiError::failed())
        }
        Err(e) => {
            error!(error = %e, "blocking task failed");
            Err(ApiError::failed())
        }
    }
}

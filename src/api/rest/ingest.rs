//! Ingestion endpoint

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use super::ApiError;
use crate::api::state::AppState;
use crate::ingest::{IngestError, IngestOutcome};
use crate::types::BallPayload;

/// Response for a successful ingestion
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub success: bool,
    #[serde(flatten)]
    pub outcome: IngestOutcome,
}

/// POST /api/ingest/ball - Persist one ball and run triggered detections
pub async fn ingest_ball(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BallPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return ApiError::invalid_payload(rejection.body_text()).into_response(),
    };

    let service = state.ingest.clone();
    let result = tokio::task::spawn_blocking(move || service.ingest(payload)).await;

    match result {
        Ok(Ok(outcome)) => (
            StatusCode::OK,
            Json(IngestResponse {
                success: true,
                outcome,
            }),
        )
            .into_response(),
        Ok(Err(IngestError::Validation(detail))) => {
            ApiError::invalid_payload(detail).into_response()
        }
        Ok(Err(IngestError::Transition(e))) => {
            ApiError::invalid_transition(e.to_string()).into_response()
        }
        Ok(Err(IngestError::Store(e))) => {
            error!(error = %e, "ingest failed");
            ApiError::failed().into_response()
        }
        Err(e) => {
            error!(error = %e, "ingest task failed");
            ApiError::failed().into_response()
        }
    }
}

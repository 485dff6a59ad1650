//! Match endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use super::{blocking, ApiError};
use crate::api::state::AppState;
use crate::types::{MatchPatterns, MatchPhase, StoredBall};

/// Response for GET /api/match/:match_id/live
#[derive(Debug, Serialize)]
pub struct LiveResponse {
    pub balls: Vec<StoredBall>,
    /// `None` until the match's first ball
    pub phase: Option<MatchPhase>,
}

/// GET /api/match/:match_id/live - Most recently inserted balls, newest first
pub async fn live_balls(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.clone();
    let limit = state.live_limit;
    let (balls, phase) = blocking(move || {
        let balls = store.recent_balls(&match_id, limit)?;
        Ok((balls, store.match_phase(&match_id)?))
    })
    .await?;
    Ok(Json(LiveResponse { balls, phase }))
}

/// GET /api/match/:match_id/patterns - Every occurrence recorded for the match
pub async fn match_patterns(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<String>,
) -> Result<Json<MatchPatterns>, ApiError> {
    let store = state.store.clone();
    let patterns = blocking(move || store.patterns_for_match(&match_id)).await?;
    Ok(Json(patterns))
}

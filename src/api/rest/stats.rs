//! Stats endpoint

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use super::{blocking, ApiError};
use crate::api::state::AppState;
use crate::store::StoreStats;
use crate::utils::current_timestamp;

/// Response for GET /api/stats
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: StoreStats,
    pub uptime_secs: u64,
    pub generated_at: i64,
}

/// GET /api/stats - Row counts across the store
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, ApiError> {
    let store = state.store.clone();
    let stats = blocking(move || store.stats()).await?;

    Ok(Json(StatsResponse {
        stats,
        uptime_secs: state.uptime_secs(),
        generated_at: current_timestamp(),
    }))
}

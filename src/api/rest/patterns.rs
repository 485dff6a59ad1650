//! Pattern count endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{blocking, ApiError};
use crate::api::state::AppState;
use crate::types::{Granularity, PatternCount};

/// Query parameters for GET /api/patterns/:granularity
#[derive(Debug, Deserialize)]
pub struct PatternParams {
    /// Exact signature to look up
    pub signature: Option<String>,
    /// Number of top signatures (default: 10, max: 100)
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

/// Most frequent signatures of one granularity
#[derive(Debug, Serialize)]
pub struct TopPatterns {
    pub granularity: Granularity,
    pub patterns: Vec<PatternCount>,
}

/// GET /api/patterns/:granularity - Count for a signature, or the top signatures
pub async fn get_patterns(
    State(state): State<Arc<AppState>>,
    Path(granularity): Path<String>,
    Query(params): Query<PatternParams>,
) -> Result<Response, ApiError> {
    let Some(granularity) = Granularity::parse(&granularity) else {
        return Err(ApiError::bad_request(format!(
            "unknown granularity '{}', expected over, innings or match",
            granularity
        )));
    };

    let store = state.store.clone();
    match params.signature {
        Some(signature) => {
            let count = blocking(move || store.pattern_count(granularity, &signature)).await?;
            Ok(Json(count).into_response())
        }
        None => {
            let limit = params.limit.clamp(1, 100);
            let patterns = blocking(move || store.top_patterns(granularity, limit)).await?;
            Ok(Json(TopPatterns {
                granularity,
                patterns,
            })
            .into_response())
        }
    }
}

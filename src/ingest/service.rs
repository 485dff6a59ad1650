//! Ingestion Service
//!
//! Accepts one ball payload, persists it and runs the detections it
//! triggers. Order of work:
//!
//! 1. validate the payload
//! 2. in one store transaction: read the phase, check for a duplicate
//!    (when deduplication is on), check the lifecycle transition (when
//!    enforced), insert and store the new phase
//! 3. over / innings / match detection

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::triggers::Triggers;
use crate::detector::PatternDetector;
use crate::store::{BallWrite, Store, StoreError};
use crate::types::{BallPayload, MatchPhase, PatternMatch, TransitionError};

/// Ingestion behavior switches
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Treat a repeated (match_id, ball_number) as already ingested
    pub dedupe_balls: bool,
    /// Reject statuses that are impossible for the match's phase
    pub enforce_lifecycle: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            dedupe_balls: true,
            enforce_lifecycle: true,
        }
    }
}

/// Result type for ingestion
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors that can occur while ingesting a ball
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("invalid payload: {0}")]
    Validation(String),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What happened to an ingested ball
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestOutcome {
    pub ball_id: i64,
    pub duplicate: bool,
    pub phase: MatchPhase,
    pub patterns: Vec<PatternMatch>,
}

/// Ball ingestion over a shared store
#[derive(Clone)]
pub struct IngestService {
    store: Arc<Store>,
    detector: PatternDetector,
    config: IngestConfig,
}

impl IngestService {
    pub fn new(store: Arc<Store>, config: IngestConfig) -> Self {
        let detector = PatternDetector::new(store.clone());
        Self {
            store,
            detector,
            config,
        }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Ingest one ball
    pub fn ingest(&self, payload: BallPayload) -> IngestResult<IngestOutcome> {
        let (ball, status) = payload.validate().map_err(IngestError::Validation)?;

        let write = self.store.record_ball(
            &ball,
            &status,
            self.config.dedupe_balls,
            self.config.enforce_lifecycle,
        )?;
        let (ball_id, next) = match write {
            BallWrite::Duplicate { id, phase } => {
                debug!(
                    match_id = %ball.match_id,
                    ball_number = ball.ball_number,
                    "duplicate ball ignored"
                );
                return Ok(duplicate(id, phase));
            }
            BallWrite::Rejected(err) => {
                warn!(
                    match_id = %ball.match_id,
                    ball_number = ball.ball_number,
                    error = %err,
                    "rejected ball"
                );
                return Err(err.into());
            }
            BallWrite::Inserted {
                id,
                phase,
                violation,
            } => {
                if let Some(err) = violation {
                    warn!(match_id = %ball.match_id, error = %err, "lifecycle violation accepted");
                }
                (id, phase)
            }
        };

        info!(
            match_id = %ball.match_id,
            ball_number = ball.ball_number,
            runs = ball.runs,
            status = %status,
            phase = %next,
            "ball ingested"
        );

        let triggers = Triggers::for_ball(ball.ball_number, &status);
        let mut patterns = Vec::new();

        if let Some(over) = triggers.over {
            if let Some(found) = self.detector.detect_over(&ball.match_id, over)? {
                patterns.push(found);
            }
        }
        if triggers.innings {
            patterns.push(self.detector.detect_innings(&ball.match_id)?);
        }
        if triggers.full_match {
            patterns.push(self.detector.detect_match(&ball.match_id)?);
        }

        Ok(IngestOutcome {
            ball_id,
            duplicate: false,
            phase: next,
            patterns,
        })
    }
}

fn duplicate(ball_id: i64, phase: MatchPhase) -> IngestOutcome {
    IngestOutcome {
        ball_id,
        duplicate: true,
        phase,
        patterns: Vec::new(),
    }
}

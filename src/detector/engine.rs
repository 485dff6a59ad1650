//! Pattern Detector
//!
//! Rebuilds the ordered run sequence for a window, turns it into a
//! signature and records the occurrence. Counts are global: the question
//! answered is "has this exact sequence happened before anywhere".

use std::sync::Arc;

use tracing::{debug, info};

use super::signature::signature;
use crate::store::{Store, StoreResult};
use crate::types::{over_window, BallEvent, Granularity, PatternMatch, BALLS_PER_OVER};

/// Detects over, innings and match patterns against a [`Store`]
#[derive(Clone)]
pub struct PatternDetector {
    store: Arc<Store>,
}

impl PatternDetector {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Detect the pattern of a completed over.
    ///
    /// Returns `Ok(None)` without writing anything when the over has fewer
    /// than six stored balls.
    pub fn detect_over(
        &self,
        match_id: &str,
        over_number: u32,
    ) -> StoreResult<Option<PatternMatch>> {
        if over_number == 0 {
            return Ok(None);
        }

        let (first, last) = over_window(over_number);
        let balls = self.store.balls_in_range(match_id, first, last)?;
        if balls.len() < BALLS_PER_OVER as usize {
            debug!(match_id, over_number, balls = balls.len(), "over incomplete, skipping");
            return Ok(None);
        }

        let sig = signature(runs_of(&balls));
        let found = self
            .store
            .record_pattern(Granularity::Over, match_id, Some(over_number), &sig)?;
        log_match(&found);
        Ok(Some(found))
    }

    /// Detect the pattern of every ball recorded so far for the match
    pub fn detect_innings(&self, match_id: &str) -> StoreResult<PatternMatch> {
        self.detect_whole(Granularity::Innings, match_id)
    }

    /// Same window as [`PatternDetector::detect_innings`], counted separately
    pub fn detect_match(&self, match_id: &str) -> StoreResult<PatternMatch> {
        self.detect_whole(Granularity::Match, match_id)
    }

    fn detect_whole(&self, granularity: Granularity, match_id: &str) -> StoreResult<PatternMatch> {
        let balls = self.store.all_balls(match_id)?;
        let sig = signature(runs_of(&balls));
        let found = self.store.record_pattern(granularity, match_id, None, &sig)?;
        log_match(&found);
        Ok(found)
    }
}

fn runs_of(balls: &[BallEvent]) -> impl Iterator<Item = i32> + '_ {
    balls.iter().map(|b| b.runs)
}

fn log_match(found: &PatternMatch) {
    info!(
        granularity = %found.granularity,
        match_id = %found.match_id,
        over_number = ?found.over_number,
        signature = %found.signature,
        prior_count = found.prior_count,
        "pattern recorded"
    );
}

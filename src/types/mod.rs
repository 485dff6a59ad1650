//! Data types for the cricket pattern server
//!
//! Ball events, the ingestion payload, patterns and the match lifecycle.

mod ball;
mod card;
mod pattern;
mod status;

pub use ball::{BallEvent, BallPayload, StoredBall, DEFAULT_STATUS, MAX_RUNS, MIN_RUNS};
pub use card::{parse_runs_display, Card, WICKET_RUNS};
pub use pattern::{
    over_window, Granularity, MatchPatterns, PatternCount, PatternMatch, PatternRecord,
    BALLS_PER_OVER,
};
pub use status::{MatchPhase, MatchStatus, TransitionError, COMPLETED, INNINGS_BREAK};

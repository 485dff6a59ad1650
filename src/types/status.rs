//! Match status and lifecycle
//!
//! The producer sends a free-form `match_status` string with every ball.
//! Two values are sentinels; everything else means play is in progress.
//! `MatchPhase` tracks where a match is and rejects impossible moves.

use serde::{Deserialize, Serialize};

/// Sentinel status sent when the first innings has finished
pub const INNINGS_BREAK: &str = "INNINGS_BREAK";

/// Sentinel status sent when the match is over
pub const COMPLETED: &str = "COMPLETED";

/// Status carried by a single ingestion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchStatus {
    /// Any non-sentinel value, kept verbatim
    Live(String),
    InningsBreak,
    Completed,
}

impl MatchStatus {
    /// Parse a raw status string. Sentinels match case-insensitively.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case(INNINGS_BREAK) {
            MatchStatus::InningsBreak
        } else if trimmed.eq_ignore_ascii_case(COMPLETED) {
            MatchStatus::Completed
        } else {
            MatchStatus::Live(trimmed.to_string())
        }
    }

    pub fn is_innings_break(&self) -> bool {
        matches!(self, MatchStatus::InningsBreak)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, MatchStatus::Completed)
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Live(raw) if raw.is_empty() => write!(f, "LIVE"),
            MatchStatus::Live(raw) => write!(f, "{}", raw),
            MatchStatus::InningsBreak => write!(f, "{}", INNINGS_BREAK),
            MatchStatus::Completed => write!(f, "{}", COMPLETED),
        }
    }
}

/// Lifecycle phase of a match, persisted per match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    #[default]
    FirstInnings,
    InningsBreak,
    SecondInnings,
    Completed,
}

/// Rejected lifecycle move
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot apply status {status} to a match in phase {from}")]
pub struct TransitionError {
    pub from: MatchPhase,
    pub status: String,
}

impl MatchPhase {
    /// Apply a request status to the current phase.
    pub fn advance(self, status: &MatchStatus) -> Result<MatchPhase, TransitionError> {
        use MatchPhase::*;

        let next = match (self, status) {
            (FirstInnings, MatchStatus::Live(_)) => Some(FirstInnings),
            (FirstInnings, MatchStatus::InningsBreak) => Some(InningsBreak),
            (InningsBreak, MatchStatus::Live(_)) => Some(SecondInnings),
            (InningsBreak, MatchStatus::InningsBreak) => Some(InningsBreak),
            (SecondInnings, MatchStatus::Live(_)) => Some(SecondInnings),
            (SecondInnings, MatchStatus::InningsBreak) => None,
            (Completed, MatchStatus::Completed) => Some(Completed),
            (Completed, _) => None,
            (_, MatchStatus::Completed) => Some(Completed),
        };

        next.ok_or_else(|| TransitionError {
            from: self,
            status: status.to_string(),
        })
    }

    /// Stable storage label
    pub fn as_str(self) -> &'static str {
        match self {
            MatchPhase::FirstInnings => "first_innings",
            MatchPhase::InningsBreak => "innings_break",
            MatchPhase::SecondInnings => "second_innings",
            MatchPhase::Completed => "completed",
        }
    }

    /// Inverse of [`MatchPhase::as_str`]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "first_innings" => Some(MatchPhase::FirstInnings),
            "innings_break" => Some(MatchPhase::InningsBreak),
            "second_innings" => Some(MatchPhase::SecondInnings),
            "completed" => Some(MatchPhase::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for MatchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

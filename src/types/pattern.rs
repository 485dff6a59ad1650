//! Pattern types
//!
//! A pattern is the signature of a run sequence at one granularity.
//! Counts are kept per (granularity, signature) across all matches.

use serde::{Deserialize, Serialize};

/// Balls per over
pub const BALLS_PER_OVER: u32 = 6;

/// Window a signature is computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Over,
    Innings,
    Match,
}

impl Granularity {
    pub const ALL: [Granularity; 3] = [Granularity::Over, Granularity::Innings, Granularity::Match];

    /// Table holding the occurrence rows for this granularity
    pub fn table(self) -> &'static str {
        match self {
            Granularity::Over => "over_patterns",
            Granularity::Innings => "innings_patterns",
            Granularity::Match => "match_patterns",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Over => "over",
            Granularity::Innings => "innings",
            Granularity::Match => "match",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "over" | "overs" => Some(Granularity::Over),
            "innings" => Some(Granularity::Innings),
            "match" | "matches" => Some(Granularity::Match),
            _ => None,
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded occurrence of a signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRecord {
    pub id: i64,
    pub match_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub over_number: Option<u32>,
    pub signature: String,
    pub created_at: String,
}

/// Result of a detection: the occurrence just recorded and what came before it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMatch {
    pub granularity: Granularity,
    pub match_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub over_number: Option<u32>,
    pub signature: String,
    /// Occurrences recorded before this one, across all matches
    pub prior_count: u64,
    /// When the most recent prior occurrence was recorded
    pub last_seen_at: Option<String>,
    /// Match of the most recent prior occurrence
    pub last_match_id: Option<String>,
}

/// Aggregate count for one signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternCount {
    pub granularity: Granularity,
    pub signature: String,
    pub occurrences: u64,
    pub last_seen_at: Option<String>,
    pub last_match_id: Option<String>,
}

impl PatternCount {
    /// Count for a signature that has never been recorded
    pub fn unseen(granularity: Granularity, signature: impl Into<String>) -> Self {
        Self {
            granularity,
            signature: signature.into(),
            occurrences: 0,
            last_seen_at: None,
            last_match_id: None,
        }
    }
}

/// Every recorded occurrence for one match, grouped by granularity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPatterns {
    pub overs: Vec<PatternRecord>,
    pub innings: Vec<PatternRecord>,
    pub matches: Vec<PatternRecord>,
}

/// First and last ball number (inclusive) of a 1-based over
pub fn over_window(over_number: u32) -> (u32, u32) {
    let first = (over_number.saturating_sub(1)) * BALLS_PER_OVER + 1;
    (first, over_number * BALLS_PER_OVER)
}

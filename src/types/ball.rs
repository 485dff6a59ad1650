//! Ball events and the ingestion payload

use serde::{Deserialize, Deserializer, Serialize};

use super::card::{parse_runs_display, Card};
use super::status::MatchStatus;

/// Lowest accepted run value (wicket)
pub const MIN_RUNS: i32 = -1;

/// Highest accepted run value (runs plus extras)
pub const MAX_RUNS: i32 = 12;

/// One delivery, as stored. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallEvent {
    pub match_id: String,
    pub timestamp: String,
    pub ball_number: u32,
    pub runs: i32,
    #[serde(default)]
    pub is_four: bool,
    #[serde(default)]
    pub is_six: bool,
    #[serde(default)]
    pub is_wicket: bool,
    #[serde(default)]
    pub is_dot: bool,
}

/// A stored ball together with its insertion identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredBall {
    pub id: i64,
    #[serde(flatten)]
    pub ball: BallEvent,
    pub received_at: String,
    /// Label of the card that scores `runs`, when one exists
    pub card: Option<String>,
}

impl StoredBall {
    pub fn new(id: i64, ball: BallEvent, received_at: String) -> Self {
        let card = Card::from_runs(ball.runs).map(|c| c.label().to_string());
        Self {
            id,
            ball,
            received_at,
            card,
        }
    }
}

/// Body of `POST /api/ingest/ball`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallPayload {
    pub match_id: String,
    #[serde(default = "crate::utils::now_rfc3339")]
    pub timestamp: String,
    pub ball_number: i64,
    #[serde(deserialize_with = "deserialize_runs")]
    pub runs: i32,
    #[serde(default)]
    pub is_four: bool,
    #[serde(default)]
    pub is_six: bool,
    #[serde(default)]
    pub is_wicket: bool,
    #[serde(default)]
    pub is_dot: bool,
    /// Missing or `null` means play is in progress
    #[serde(default)]
    pub match_status: Option<String>,
}

/// Status assumed when the producer sends none
pub const DEFAULT_STATUS: &str = "LIVE";

/// Accept `4`, `"4"` or a wicket marker such as `"W"`.
fn deserialize_runs<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RunsValue {
        Number(i64),
        Text(String),
    }

    match RunsValue::deserialize(deserializer)? {
        RunsValue::Number(n) => i32::try_from(n)
            .map_err(|_| serde::de::Error::custom(format!("runs out of range: {}", n))),
        RunsValue::Text(text) => parse_runs_display(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognised runs value '{}'", text))),
    }
}

impl BallPayload {
    /// Check the payload and split it into the stored event and its status.
    pub fn validate(self) -> Result<(BallEvent, MatchStatus), String> {
        let match_id = self.match_id.trim().to_string();
        if match_id.is_empty() {
            return Err("match_id must not be empty".to_string());
        }
        if self.ball_number < 1 || self.ball_number > u32::MAX as i64 {
            return Err(format!(
                "ball_number must be a positive integer, got {}",
                self.ball_number
            ));
        }
        if !(MIN_RUNS..=MAX_RUNS).contains(&self.runs) {
            return Err(format!(
                "runs must be between {} and {}, got {}",
                MIN_RUNS, MAX_RUNS, self.runs
            ));
        }

        let raw_status = self.match_status.as_deref().unwrap_or(DEFAULT_STATUS);
        let status = MatchStatus::parse(raw_status);
        let event = BallEvent {
            match_id,
            timestamp: self.timestamp,
            ball_number: self.ball_number as u32,
            runs: self.runs,
            is_four: self.is_four,
            is_six: self.is_six,
            is_wicket: self.is_wicket,
            is_dot: self.is_dot,
        };
        Ok((event, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> BallPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_runs_from_number_or_text() {
        let p = payload(json!({"match_id": "M1", "ball_number": 1, "runs": 4}));
        assert_eq!(p.runs, 4);
        let p = payload(json!({"match_id": "M1", "ball_number": 1, "runs": "6"}));
        assert_eq!(p.runs, 6);
        let p = payload(json!({"match_id": "M1", "ball_number": 1, "runs": "W"}));
        assert_eq!(p.runs, -1);
    }

    #[test]
    fn test_unknown_runs_text_is_rejected() {
        let result = serde_json::from_value::<BallPayload>(
            json!({"match_id": "M1", "ball_number": 1, "runs": "?"}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults() {
        let p = payload(json!({"match_id": "M1", "ball_number": 3, "runs": 0}));
        assert_eq!(p.match_status, None);
        assert!(!p.timestamp.is_empty());
        assert!(!p.is_dot);
    }

    #[test]
    fn test_null_status_reads_as_live() {
        let p = payload(json!({
            "match_id": "M1",
            "ball_number": 2,
            "runs": "ww",
            "is_wicket": true,
            "match_status": null
        }));
        assert_eq!(p.match_status, None);
        let (ball, status) = p.validate().unwrap();
        assert_eq!(ball.runs, -1);
        assert_eq!(status, MatchStatus::Live("LIVE".to_string()));
    }

    #[test]
    fn test_validate_splits_status() {
        let p = payload(json!({
            "match_id": " M1 ",
            "timestamp": "2025-01-01T10:00:00",
            "ball_number": 30,
            "runs": 1,
            "match_status": "COMPLETED"
        }));
        let (ball, status) = p.validate().unwrap();
        assert_eq!(ball.match_id, "M1");
        assert_eq!(ball.ball_number, 30);
        assert_eq!(status, MatchStatus::Completed);
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let p = payload(json!({"match_id": "", "ball_number": 1, "runs": 1}));
        assert!(p.validate().is_err());
        let p = payload(json!({"match_id": "M1", "ball_number": 0, "runs": 1}));
        assert!(p.validate().is_err());
        let p = payload(json!({"match_id": "M1", "ball_number": 1, "runs": 40}));
        assert!(p.validate().is_err());
    }
}

//! Store Statistics
//!
//! Provides row counts for the ball and pattern tables:
//! - Ball events and distinct matches
//! - Occurrence rows per granularity
//! - Distinct signatures per granularity

use rusqlite::{params, Connection};
use serde::Serialize;

use super::sqlite::StoreResult;
use crate::types::Granularity;

/// Statistics about the Store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Total ball rows, duplicates included
    pub ball_events: u64,
    /// Distinct match ids with at least one ball
    pub matches: u64,
    pub over_patterns: u64,
    pub innings_patterns: u64,
    pub match_patterns: u64,
    /// Distinct over signatures ever recorded
    pub distinct_over_signatures: u64,
    pub distinct_innings_signatures: u64,
    pub distinct_match_signatures: u64,
}

impl StoreStats {
    /// Occurrence rows across all granularities
    pub fn total_patterns(&self) -> u64 {
        self.over_patterns + self.innings_patterns + self.match_patterns
    }
}

pub(super) fn collect(conn: &Connection) -> StoreResult<StoreStats> {
    let mut stats = StoreStats {
        ball_events: count(conn, "SELECT COUNT(*) FROM ball_events")?,
        matches: count(conn, "SELECT COUNT(DISTINCT match_id) FROM ball_events")?,
        ..Default::default()
    };

    for granularity in Granularity::ALL {
        let rows = count(conn, &format!("SELECT COUNT(*) FROM {}", granularity.table()))?;
        let distinct: i64 = conn.query_row(
            "SELECT COUNT(*) FROM pattern_counts WHERE granularity = ?1",
            params![granularity.as_str()],
            |row| row.get(0),
        )?;
        let distinct = distinct.max(0) as u64;

        match granularity {
            Granularity::Over => {
                stats.over_patterns = rows;
                stats.distinct_over_signatures = distinct;
            }
            Granularity::Innings => {
                stats.innings_patterns = rows;
                stats.distinct_innings_signatures = distinct;
            }
            Granularity::Match => {
                stats.match_patterns = rows;
                stats.distinct_match_signatures = distinct;
            }
        }
    }

    Ok(stats)
}

fn count(conn: &Connection, sql: &str) -> StoreResult<u64> {
    let n: i64 = conn.query_row(sql, [], |row| row.get(0))?;
    Ok(n.max(0) as u64)
}

#[cfg(test)]
mod tests {
    use crate::store::Store;
    use crate::types::{BallEvent, Granularity, MatchStatus};

    #[test]
    fn test_stats_counts_rows() {
        let store = Store::open_in_memory().unwrap();
        for (match_id, n) in [("M1", 1), ("M1", 2), ("M2", 1)] {
            let ball = BallEvent {
                match_id: match_id.to_string(),
                timestamp: "t".to_string(),
                ball_number: n,
                runs: 1,
                is_four: false,
                is_six: false,
                is_wicket: false,
                is_dot: false,
            };
            store
                .record_ball(&ball, &MatchStatus::parse("LIVE"), true, false)
                .unwrap();
        }
        store
            .record_pattern(Granularity::Match, "M1", None, "1-1")
            .unwrap();
        store
            .record_pattern(Granularity::Match, "M2", None, "1-1")
            .unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.ball_events, 3);
        assert_eq!(stats.matches, 2);
        assert_eq!(stats.match_patterns, 2);
        assert_eq!(stats.distinct_match_signatures, 1);
        assert_eq!(stats.total_patterns(), 2);
    }
}

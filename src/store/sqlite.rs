//! Store - SQLite persistence for ball events and patterns
//!
//! Ball events are append-only. Pattern occurrences are append-only too;
//! `pattern_counts` keeps the running total per signature so that reading
//! the prior count and recording a new occurrence happen in one transaction.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};

use super::stats::{self, StoreStats};
use crate::types::{
    BallEvent, Granularity, MatchPatterns, MatchPhase, MatchStatus, PatternCount, PatternMatch,
    PatternRecord, StoredBall, TransitionError,
};
use crate::utils::now_rfc3339;

/// Path that opens a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

/// Configuration for the Store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file, or `:memory:`
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/cricket.sqlite"),
        }
    }
}

impl StoreConfig {
    /// Create config with custom database path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == IN_MEMORY
    }
}

/// Result type for Store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in Store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

/// Outcome of [`Store::record_ball`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BallWrite {
    /// Stored under `id`; `violation` is set when an invalid transition was
    /// let through because the lifecycle is not enforced
    Inserted {
        id: i64,
        phase: MatchPhase,
        violation: Option<TransitionError>,
    },
    /// The (match_id, ball_number) pair already existed; nothing written
    Duplicate { id: i64, phase: MatchPhase },
    /// The status is impossible for the match's phase; nothing written
    Rejected(TransitionError),
}

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS ball_events (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        match_id TEXT NOT NULL,
        timestamp TEXT NOT NULL,
        ball_number INTEGER NOT NULL,
        runs INTEGER NOT NULL,
        is_four INTEGER NOT NULL DEFAULT 0,
        is_six INTEGER NOT NULL DEFAULT 0,
        is_wicket INTEGER NOT NULL DEFAULT 0,
        is_dot INTEGER NOT NULL DEFAULT 0,
        received_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_ball_events_match ON ball_events(match_id, ball_number);

    CREATE TABLE IF NOT EXISTS over_patterns (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        match_id TEXT NOT NULL,
        over_number INTEGER NOT NULL,
        over_signature TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_over_patterns_match ON over_patterns(match_id);

    CREATE TABLE IF NOT EXISTS innings_patterns (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        match_id TEXT NOT NULL,
        signature TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_innings_patterns_match ON innings_patterns(match_id);

    CREATE TABLE IF NOT EXISTS match_patterns (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        match_id TEXT NOT NULL,
        signature TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_match_patterns_match ON match_patterns(match_id);

    CREATE TABLE IF NOT EXISTS pattern_counts (
        granularity TEXT NOT NULL,
        signature TEXT NOT NULL,
        occurrences INTEGER NOT NULL,
        last_seen_at TEXT NOT NULL,
        last_match_id TEXT NOT NULL,
        PRIMARY KEY (granularity, signature)
    );
    CREATE INDEX IF NOT EXISTS idx_pattern_counts_rank ON pattern_counts(granularity, occurrences);

    CREATE TABLE IF NOT EXISTS match_phases (
        match_id TEXT PRIMARY KEY,
        phase TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
"#;

/// SQLite-backed event and pattern store
pub struct Store {
    conn: Mutex<Connection>,
    config: StoreConfig,
}

impl Store {
    /// Open (or create) the database described by `config`
    pub fn with_config(config: StoreConfig) -> StoreResult<Self> {
        let conn = if config.is_in_memory() {
            Connection::open_in_memory()?
        } else {
            if let Some(parent) = config.path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let conn = Connection::open(&config.path)?;
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
            conn
        };
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
            config,
        })
    }

    /// Open (or create) a database file
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Self::with_config(StoreConfig::new(path))
    }

    /// Private in-memory database, mostly for tests
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::with_config(StoreConfig::new(IN_MEMORY))
    }

    /// Get the configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Ball events
    // ------------------------------------------------------------------

    /// Up to `limit` most recently inserted balls of a match, newest first
    pub fn recent_balls(&self, match_id: &str, limit: usize) -> StoreResult<Vec<StoredBall>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, match_id, timestamp, ball_number, runs, is_four, is_six, is_wicket, is_dot, received_at
             FROM ball_events
             WHERE match_id = ?1
             ORDER BY id DESC
             LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![match_id, limit as i64], |row| {
            Ok(StoredBall::new(
                row.get(0)?,
                ball_from_row(row, 1)?,
                row.get(9)?,
            ))
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Balls numbered `first..=last`, ordered by ball number.
    ///
    /// Only the first stored row of each ball number is returned, so
    /// appended duplicates never widen the window.
    pub fn balls_in_range(
        &self,
        match_id: &str,
        first: u32,
        last: u32,
    ) -> StoreResult<Vec<BallEvent>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT match_id, timestamp, ball_number, runs, is_four, is_six, is_wicket, is_dot
             FROM ball_events
             WHERE id IN (
                 SELECT MIN(id) FROM ball_events
                 WHERE match_id = ?1 AND ball_number BETWEEN ?2 AND ?3
                 GROUP BY ball_number
             )
             ORDER BY ball_number ASC",
        )?;
        let rows = stmt.query_map(params![match_id, first, last], |row| ball_from_row(row, 0))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Every ball of a match, ordered by ball number
    pub fn all_balls(&self, match_id: &str) -> StoreResult<Vec<BallEvent>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT match_id, timestamp, ball_number, runs, is_four, is_six, is_wicket, is_dot
             FROM ball_events
             WHERE match_id = ?1
             ORDER BY ball_number ASC, id ASC",
        )?;
        let rows = stmt.query_map(params![match_id], |row| ball_from_row(row, 0))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    // ------------------------------------------------------------------
    // Match lifecycle
    // ------------------------------------------------------------------

    /// Stored phase of a match; `None` before its first ball
    pub fn match_phase(&self, match_id: &str) -> StoreResult<Option<MatchPhase>> {
        let conn = self.conn.lock();
        read_phase(&conn, match_id)
    }

    /// Append a ball and advance its match's phase as one unit.
    ///
    /// With `dedupe`, an existing row for the same (match_id, ball_number)
    /// wins and nothing is written. The phase read, the duplicate check, the
    /// insert and the phase update share one IMMEDIATE transaction, so
    /// concurrent balls of a match always advance from the phase the
    /// previous ball left behind.
    pub fn record_ball(
        &self,
        ball: &BallEvent,
        status: &MatchStatus,
        dedupe: bool,
        enforce_lifecycle: bool,
    ) -> StoreResult<BallWrite> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let stored = read_phase(&tx, &ball.match_id)?;
        let current = stored.unwrap_or_default();

        if dedupe {
            if let Some(id) = find_ball(&tx, &ball.match_id, ball.ball_number)? {
                return Ok(BallWrite::Duplicate { id, phase: current });
            }
        }

        let (next, violation) = match current.advance(status) {
            Ok(next) => (next, None),
            Err(err) if enforce_lifecycle => return Ok(BallWrite::Rejected(err)),
            Err(err) => (current, Some(err)),
        };

        let id = append_ball(&tx, ball)?;
        if stored != Some(next) {
            write_phase(&tx, &ball.match_id, next)?;
        }
        tx.commit()?;

        Ok(BallWrite::Inserted {
            id,
            phase: next,
            violation,
        })
    }

    // ------------------------------------------------------------------
    // Patterns
    // ------------------------------------------------------------------

    /// Record one occurrence of `signature` and return the stats that
    /// preceded it.
    ///
    /// Reading the aggregate, inserting the occurrence row and bumping the
    /// aggregate run inside a single IMMEDIATE transaction, so two
    /// detections of the same signature can never observe the same count.
    pub fn record_pattern(
        &self,
        granularity: Granularity,
        match_id: &str,
        over_number: Option<u32>,
        signature: &str,
    ) -> StoreResult<PatternMatch> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let prior = read_count(&tx, granularity, signature)?;
        let now = now_rfc3339();

        match (granularity, over_number) {
            (Granularity::Over, Some(over)) => {
                tx.execute(
                    "INSERT INTO over_patterns(match_id, over_number, over_signature, created_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![match_id, over, signature, now],
                )?;
            }
            (Granularity::Over, None) => {
                return Err(StoreError::InvalidInput(
                    "over pattern requires an over number".to_string(),
                ));
            }
            (other, _) => {
                let sql = format!(
                    "INSERT INTO {}(match_id, signature, created_at) VALUES (?1, ?2, ?3)",
                    other.table()
                );
                tx.execute(&sql, params![match_id, signature, now])?;
            }
        }

        tx.execute(
            "INSERT INTO pattern_counts(granularity, signature, occurrences, last_seen_at, last_match_id)
             VALUES (?1, ?2, 1, ?3, ?4)
             ON CONFLICT(granularity, signature) DO UPDATE SET
                 occurrences = occurrences + 1,
                 last_seen_at = excluded.last_seen_at,
                 last_match_id = excluded.last_match_id",
            params![granularity.as_str(), signature, now, match_id],
        )?;
        tx.commit()?;

        let over_number = match granularity {
            Granularity::Over => over_number,
            _ => None,
        };

        Ok(PatternMatch {
            granularity,
            match_id: match_id.to_string(),
            over_number,
            signature: signature.to_string(),
            prior_count: prior.occurrences,
            last_seen_at: prior.last_seen_at,
            last_match_id: prior.last_match_id,
        })
    }

    /// Aggregate count for one signature (zero when never seen)
    pub fn pattern_count(
        &self,
        granularity: Granularity,
        signature: &str,
    ) -> StoreResult<PatternCount> {
        let conn = self.conn.lock();
        read_count(&conn, granularity, signature)
    }

    /// Most frequent signatures of a granularity
    pub fn top_patterns(
        &self,
        granularity: Granularity,
        limit: usize,
    ) -> StoreResult<Vec<PatternCount>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT signature, occurrences, last_seen_at, last_match_id
             FROM pattern_counts
             WHERE granularity = ?1
             ORDER BY occurrences DESC, last_seen_at DESC
             LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![granularity.as_str(), limit as i64], |row| {
            Ok(PatternCount {
                granularity,
                signature: row.get(0)?,
                occurrences: row.get::<_, i64>(1)?.max(0) as u64,
                last_seen_at: row.get(2)?,
                last_match_id: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// All occurrence rows recorded for a match, oldest first
    pub fn patterns_for_match(&self, match_id: &str) -> StoreResult<MatchPatterns> {
        let conn = self.conn.lock();

        let mut stmt = conn.prepare(
            "SELECT id, match_id, over_number, over_signature, created_at
             FROM over_patterns WHERE match_id = ?1 ORDER BY id ASC",
        )?;
        let overs = stmt
            .query_map(params![match_id], |row| {
                Ok(PatternRecord {
                    id: row.get(0)?,
                    match_id: row.get(1)?,
                    over_number: Some(row.get(2)?),
                    signature: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let innings = plain_records(&conn, Granularity::Innings, match_id)?;
        let matches = plain_records(&conn, Granularity::Match, match_id)?;

        Ok(MatchPatterns {
            overs,
            innings,
            matches,
        })
    }

    /// Row counts across all tables
    pub fn stats(&self) -> StoreResult<StoreStats> {
        let conn = self.conn.lock();
        stats::collect(&conn)
    }
}

fn append_ball(conn: &Connection, ball: &BallEvent) -> StoreResult<i64> {
    conn.execute(
        "INSERT INTO ball_events(match_id, timestamp, ball_number, runs, is_four, is_six, is_wicket, is_dot, received_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            ball.match_id,
            ball.timestamp,
            ball.ball_number,
            ball.runs,
            ball.is_four,
            ball.is_six,
            ball.is_wicket,
            ball.is_dot,
            now_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn read_phase(conn: &Connection, match_id: &str) -> StoreResult<Option<MatchPhase>> {
    let label: Option<String> = conn
        .query_row(
            "SELECT phase FROM match_phases WHERE match_id = ?1",
            params![match_id],
            |row| row.get(0),
        )
        .optional()?;

    match label {
        None => Ok(None),
        Some(label) => MatchPhase::from_label(&label)
            .map(Some)
            .ok_or_else(|| StoreError::Corrupt(format!("unknown match phase '{}'", label))),
    }
}

fn write_phase(conn: &Connection, match_id: &str, phase: MatchPhase) -> StoreResult<()> {
    conn.execute(
        "INSERT INTO match_phases(match_id, phase, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(match_id) DO UPDATE SET phase = excluded.phase, updated_at = excluded.updated_at",
        params![match_id, phase.as_str(), now_rfc3339()],
    )?;
    Ok(())
}

fn find_ball(conn: &Connection, match_id: &str, ball_number: u32) -> StoreResult<Option<i64>> {
    let id = conn
        .query_row(
            "SELECT id FROM ball_events WHERE match_id = ?1 AND ball_number = ?2 ORDER BY id ASC LIMIT 1",
            params![match_id, ball_number],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

fn read_count(
    conn: &Connection,
    granularity: Granularity,
    signature: &str,
) -> StoreResult<PatternCount> {
    let row = conn
        .query_row(
            "SELECT occurrences, last_seen_at, last_match_id
             FROM pattern_counts WHERE granularity = ?1 AND signature = ?2",
            params![granularity.as_str(), signature],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, Option<String>>(2)?,
                ))
            },
        )
        .optional()?;

    Ok(match row {
        Some((occurrences, last_seen_at, last_match_id)) => PatternCount {
            granularity,
            signature: signature.to_string(),
            occurrences: occurrences.max(0) as u64,
            last_seen_at,
            last_match_id,
        },
        None => PatternCount::unseen(granularity, signature),
    })
}

fn plain_records(
    conn: &Connection,
    granularity: Granularity,
    match_id: &str,
) -> StoreResult<Vec<PatternRecord>> {
    let sql = format!(
        "SELECT id, match_id, signature, created_at FROM {} WHERE match_id = ?1 ORDER BY id ASC",
        granularity.table()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![match_id], |row| {
        Ok(PatternRecord {
            id: row.get(0)?,
            match_id: row.get(1)?,
            over_number: None,
            signature: row.get(2)?,
            created_at: row.get(3)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Read the eight ball columns starting at `offset`
fn ball_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<BallEvent> {
    Ok(BallEvent {
        match_id: row.get(offset)?,
        timestamp: row.get(offset + 1)?,
        ball_number: row.get(offset + 2)?,
        runs: row.get(offset + 3)?,
        is_four: row.get(offset + 4)?,
        is_six: row.get(offset + 5)?,
        is_wicket: row.get(offset + 6)?,
        is_dot: row.get(offset + 7)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(match_id: &str, ball_number: u32, runs: i32) -> BallEvent {
        BallEvent {
            match_id: match_id.to_string(),
            timestamp: "2025-01-01T10:00:00".to_string(),
            ball_number,
            runs,
            is_four: runs == 4,
            is_six: runs == 6,
            is_wicket: runs == -1,
            is_dot: runs == 0,
        }
    }

    fn insert(store: &Store, ball: &BallEvent, dedupe: bool) -> BallWrite {
        store
            .record_ball(ball, &MatchStatus::parse("LIVE"), dedupe, false)
            .unwrap()
    }

    #[test]
    fn test_insert_and_read_back_in_ball_order() {
        let store = Store::open_in_memory().unwrap();
        insert(&store, &ball("M1", 2, 4), true);
        insert(&store, &ball("M1", 1, 0), true);
        insert(&store, &ball("M2", 1, 6), true);

        let balls = store.all_balls("M1").unwrap();
        assert_eq!(balls.len(), 2);
        assert_eq!(balls[0].ball_number, 1);
        assert_eq!(balls[1].ball_number, 2);
        assert!(balls[1].is_four);
    }

    #[test]
    fn test_without_dedupe_duplicates_are_appended() {
        let store = Store::open_in_memory().unwrap();
        insert(&store, &ball("M1", 1, 1), false);
        let second = insert(&store, &ball("M1", 1, 1), false);

        assert!(matches!(second, BallWrite::Inserted { .. }));
        assert_eq!(store.all_balls("M1").unwrap().len(), 2);
    }

    #[test]
    fn test_recent_balls_newest_insertion_first() {
        let store = Store::open_in_memory().unwrap();
        for n in [3, 1, 2] {
            insert(&store, &ball("M1", n, 1), true);
        }

        let recent = store.recent_balls("M1", 2).unwrap();
        let numbers: Vec<u32> = recent.iter().map(|b| b.ball.ball_number).collect();
        assert_eq!(numbers, vec![2, 1]);
    }

    #[test]
    fn test_recent_balls_carry_card_label() {
        let store = Store::open_in_memory().unwrap();
        insert(&store, &ball("M1", 1, -1), true);
        insert(&store, &ball("M1", 2, 5), true);

        let recent = store.recent_balls("M1", 10).unwrap();
        assert_eq!(recent[0].card, None);
        assert_eq!(recent[1].card.as_deref(), Some("K"));
    }

    #[test]
    fn test_range_keeps_first_row_per_ball_number() {
        let store = Store::open_in_memory().unwrap();
        for n in 1..=6 {
            insert(&store, &ball("M1", n, 1), false);
        }
        insert(&store, &ball("M1", 6, 4), false);
        insert(&store, &ball("M1", 2, 6), false);

        let over = store.balls_in_range("M1", 1, 6).unwrap();
        let runs: Vec<i32> = over.iter().map(|b| b.runs).collect();
        assert_eq!(runs, vec![1, 1, 1, 1, 1, 1]);
        assert_eq!(store.all_balls("M1").unwrap().len(), 8);
    }

    #[test]
    fn test_record_pattern_reports_prior_stats() {
        let store = Store::open_in_memory().unwrap();

        let first = store
            .record_pattern(Granularity::Over, "M1", Some(1), "1-4-0-6-0-2")
            .unwrap();
        assert_eq!(first.prior_count, 0);
        assert_eq!(first.last_seen_at, None);

        let second = store
            .record_pattern(Granularity::Over, "M2", Some(3), "1-4-0-6-0-2")
            .unwrap();
        assert_eq!(second.prior_count, 1);
        assert_eq!(second.last_match_id.as_deref(), Some("M1"));

        let count = store
            .pattern_count(Granularity::Over, "1-4-0-6-0-2")
            .unwrap();
        assert_eq!(count.occurrences, 2);
        assert_eq!(count.last_match_id.as_deref(), Some("M2"));
    }

    #[test]
    fn test_granularities_count_separately() {
        let store = Store::open_in_memory().unwrap();
        store
            .record_pattern(Granularity::Innings, "M1", None, "1-2")
            .unwrap();
        let m = store
            .record_pattern(Granularity::Match, "M1", None, "1-2")
            .unwrap();
        assert_eq!(m.prior_count, 0);
    }

    #[test]
    fn test_over_pattern_needs_over_number() {
        let store = Store::open_in_memory().unwrap();
        let err = store
            .record_pattern(Granularity::Over, "M1", None, "1-1-1-1-1-1")
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
        assert_eq!(
            store.pattern_count(Granularity::Over, "1-1-1-1-1-1").unwrap().occurrences,
            0
        );
    }

    #[test]
    fn test_record_ball_advances_phase() {
        let store = Store::open_in_memory().unwrap();
        let live = MatchStatus::parse("LIVE");
        assert_eq!(store.match_phase("M1").unwrap(), None);

        let first = store.record_ball(&ball("M1", 1, 1), &live, true, true).unwrap();
        assert!(matches!(
            first,
            BallWrite::Inserted { phase: MatchPhase::FirstInnings, violation: None, .. }
        ));

        store
            .record_ball(&ball("M1", 2, 1), &MatchStatus::InningsBreak, true, true)
            .unwrap();
        let third = store.record_ball(&ball("M1", 3, 1), &live, true, true).unwrap();
        assert!(matches!(
            third,
            BallWrite::Inserted { phase: MatchPhase::SecondInnings, .. }
        ));
        assert_eq!(
            store.match_phase("M1").unwrap(),
            Some(MatchPhase::SecondInnings)
        );
    }

    #[test]
    fn test_record_ball_duplicate_writes_nothing() {
        let store = Store::open_in_memory().unwrap();
        let live = MatchStatus::parse("LIVE");
        let first = store.record_ball(&ball("M1", 1, 1), &live, true, true).unwrap();
        let BallWrite::Inserted { id, .. } = first else {
            panic!("expected insert, got {:?}", first);
        };

        let again = store.record_ball(&ball("M1", 1, 1), &live, true, true).unwrap();
        assert_eq!(
            again,
            BallWrite::Duplicate {
                id,
                phase: MatchPhase::FirstInnings
            }
        );
        assert_eq!(store.all_balls("M1").unwrap().len(), 1);
    }

    #[test]
    fn test_record_ball_rejection_rolls_back() {
        let store = Store::open_in_memory().unwrap();
        store
            .record_ball(&ball("M1", 1, 1), &MatchStatus::Completed, true, true)
            .unwrap();

        let live = MatchStatus::parse("LIVE");
        let rejected = store.record_ball(&ball("M1", 2, 1), &live, true, true).unwrap();
        assert!(matches!(rejected, BallWrite::Rejected(_)));
        assert_eq!(store.all_balls("M1").unwrap().len(), 1);
        assert_eq!(store.match_phase("M1").unwrap(), Some(MatchPhase::Completed));
    }

    #[test]
    fn test_record_ball_lets_violation_through_when_not_enforced() {
        let store = Store::open_in_memory().unwrap();
        store
            .record_ball(&ball("M1", 1, 1), &MatchStatus::Completed, true, false)
            .unwrap();

        let live = MatchStatus::parse("LIVE");
        let write = store.record_ball(&ball("M1", 2, 1), &live, true, false).unwrap();
        assert!(matches!(
            write,
            BallWrite::Inserted { phase: MatchPhase::Completed, violation: Some(_), .. }
        ));
        assert_eq!(store.all_balls("M1").unwrap().len(), 2);
    }
}

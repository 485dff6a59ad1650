//! Scraper CSV rows to ingestion payloads

use crate::config::parse_flag;
use crate::report::CsvTable;
use crate::types::{parse_runs_display, BallPayload, Card, DEFAULT_STATUS};
use crate::utils::now_rfc3339;

/// Column positions in a scraper CSV
#[derive(Debug, Clone, Copy)]
pub struct ReplayColumns {
    timestamp: Option<usize>,
    match_id: Option<usize>,
    round_id: Option<usize>,
    ball_number: Option<usize>,
    runs: Option<usize>,
    card: Option<usize>,
    is_four: Option<usize>,
    is_six: Option<usize>,
    is_wicket: Option<usize>,
    is_dot: Option<usize>,
    match_status: Option<usize>,
}

impl ReplayColumns {
    pub fn resolve(table: &CsvTable) -> Self {
        Self {
            timestamp: table.column("Timestamp"),
            match_id: table.column("Match_ID"),
            round_id: table.column("Round_ID"),
            ball_number: table.column("Ball_Number"),
            runs: table.column("Runs"),
            card: table.column("Card"),
            is_four: table.column("Is_Four"),
            is_six: table.column("Is_Six"),
            is_wicket: table.column("Is_Wicket"),
            is_dot: table.column("Is_Dot"),
            match_status: table.column("Match_Status"),
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("nan")).then_some(trimmed)
}

/// Build the payload for one row, or say why the row cannot be sent.
pub fn payload_from_row(
    table: &CsvTable,
    cols: &ReplayColumns,
    row: usize,
) -> Result<BallPayload, String> {
    let cell = |col: Option<usize>| non_empty(table.cell(row, col));

    let match_id = cell(cols.match_id)
        .or_else(|| cell(cols.round_id))
        .ok_or("no Match_ID or Round_ID")?
        .to_string();

    let ball_number = cell(cols.ball_number)
        .and_then(|raw| raw.parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .map(|n| n.trunc() as i64)
        .ok_or("missing Ball_Number")?;

    let runs = cell(cols.runs)
        .and_then(parse_runs_display)
        .or_else(|| cell(cols.card).and_then(Card::parse).map(Card::runs))
        .ok_or("no usable Runs or Card")?;

    let flag = |col: Option<usize>| cell(col).and_then(parse_flag).unwrap_or(false);

    Ok(BallPayload {
        match_id,
        timestamp: cell(cols.timestamp)
            .map(str::to_string)
            .unwrap_or_else(now_rfc3339),
        ball_number,
        runs,
        is_four: flag(cols.is_four),
        is_six: flag(cols.is_six),
        is_wicket: flag(cols.is_wicket),
        is_dot: flag(cols.is_dot),
        match_status: Some(cell(cols.match_status).unwrap_or(DEFAULT_STATUS).to_string()),
    })
}

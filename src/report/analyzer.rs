//! Batch pattern analysis over a scraped ball log
//!
//! Two passes: the first extracts per-match sequences and builds the
//! history maps, the second looks up every match against that history and
//! fills the analysis columns row by row.

use std::cmp::Ordering;
use std::collections::HashMap;

use rayon::prelude::*;

use super::csv::CsvTable;
use super::{ReportError, ReportResult};
use crate::types::BALLS_PER_OVER;
use crate::utils::now_rfc3339;

/// Analysis columns appended to every report, in output order
pub const ANALYSIS_COLUMNS: [&str; 8] = [
    "Pattern_Over_Count",
    "Pattern_Over_Last_Occur",
    "Pattern_1stInn_Count",
    "Pattern_1stInn_Last_Occur",
    "Pattern_FinalScore_Count",
    "Pattern_FinalScore_Last_Occur",
    "Pattern_Match_Card_Count",
    "Pattern_Match_Card_Last_Occur",
];

const NONE: &str = "None";
const CURRENT_INN1: &str = "Current Inn1";
const OVER_LEN: usize = BALLS_PER_OVER as usize;

/// Input table plus the analysis columns, rows in analysis order
#[derive(Debug, Clone, PartialEq)]
pub struct PatternReport {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Number of distinct matches analysed
    pub matches: usize,
}

impl PatternReport {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell by row index and header name
    pub fn cell(&self, row: usize, name: &str) -> Option<&str> {
        let col = self.column(name)?;
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

/// Analysis values for one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAnalysis {
    pub over_count: usize,
    pub over_last: String,
    pub inn1_count: usize,
    pub inn1_last: String,
    pub score_count: usize,
    pub score_last: String,
    pub card_count: usize,
    pub card_last: String,
}

impl Default for RowAnalysis {
    fn default() -> Self {
        Self {
            over_count: 0,
            over_last: NONE.to_string(),
            inn1_count: 0,
            inn1_last: NONE.to_string(),
            score_count: 0,
            score_last: NONE.to_string(),
            card_count: 0,
            card_last: NONE.to_string(),
        }
    }
}

impl RowAnalysis {
    fn cells(&self) -> [String; 8] {
        [
            self.over_count.to_string(),
            self.over_last.clone(),
            self.inn1_count.to_string(),
            self.inn1_last.clone(),
            self.score_count.to_string(),
            self.score_last.clone(),
            self.card_count.to_string(),
            self.card_last.clone(),
        ]
    }
}

/// Resolved column positions
struct Columns {
    key: usize,
    timestamp: Option<usize>,
    ball: Option<usize>,
    card: Option<usize>,
    team1_score: Option<usize>,
    team2_score: Option<usize>,
    team2_ball: Option<usize>,
    team2_over: Option<usize>,
}

impl Columns {
    fn resolve(table: &CsvTable) -> ReportResult<Self> {
        let key = table
            .column("Round_ID")
            .or_else(|| table.column("Match_ID"))
            .ok_or_else(|| ReportError::MissingColumn("Round_ID".to_string()))?;

        Ok(Self {
            key,
            timestamp: table.column("Timestamp"),
            ball: table.column("Ball_Number"),
            card: table.column("Card").or_else(|| table.column("Runs")),
            team1_score: table.column("Team1_Score"),
            team2_score: table.column("Team2_Score"),
            team2_ball: table.column("Team2_Ball"),
            team2_over: table.column("Team2_Over"),
        })
    }
}

/// Everything the history needs from one match
struct MatchMeta {
    round: String,
    /// Table row indices in ball order
    rows: Vec<usize>,
    start_time: String,
    /// Position in `rows` where the second innings begins
    inn2_start: Option<usize>,
    inn1_cards: Vec<String>,
    inn2_cards: Vec<String>,
    score: (i64, i64),
}

impl MatchMeta {
    fn extract(table: &CsvTable, cols: &Columns, round: String, rows: Vec<usize>) -> Self {
        let start_time = match (cols.timestamp, rows.first()) {
            (Some(_), Some(&first)) => table.cell(first, cols.timestamp).to_string(),
            _ => now_rfc3339(),
        };

        let inn2_start = rows.iter().position(|&row| {
            positive(table.cell(row, cols.team2_ball)) || positive(table.cell(row, cols.team2_over))
        });
        let split = inn2_start.unwrap_or(rows.len());

        let cards_of = |slice: &[usize]| -> Vec<String> {
            slice
                .iter()
                .filter_map(|&row| card(table.cell(row, cols.card)))
                .map(str::to_string)
                .collect()
        };
        let inn1_cards = cards_of(&rows[..split]);
        let inn2_cards = cards_of(&rows[split..]);

        let score = match rows.last() {
            Some(&last) => (
                parse_score(table.cell(last, cols.team1_score)),
                parse_score(table.cell(last, cols.team2_score)),
            ),
            None => (0, 0),
        };

        Self {
            round,
            rows,
            start_time,
            inn2_start,
            inn1_cards,
            inn2_cards,
            score,
        }
    }

    fn inn1_seq(&self) -> String {
        self.inn1_cards.join(",")
    }

    fn full_seq(&self) -> String {
        format!("{}|{}", self.inn1_seq(), self.inn2_cards.join(","))
    }

    fn has_cards(&self) -> bool {
        !self.inn1_cards.is_empty() || !self.inn2_cards.is_empty()
    }
}

/// One historical occurrence of a match-level key
#[derive(Debug, Clone)]
struct Occurrence {
    start_time: String,
    round: String,
}

/// One historical occurrence of an over sequence
#[derive(Debug, Clone)]
struct OverOccurrence {
    start_time: String,
    round: String,
    innings: u8,
    number: usize,
}

impl OverOccurrence {
    fn id(&self) -> String {
        format!("{}_{}_{}", self.round, self.innings, self.number)
    }
}

#[derive(Default)]
struct History {
    overs: HashMap<String, Vec<OverOccurrence>>,
    inn1: HashMap<String, Vec<Occurrence>>,
    scores: HashMap<(i64, i64), Vec<Occurrence>>,
    full: HashMap<String, Vec<Occurrence>>,
}

impl History {
    fn build(metas: &[MatchMeta]) -> Self {
        let mut history = Self::default();

        for meta in metas {
            let occurrence = Occurrence {
                start_time: meta.start_time.clone(),
                round: meta.round.clone(),
            };

            let inn1_seq = meta.inn1_seq();
            if !inn1_seq.is_empty() {
                history.inn1.entry(inn1_seq).or_default().push(occurrence.clone());
            }

            for (innings, cards) in [(1u8, &meta.inn1_cards), (2u8, &meta.inn2_cards)] {
                for (i, chunk) in cards.chunks_exact(OVER_LEN).enumerate() {
                    history
                        .overs
                        .entry(chunk.join(","))
                        .or_default()
                        .push(OverOccurrence {
                            start_time: meta.start_time.clone(),
                            round: meta.round.clone(),
                            innings,
                            number: i + 1,
                        });
                }
            }

            history.scores.entry(meta.score).or_default().push(occurrence.clone());

            if meta.has_cards() {
                history.full.entry(meta.full_seq()).or_default().push(occurrence);
            }
        }

        history
    }

    fn overs_before(
        &self,
        seq: &str,
        meta: &MatchMeta,
        innings: u8,
        number: usize,
    ) -> (usize, String) {
        let priors: Vec<&OverOccurrence> = self
            .overs
            .get(seq)
            .map(|list| {
                list.iter()
                    .filter(|o| {
                        o.start_time < meta.start_time
                            || (o.start_time == meta.start_time
                                && o.round == meta.round
                                && (o.innings < innings
                                    || (o.innings == innings && o.number < number)))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let last = priors.last().map(|o| o.id()).unwrap_or_else(|| NONE.to_string());
        (priors.len(), last)
    }
}

/// Count and most recent id of occurrences that started before `start_time`
fn before(list: Option<&Vec<Occurrence>>, start_time: &str) -> (usize, String) {
    let priors: Vec<&Occurrence> = list
        .map(|l| l.iter().filter(|o| o.start_time.as_str() < start_time).collect())
        .unwrap_or_default();
    let last = priors
        .last()
        .map(|o| o.round.clone())
        .unwrap_or_else(|| NONE.to_string());
    (priors.len(), last)
}

/// Analyse a scraped ball log and return it with the analysis columns filled.
pub fn analyze(table: &CsvTable) -> ReportResult<PatternReport> {
    let cols = Columns::resolve(table)?;

    // Global order: (timestamp, ball number) when timestamps are present
    let mut order: Vec<usize> = (0..table.rows.len()).collect();
    if cols.timestamp.is_some() {
        order.sort_by(|&a, &b| {
            table
                .cell(a, cols.timestamp)
                .cmp(table.cell(b, cols.timestamp))
                .then_with(|| cmp_ball(table, &cols, a, b))
        });
    }

    // Group by match key in first-appearance order
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for &row in &order {
        let key = table.cell(row, Some(cols.key)).to_string();
        let slot = *positions.entry(key.clone()).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(row);
    }

    let metas: Vec<MatchMeta> = groups
        .into_par_iter()
        .map(|(round, mut rows)| {
            rows.sort_by(|&a, &b| cmp_ball(table, &cols, a, b));
            MatchMeta::extract(table, &cols, round, rows)
        })
        .collect();

    let history = History::build(&metas);

    let filled: Vec<(usize, RowAnalysis)> = metas
        .par_iter()
        .flat_map_iter(|meta| fill_match(table, &cols, &history, meta))
        .collect();

    let mut analysis: Vec<RowAnalysis> = vec![RowAnalysis::default(); table.rows.len()];
    for (row, values) in filled {
        analysis[row] = values;
    }

    // Existing analysis columns are replaced, new ones go at the end
    let keep: Vec<usize> = (0..table.headers.len())
        .filter(|&i| !ANALYSIS_COLUMNS.contains(&table.headers[i].as_str()))
        .collect();

    let mut headers: Vec<String> = keep.iter().map(|&i| table.headers[i].clone()).collect();
    headers.extend(ANALYSIS_COLUMNS.iter().map(|c| c.to_string()));

    let rows = order
        .iter()
        .map(|&row| {
            let mut cells: Vec<String> = keep
                .iter()
                .map(|&i| table.cell(row, Some(i)).to_string())
                .collect();
            cells.extend(analysis[row].cells());
            cells
        })
        .collect();

    Ok(PatternReport {
        headers,
        rows,
        matches: metas.len(),
    })
}

fn fill_match(
    table: &CsvTable,
    cols: &Columns,
    history: &History,
    meta: &MatchMeta,
) -> Vec<(usize, RowAnalysis)> {
    let (score_count, score_last) = before(history.scores.get(&meta.score), &meta.start_time);
    let (inn1_count, inn1_last) = before(history.inn1.get(&meta.inn1_seq()), &meta.start_time);
    let (card_count, card_last) = before(history.full.get(&meta.full_seq()), &meta.start_time);

    let mut out: Vec<(usize, RowAnalysis)> = Vec::with_capacity(meta.rows.len());
    // (position in `out`, card) for the current innings
    let mut innings_cards: Vec<(usize, String)> = Vec::new();

    for (pos, &row) in meta.rows.iter().enumerate() {
        let second = meta.inn2_start.is_some_and(|start| pos >= start);
        if meta.inn2_start == Some(pos) {
            innings_cards.clear();
        }

        let mut values = RowAnalysis {
            score_count,
            score_last: score_last.clone(),
            card_count,
            card_last: card_last.clone(),
            ..RowAnalysis::default()
        };
        if second {
            values.inn1_count = inn1_count;
            values.inn1_last = inn1_last.clone();
        } else {
            values.inn1_last = CURRENT_INN1.to_string();
        }
        out.push((row, values));

        let Some(c) = card(table.cell(row, cols.card)) else {
            continue;
        };
        innings_cards.push((out.len() - 1, c.to_string()));

        if innings_cards.len() % OVER_LEN == 0 {
            let over = &innings_cards[innings_cards.len() - OVER_LEN..];
            let seq = over
                .iter()
                .map(|(_, c)| c.as_str())
                .collect::<Vec<_>>()
                .join(",");
            let number = innings_cards.len() / OVER_LEN;
            let innings = if second { 2 } else { 1 };
            let (count, last) = history.overs_before(&seq, meta, innings, number);

            for &(slot, _) in over {
                out[slot].1.over_count = count;
                out[slot].1.over_last = last.clone();
            }
        }
    }

    out
}

fn cmp_ball(table: &CsvTable, cols: &Columns, a: usize, b: usize) -> Ordering {
    let key = |row| table.cell(row, cols.ball).trim().parse::<f64>().ok();
    match (key(a), key(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Card text of a cell, skipping blanks and `nan`
fn card(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        None
    } else {
        Some(trimmed)
    }
}

fn positive(raw: &str) -> bool {
    raw.trim()
        .parse::<f64>()
        .map(|v| v.trunc() > 0.0)
        .unwrap_or(false)
}

/// Leading run total of a score display such as `45-2 (4.3)` or `45/2`
pub fn parse_score(raw: &str) -> i64 {
    raw.split(' ')
        .next()
        .and_then(|main| main.split('-').next())
        .and_then(|runs| runs.split('/').next())
        .and_then(|runs| runs.parse().ok())
        .unwrap_or(0)
}

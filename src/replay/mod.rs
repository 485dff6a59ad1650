//! Replay a scraped ball log against a running server
//!
//! Each CSV row becomes a `POST /api/ingest/ball`, sent in file order with a
//! fixed pause between balls. Failed posts are logged and skipped over.

mod rows;

pub use rows::{payload_from_row, ReplayColumns};

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::report::{CsvTable, ReportError};

pub const DEFAULT_URL: &str = "http://localhost:5000";
pub const DEFAULT_INTERVAL_MS: u64 = 2000;
pub const REQUEST_TIMEOUT_SECS: u64 = 3;

const USAGE: &str = "usage: ball-replay <csv> [--url URL] [--interval-ms N]";

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("{0}")]
    Usage(String),

    #[error("failed to read ball log: {0}")]
    Read(#[from] ReportError),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type ReplayResult<T> = Result<T, ReplayError>;

fn usage(problem: &str) -> ReplayError {
    ReplayError::Usage(format!("{}\n{}", problem, USAGE))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayConfig {
    pub csv_path: PathBuf,
    /// Server base URL, without the route
    pub base_url: String,
    pub interval: Duration,
}

impl ReplayConfig {
    /// Parse command-line arguments (program name already stripped).
    pub fn from_args<I>(args: I) -> ReplayResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut csv_path = None;
        let mut base_url = DEFAULT_URL.to_string();
        let mut interval_ms = DEFAULT_INTERVAL_MS;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--url" => {
                    base_url = args.next().ok_or_else(|| usage("--url needs a value"))?;
                }
                "--interval-ms" => {
                    interval_ms = args
                        .next()
                        .and_then(|v| v.parse().ok())
                        .ok_or_else(|| usage("--interval-ms needs a number"))?;
                }
                flag if flag.starts_with("--") => {
                    return Err(usage(&format!("unknown flag {}", flag)));
                }
                path if csv_path.is_none() => csv_path = Some(PathBuf::from(path)),
                extra => {
                    return Err(usage(&format!("unexpected argument {}", extra)));
                }
            }
        }

        Ok(Self {
            csv_path: csv_path.ok_or_else(|| ReplayError::Usage(USAGE.to_string()))?,
            base_url: base_url.trim_end_matches('/').to_string(),
            interval: Duration::from_millis(interval_ms),
        })
    }

    pub fn ingest_url(&self) -> String {
        format!("{}/api/ingest/ball", self.base_url)
    }
}

/// Counts logged at the end of a replay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub sent: usize,
    pub failed: usize,
    pub skipped: usize,
    pub interrupted: bool,
}

/// Post every row of the log, stopping early once `stop` is set.
pub async fn run(
    config: &ReplayConfig,
    stop: Arc<AtomicBool>,
) -> ReplayResult<ReplaySummary> {
    let table = CsvTable::read(&config.csv_path)?;
    let cols = ReplayColumns::resolve(&table);
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?;
    let url = config.ingest_url();

    info!(rows = table.rows.len(), url = %url, "starting replay");

    let mut summary = ReplaySummary::default();
    for row in 0..table.rows.len() {
        if stop.load(Ordering::SeqCst) {
            summary.interrupted = true;
            break;
        }

        let payload = match payload_from_row(&table, &cols, row) {
            Ok(payload) => payload,
            Err(reason) => {
                warn!(row = row + 2, %reason, "skipping row");
                summary.skipped += 1;
                continue;
            }
        };

        match client.post(&url).json(&payload).send().await {
            Ok(res) if res.status().is_success() => {
                debug!(match_id = %payload.match_id, ball = payload.ball_number, "ball sent");
                summary.sent += 1;
            }
            Ok(res) => {
                let status = res.status();
                let body = res.text().await.unwrap_or_default();
                warn!(%status, %body, "api error");
                summary.failed += 1;
            }
            Err(e) => {
                warn!(error = %e, "failed to send to backend");
                summary.failed += 1;
            }
        }

        if row + 1 < table.rows.len() && !config.interval.is_zero() {
            tokio::time::sleep(config.interval).await;
        }
    }

    info!(
        sent = summary.sent,
        failed = summary.failed,
        skipped = summary.skipped,
        interrupted = summary.interrupted,
        "replay finished"
    );
    Ok(summary)
}

//! Batch pattern report: scraped ball log (CSV) to annotated workbook (xlsx)
//!
//! Usage: `pattern-report [csv] [xlsx]`

use std::path::PathBuf;

use anyhow::Context;

use cricket_patterns::config::{parse_flag, ServerConfig};
use cricket_patterns::logging::init_tracing;
use cricket_patterns::report::{self, DEFAULT_CSV, DEFAULT_XLSX};

fn main() -> anyhow::Result<()> {
    ServerConfig::load_dotenv();
    let json = std::env::var("CRICKET_LOG_JSON")
        .ok()
        .and_then(|v| parse_flag(&v))
        .unwrap_or(false);
    init_tracing("pattern-report", json).context("failed to initialise logging")?;

    let mut args = std::env::args().skip(1);
    let csv_path = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_CSV.to_string()));
    let xlsx_path = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_XLSX.to_string()));

    let report = report::run(&csv_path, &xlsx_path)
        .with_context(|| format!("failed to build report from {}", csv_path.display()))?;

    println!(
        "Report saved: {} ({} rows, {} matches)",
        xlsx_path.display(),
        report.rows.len(),
        report.matches
    );
    Ok(())
}

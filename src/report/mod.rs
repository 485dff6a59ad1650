//! Offline pattern report
//!
//! Reads a scraped ball log (CSV), computes how often each over, first
//! innings, final score and full card sequence appeared in earlier matches,
//! and writes the log back out as an Excel workbook with the analysis
//! columns appended.
//!
//! ```text
//! CSV ──► CsvTable ──► analyze() ──► PatternReport ──► write_xlsx()
//! ```

mod analyzer;
mod csv;
mod export;

pub use analyzer::{analyze, parse_score, PatternReport, RowAnalysis, ANALYSIS_COLUMNS};
pub use csv::{parse_rows, CsvTable};
pub use export::{column_widths, write_xlsx};

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

pub const DEFAULT_CSV: &str = "cricket_data.csv";
pub const DEFAULT_XLSX: &str = "5five_cricket_patterns.xlsx";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("missing column: {0}")]
    MissingColumn(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("excel error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

pub type ReportResult<T> = Result<T, ReportError>;

/// Read `csv_path`, analyse it and write the workbook to `xlsx_path`.
pub fn run(csv_path: &Path, xlsx_path: &Path) -> ReportResult<PatternReport> {
    let table = CsvTable::read(csv_path)?;
    info!(path = %csv_path.display(), rows = table.rows.len(), "loaded ball log");

    let report = analyze(&table)?;
    info!(matches = report.matches, "analysed patterns");

    write_xlsx(&report, xlsx_path)?;
    info!(path = %xlsx_path.display(), "report saved");
    Ok(report)
}

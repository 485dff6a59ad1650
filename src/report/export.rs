//! Excel output for a [`PatternReport`]

use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatPattern, Workbook, Worksheet};

use super::analyzer::PatternReport;
use super::ReportResult;

const HEADER_FILL: u32 = 0x366092;
const MAX_COLUMN_WIDTH: usize = 50;

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_pattern(FormatPattern::Solid)
        .set_align(FormatAlign::Center)
}

/// Write the report to a single-sheet workbook at `path`.
pub fn write_xlsx(report: &PatternReport, path: &Path) -> ReportResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header = header_format();
    for (col, name) in report.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &header)?;
    }
    write_rows(worksheet, &report.rows)?;

    for (col, width) in column_widths(report).into_iter().enumerate() {
        worksheet.set_column_width(col as u16, width as f64)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> ReportResult<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        let excel_row = (row_idx + 1) as u32;
        for (col_idx, value) in row.iter().enumerate() {
            match numeric(value) {
                Some(number) => worksheet.write_number(excel_row, col_idx as u16, number)?,
                None => worksheet.write_string(excel_row, col_idx as u16, value)?,
            };
        }
    }
    Ok(())
}

/// Cells that look like plain numbers are written as numbers
fn numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed != value || trimmed.starts_with('+') {
        return None;
    }
    // Keep leading-zero identifiers as text
    if trimmed.len() > 1 && trimmed.starts_with('0') && !trimmed.starts_with("0.") {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Longest cell per column plus padding, capped
pub fn column_widths(report: &PatternReport) -> Vec<usize> {
    report
        .headers
        .iter()
        .enumerate()
        .map(|(col, name)| {
            let longest = report
                .rows
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0);
            (longest + 2).min(MAX_COLUMN_WIDTH)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_detection() {
        assert_eq!(numeric("12"), Some(12.0));
        assert_eq!(numeric("-1"), Some(-1.0));
        assert_eq!(numeric("0"), Some(0.0));
        assert_eq!(numeric("007"), None);
        assert_eq!(numeric("A"), None);
        assert_eq!(numeric("NaN"), None);
        assert_eq!(numeric(""), None);
    }

    #[test]
    fn test_column_widths_capped() {
        let report = PatternReport {
            headers: vec!["Card".to_string(), "Note".to_string()],
            rows: vec![vec!["10".to_string(), "x".repeat(80)]],
            matches: 1,
        };
        assert_eq!(column_widths(&report), vec![6, 50]);
    }
}

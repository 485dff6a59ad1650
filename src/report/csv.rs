//! Minimal CSV reader for scraper output (quotes + CRLF tolerant)

use std::mem::take;
use std::path::Path;

use super::{ReportError, ReportResult};

/// A CSV file with a header row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Parse text whose first row is the header
    pub fn parse(text: &str) -> Self {
        let mut rows = parse_rows(text, ',');
        if rows.is_empty() {
            return Self::default();
        }
        let headers = rows
            .remove(0)
            .into_iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();
        Self { headers, rows }
    }

    pub fn read(path: &Path) -> ReportResult<Self> {
        if !path.exists() {
            return Err(ReportError::NotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    /// Index of a column by exact header name
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell of `row` under column `col`; short rows read as empty
    pub fn cell(&self, row: usize, col: Option<usize>) -> &str {
        match col {
            Some(col) => self.rows[row].get(col).map(String::as_str).unwrap_or(""),
            None => "",
        }
    }
}

/// Split CSV text into rows of fields.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = String::new();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // escaped quote
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Trailing row without newline
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quoted_fields() {
        let rows = parse_rows("a,\"b,c\",\"d \"\"e\"\"\"\r\n1,2,3", ',');
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["a", "b,c", "d \"e\""]);
        assert_eq!(rows[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let rows = parse_rows("a,b\n\n1,2\n", ',');
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_table_lookup() {
        let table = CsvTable::parse("Round_ID,Card\nR1,A\nR1\n");
        assert_eq!(table.column("Card"), Some(1));
        assert_eq!(table.cell(0, Some(1)), "A");
        assert_eq!(table.cell(1, Some(1)), "");
        assert_eq!(table.cell(0, None), "");
    }
}

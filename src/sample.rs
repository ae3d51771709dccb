//! Column sampling from the head of a CSV file
//!
//! Only the header and the first few data rows are read. Lines are split on
//! plain commas: quoted fields are not understood, which is acceptable for
//! estimating widths.

use crate::Result;
use crate::error::ReportError;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, instrument, trace};

const DELIMITER: char = ',';

/// A column name with the longest value seen for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampledColumn {
    pub name: String,
    pub max_len: usize,
}

/// Per-column maximum lengths, in header order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSample {
    pub columns: Vec<SampledColumn>,
    /// Number of data rows inspected after the header
    pub rows_sampled: usize,
}

impl ColumnSample {
    /// Column names in header order
    pub fn names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Longest length seen for a column
    pub fn max_len(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.max_len)
    }

    /// Sum of every column's maximum length
    pub fn total_len(&self) -> usize {
        self.columns.iter().map(|c| c.max_len).sum()
    }
}

/// Sample a CSV file on disk
///
/// The file is closed before this returns, on success and on error.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn sample_file<P: AsRef<Path>>(path: P, max_rows: usize) -> Result<ColumnSample> {
    let file = File::open(path.as_ref())?;
    sample_reader(BufReader::new(file), max_rows)
}

/// Sample the header and up to `max_rows` data lines from a reader
pub fn sample_reader<R: BufRead>(reader: R, max_rows: usize) -> Result<ColumnSample> {
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(ReportError::EmptyCsv),
    };
    let header = header.trim_start_matches('\u{feff}');
    if header.is_empty() {
        return Err(ReportError::EmptyCsv);
    }

    let mut names: Vec<&str> = header.split(DELIMITER).collect();
    // Trailing separators do not open columns
    while names.last().is_some_and(|name| name.is_empty()) {
        names.pop();
    }
    if names.is_empty() {
        return Err(ReportError::MalformedCsv("header has no column names".to_string()));
    }

    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ReportError::MalformedCsv(format!(
                "duplicate column name '{name}'"
            )));
        }
        columns.push(SampledColumn {
            name: name.to_string(),
            max_len: char_len(name),
        });
    }

    let mut rows_sampled = 0;
    while rows_sampled < max_rows {
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let mut values = line.split(DELIMITER);

        // Zip stops at the shorter side: missing trailing values count as
        // zero, extra values are ignored
        for column in columns.iter_mut() {
            let len = values.next().map(char_len).unwrap_or(0);
            column.max_len = column.max_len.max(len);
        }

        rows_sampled += 1;
        trace!("Sampled row {}", rows_sampled);
    }

    debug!(
        "Sampled {} columns from {} rows",
        columns.len(),
        rows_sampled
    );

    Ok(ColumnSample {
        columns,
        rows_sampled,
    })
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn sample(text: &str) -> Result<ColumnSample> {
        sample_reader(Cursor::new(text), 10)
    }

    #[test]
    fn test_max_lengths() {
        let s = sample("x,y\n1,22\n333,4\n").unwrap();
        assert_eq!(s.names(), vec!["x", "y"]);
        assert_eq!(s.max_len("x"), Some(3));
        assert_eq!(s.max_len("y"), Some(2));
        assert_eq!(s.rows_sampled, 2);
    }

    #[test]
    fn test_header_only_uses_name_lengths() {
        let s = sample("id,description,qty").unwrap();
        assert_eq!(s.max_len("id"), Some(2));
        assert_eq!(s.max_len("description"), Some(11));
        assert_eq!(s.max_len("qty"), Some(3));
        assert_eq!(s.rows_sampled, 0);
    }

    #[test]
    fn test_short_rows_do_not_fail() {
        let s = sample("a,b,c\n1234\n,\n").unwrap();
        assert_eq!(s.max_len("a"), Some(4));
        assert_eq!(s.max_len("b"), Some(1));
        assert_eq!(s.max_len("c"), Some(1));
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let s = sample("a,b\n1,2,a-very-long-extra-value\n").unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.total_len(), 2);
    }

    #[test]
    fn test_only_first_rows_are_sampled() {
        let mut text = String::from("name\n");
        for _ in 0..10 {
            text.push_str("abc\n");
        }
        text.push_str("this row is never sampled\n");

        let s = sample(&text).unwrap();
        assert_eq!(s.rows_sampled, 10);
        assert_eq!(s.max_len("name"), Some(4));

        let s = sample_reader(Cursor::new(text.as_str()), 11).unwrap();
        assert_eq!(s.max_len("name"), Some(25));
    }

    #[test]
    fn test_crlf_and_bom() {
        let s = sample("\u{feff}first,second\r\nabcdefgh,x\r\n").unwrap();
        assert_eq!(s.names(), vec!["first", "second"]);
        assert_eq!(s.max_len("first"), Some(8));
        assert_eq!(s.max_len("second"), Some(6));
    }

    #[test]
    fn test_lengths_count_characters() {
        let s = sample("city\nZ\u{00fc}rich\n").unwrap();
        assert_eq!(s.max_len("city"), Some(6));
    }

    #[test]
    fn test_quotes_are_not_understood() {
        let s = sample("a,b\n\"x,y\",z\n").unwrap();
        assert_eq!(s.max_len("a"), Some(2));
        assert_eq!(s.max_len("b"), Some(2));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(sample(""), Err(ReportError::EmptyCsv)));
        assert!(matches!(sample("\nvalue\n"), Err(ReportError::EmptyCsv)));
    }

    #[test]
    fn test_duplicate_columns() {
        assert!(matches!(
            sample("a,b,a\n1,2,3\n"),
            Err(ReportError::MalformedCsv(_))
        ));
    }

    #[test]
    fn test_trailing_separators_in_header() {
        let s = sample("a,b,\n1,2,\n").unwrap();
        assert_eq!(s.names(), vec!["a", "b"]);
        assert_eq!(s.total_len(), 2);

        let s = sample("a,b,,\n1,2,,\n").unwrap();
        assert_eq!(s.names(), vec!["a", "b"]);

        // Empty names between named columns are still columns
        let s = sample("a,,b\n1,22,3\n").unwrap();
        assert_eq!(s.names(), vec!["a", "", "b"]);
        assert_eq!(s.max_len(""), Some(2));
        assert!(matches!(
            sample("a,,,b\n"),
            Err(ReportError::MalformedCsv(_))
        ));
    }

    #[test]
    fn test_header_of_separators_only() {
        assert!(matches!(
            sample(",,\n1\n"),
            Err(ReportError::MalformedCsv(_))
        ));
    }

    #[test]
    fn test_sample_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "product,price\nWidget,10.00\n").unwrap();

        let s = sample_file(file.path(), 10).unwrap();
        assert_eq!(s.max_len("product"), Some(7));
        assert_eq!(s.max_len("price"), Some(5));
    }

    #[test]
    fn test_missing_file() {
        let result = sample_file("/definitely/not/here.csv", 10);
        assert!(matches!(result, Err(ReportError::Io(_))));
    }
}

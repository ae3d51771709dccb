//! Record sources the rendering engine fills reports from

use crate::error::RenderError;
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::io::Read;
use tracing::trace;

/// Cursor over the records of a report
///
/// `next` advances to the following record; field values are then read by
/// name until the next call.
pub trait DataSource {
    /// Move to the next record, returning `false` when there are no more
    fn next(&mut self) -> Result<bool, RenderError>;

    /// Value of a field in the current record
    fn field_value(&self, name: &str) -> Option<&str>;
}

/// Data source over a whole CSV file
///
/// The file's first row is treated as a header and skipped. Values are bound
/// to the supplied column names by position; rows shorter than the header
/// leave their trailing fields missing.
pub struct CsvDataSource<R: Read> {
    reader: csv::Reader<R>,
    columns: HashMap<String, usize>,
    record: StringRecord,
    records_read: usize,
}

impl<R: Read> CsvDataSource<R> {
    pub fn new(reader: R, column_names: &[String]) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns = column_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        Self {
            reader,
            columns,
            record: StringRecord::new(),
            records_read: 0,
        }
    }

    /// Number of records read so far
    pub fn records_read(&self) -> usize {
        self.records_read
    }
}

impl<R: Read> DataSource for CsvDataSource<R> {
    fn next(&mut self) -> Result<bool, RenderError> {
        let more = self.reader.read_record(&mut self.record)?;
        if more {
            self.records_read += 1;
            trace!("Read record {}", self.records_read);
        } else {
            self.record.clear();
        }
        Ok(more)
    }

    fn field_value(&self, name: &str) -> Option<&str> {
        self.columns.get(name).and_then(|&i| self.record.get(i))
    }
}

impl<R: Read> std::fmt::Debug for CsvDataSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvDataSource")
            .field("columns", &self.columns.len())
            .field("records_read", &self.records_read)
            .finish()
    }
}

/// In-memory records, mostly useful for tests and previews
#[derive(Debug, Clone, Default)]
pub struct MemoryDataSource {
    columns: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
    current: Option<usize>,
}

impl MemoryDataSource {
    pub fn new<S: AsRef<str>>(column_names: &[S], rows: Vec<Vec<String>>) -> Self {
        Self {
            columns: column_names
                .iter()
                .enumerate()
                .map(|(i, name)| (name.as_ref().to_string(), i))
                .collect(),
            rows,
            current: None,
        }
    }
}

impl DataSource for MemoryDataSource {
    fn next(&mut self) -> Result<bool, RenderError> {
        let next = self.current.map_or(0, |i| i + 1);
        self.current = Some(next);
        Ok(next < self.rows.len())
    }

    fn field_value(&self, name: &str) -> Option<&str> {
        let row = self.rows.get(self.current?)?;
        let index = *self.columns.get(name)?;
        row.get(index).map(String::as_str)
    }
}

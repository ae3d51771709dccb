//! Paginated PDF reports from CSV files, built on lopdf
//!
//! The header and the first rows of a CSV file are sampled to size the
//! columns. A report layout is synthesized from those widths (a header label
//! and a bound detail cell per column) and the whole file is then rendered
//! through it, page by page, into a PDF.
//!
//! ```no_run
//! use std::fs::File;
//! use std::path::Path;
//!
//! let mut out = File::create("report.pdf")?;
//! lopdf_csv_report::write_pdf(&mut out, Path::new("data.csv"))?;
//! # Ok::<(), lopdf_csv_report::ReportError>(())
//! ```

use std::io::Write;
use std::path::Path;

pub mod config;
pub mod constants;
pub mod datasource;
mod drawing;
pub mod error;
pub mod fill;
pub mod generator;
pub mod ids;
pub mod jrxml;
pub mod layout;
pub mod render;
pub mod sample;
mod text;
pub mod widths;

pub use config::{BandHeights, Margins, ReportConfig};
pub use datasource::{CsvDataSource, DataSource, MemoryDataSource};
pub use error::{RenderError, ReportError, Result};
pub use generator::ReportGenerator;
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use layout::ReportLayout;
pub use render::RenderSummary;

/// Write a PDF report for `csv_path` to `out` using the default configuration
pub fn write_pdf<W: Write>(out: &mut W, csv_path: &Path) -> Result<RenderSummary> {
    ReportGenerator::new().write_pdf(out, csv_path)
}

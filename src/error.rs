//! Error types for the csv report generator

use thiserror::Error;

/// Result type alias using ReportError
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while turning a CSV file into a report
#[derive(Debug, Error)]
pub enum ReportError {
    /// Reading the CSV file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV file has no header line
    #[error("CSV file is empty or has an empty header line")]
    EmptyCsv,

    /// The header could not be turned into a column list
    #[error("Malformed CSV: {0}")]
    MalformedCsv(String),

    /// Sampled lengths add up to zero, so no proportions exist
    #[error("Cannot compute column widths: sampled column lengths sum to zero")]
    DegenerateWidths,

    /// The rendering engine failed to compile, fill or export the report
    #[error("Could not generate report: {0}")]
    Generation(#[source] RenderError),
}

/// Errors raised by the rendering engine
#[derive(Debug, Error)]
pub enum RenderError {
    /// The layout failed validation
    #[error("Layout compilation failed: {0}")]
    Compile(String),

    /// The CSV data source could not be read
    #[error("Data source error: {0}")]
    DataSource(#[from] csv::Error),

    /// Filling the report with data failed
    #[error("Report fill failed: {0}")]
    Fill(String),

    /// Error from the underlying lopdf library
    #[error("PDF operation failed: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Writing the PDF to the sink failed
    #[error("PDF export failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ReportError> for std::io::Error {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Io(inner) => inner,
            other => std::io::Error::other(other),
        }
    }
}

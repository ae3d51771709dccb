//! The CSV to PDF pipeline

use crate::Result;
use crate::config::ReportConfig;
use crate::datasource::CsvDataSource;
use crate::error::ReportError;
use crate::ids::{IdGenerator, RandomIds};
use crate::layout::{self, ReportLayout};
use crate::render::{self, RenderSummary};
use crate::sample;
use crate::widths;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use tracing::{debug, error, info, instrument};

/// Generates PDF reports from CSV files
///
/// Column widths come from the first rows of the file; the whole file is
/// then rendered through the layout built from them. The file is read twice.
#[derive(Debug, Clone, Default)]
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    /// Create a generator with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Write the report for `csv_path` as PDF to `out`
    pub fn write_pdf<W: Write>(&self, out: &mut W, csv_path: &Path) -> Result<RenderSummary> {
        self.write_pdf_with_ids(out, csv_path, &mut RandomIds)
    }

    /// Like [`write_pdf`](Self::write_pdf), with element identifiers from `ids`
    #[instrument(skip(self, out, csv_path, ids), fields(csv = %csv_path.display()))]
    pub fn write_pdf_with_ids<W: Write>(
        &self,
        out: &mut W,
        csv_path: &Path,
        ids: &mut dyn IdGenerator,
    ) -> Result<RenderSummary> {
        let layout = self.build_layout(csv_path, ids)?;
        let columns: Vec<String> = layout.fields.iter().map(|f| f.name.clone()).collect();

        let file = File::open(csv_path)?;
        let mut data = CsvDataSource::new(BufReader::new(file), &columns);

        let summary = render::render(&layout, &mut data, out).map_err(|err| {
            error!("Report engine error: {}", err);
            ReportError::Generation(err)
        })?;

        info!(
            "Generated {} page report with {} records",
            summary.pages, summary.records
        );
        Ok(summary)
    }

    /// Sample `csv_path` and build its report layout without rendering
    pub fn build_layout(&self, csv_path: &Path, ids: &mut dyn IdGenerator) -> Result<ReportLayout> {
        let sample = sample::sample_file(csv_path, self.config.sample_rows)?;
        let widths = widths::allocate(&sample, &self.config)?;
        debug!(
            "Sized {} columns from {} sampled rows",
            widths.columns.len(),
            sample.rows_sampled
        );
        Ok(layout::synthesize(&widths, &self.config, ids))
    }
}

//! Configuration for sampling and report layout

use crate::constants::*;

/// Page margins in points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Margins {
    /// Create uniform margins
    pub fn uniform(value: u32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Combined left and right margin
    pub fn horizontal(&self) -> u32 {
        self.left + self.right
    }

    /// Combined top and bottom margin
    pub fn vertical(&self) -> u32 {
        self.top + self.bottom
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(DEFAULT_MARGIN)
    }
}

/// Fixed heights of the report bands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandHeights {
    pub title: u32,
    pub page_header: u32,
    pub column_header: u32,
    pub detail: u32,
    pub page_footer: u32,
    pub summary: u32,
}

impl Default for BandHeights {
    fn default() -> Self {
        Self {
            title: TITLE_BAND_HEIGHT,
            page_header: PAGE_HEADER_BAND_HEIGHT,
            column_header: COLUMN_HEADER_BAND_HEIGHT,
            detail: DETAIL_BAND_HEIGHT,
            page_footer: PAGE_FOOTER_BAND_HEIGHT,
            summary: SUMMARY_BAND_HEIGHT,
        }
    }
}

/// Settings used by every stage of report generation
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Data rows read after the header to size columns
    pub sample_rows: usize,
    /// Base width budget per column
    pub column_width: u32,
    /// Gap placed after each column
    pub column_padding: u32,
    /// Height of header and detail cells
    pub column_height: u32,
    /// Pages are never narrower than this
    pub min_page_width: u32,
    pub page_height: u32,
    pub margins: Margins,
    pub bands: BandHeights,
    pub font_size: f32,
    pub report_name: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sample_rows: DEFAULT_SAMPLE_ROWS,
            column_width: DEFAULT_COLUMN_WIDTH,
            column_padding: DEFAULT_COLUMN_PADDING,
            column_height: DEFAULT_COLUMN_HEIGHT,
            min_page_width: MIN_PAGE_WIDTH,
            page_height: A4_HEIGHT,
            margins: Margins::default(),
            bands: BandHeights::default(),
            font_size: DEFAULT_FONT_SIZE,
            report_name: DEFAULT_REPORT_NAME.to_string(),
        }
    }
}

impl ReportConfig {
    /// Create a configuration with the default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many data rows are sampled
    pub fn with_sample_rows(mut self, rows: usize) -> Self {
        self.sample_rows = rows;
        self
    }

    /// Set the per-column width budget and the gap after each column
    pub fn with_column_width(mut self, width: u32, padding: u32) -> Self {
        self.column_width = width;
        self.column_padding = padding;
        self
    }

    /// Set the height of header and detail cells
    pub fn with_column_height(mut self, height: u32) -> Self {
        self.column_height = height;
        self
    }

    /// Set the minimum page width
    pub fn with_min_page_width(mut self, width: u32) -> Self {
        self.min_page_width = width;
        self
    }

    /// Set the page height
    pub fn with_page_height(mut self, height: u32) -> Self {
        self.page_height = height;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_band_heights(mut self, bands: BandHeights) -> Self {
        self.bands = bands;
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set the name written into the layout document
    pub fn with_report_name<S: Into<String>>(mut self, name: S) -> Self {
        self.report_name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.sample_rows, 10);
        assert_eq!(config.column_width, 80);
        assert_eq!(config.column_padding, 10);
        assert_eq!(config.min_page_width, 555);
        assert_eq!(config.page_height, 842);
        assert_eq!(config.margins.horizontal(), 40);
        assert_eq!(config.bands.detail, 47);
    }

    #[test]
    fn test_builder() {
        let config = ReportConfig::new()
            .with_sample_rows(3)
            .with_column_width(60, 5)
            .with_margins(Margins::uniform(10))
            .with_report_name("Sales");

        assert_eq!(config.sample_rows, 3);
        assert_eq!(config.column_width, 60);
        assert_eq!(config.column_padding, 5);
        assert_eq!(config.margins.vertical(), 20);
        assert_eq!(config.report_name, "Sales");
    }
}

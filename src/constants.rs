//! Default layout values, in PDF points unless noted otherwise

/// Standard A4 page height in points
pub const A4_HEIGHT: u32 = 842;

/// Smallest page width a report is rendered at
pub const MIN_PAGE_WIDTH: u32 = 555;

/// Number of data rows read to estimate column widths
pub const DEFAULT_SAMPLE_ROWS: usize = 10;

/// Base width budget per column
pub const DEFAULT_COLUMN_WIDTH: u32 = 80;

/// Horizontal gap after each column
pub const DEFAULT_COLUMN_PADDING: u32 = 10;

/// Height of header and detail cells
pub const DEFAULT_COLUMN_HEIGHT: u32 = 20;

/// Default page margin on every side
pub const DEFAULT_MARGIN: u32 = 20;

/// Default band heights
pub const TITLE_BAND_HEIGHT: u32 = 79;
pub const PAGE_HEADER_BAND_HEIGHT: u32 = 35;
pub const COLUMN_HEADER_BAND_HEIGHT: u32 = 35;
pub const DETAIL_BAND_HEIGHT: u32 = 47;
pub const PAGE_FOOTER_BAND_HEIGHT: u32 = 54;
pub const SUMMARY_BAND_HEIGHT: u32 = 42;

/// Default character width ratio for text estimation
/// (average character width as a fraction of font size)
pub const DEFAULT_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Default font size in points
pub const DEFAULT_FONT_SIZE: f32 = 10.0;

/// Report name written into the layout document
pub const DEFAULT_REPORT_NAME: &str = "PDF Report";

//! Filling a compiled layout with records, page by page

use crate::datasource::DataSource;
use crate::error::RenderError;
use crate::layout::{Band, ElementContent, ReportLayout};
use crate::render::CompiledReport;
use tracing::{debug, trace};

/// A report laid out on pages, ready to be exported
#[derive(Debug, Clone, PartialEq)]
pub struct FilledReport {
    pub page_width: u32,
    pub page_height: u32,
    pub font_size: f32,
    pub pages: Vec<FilledPage>,
    /// Number of records placed in detail bands
    pub records: usize,
}

/// Text placed on one page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilledPage {
    pub texts: Vec<PrintedText>,
}

/// A piece of text at a fixed spot on a page
///
/// Coordinates are measured from the top-left corner of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintedText {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub text: String,
}

/// Place every record of `data` into the layout's bands
///
/// The title band opens the first page. Each page starts with the page header
/// and column header, and detail bands follow until the next one would run
/// into the page footer. The summary band follows the last record.
pub fn fill_report<D: DataSource>(
    report: &CompiledReport<'_>,
    data: &mut D,
) -> Result<FilledReport, RenderError> {
    let layout = report.layout();
    let mut filler = PageFiller::new(layout);

    filler.start_page(true);
    let mut records = 0;

    while data.next()? {
        if !filler.fits(layout.detail.height) {
            if !filler.has_details {
                return Err(RenderError::Fill(format!(
                    "detail band of height {} does not fit on an empty page",
                    layout.detail.height
                )));
            }
            filler.finish_page();
            filler.start_page(false);
        }
        filler.place_band(&layout.detail, Some(&*data as &dyn DataSource));
        filler.has_details = true;
        records += 1;
    }

    if !filler.fits(layout.summary.height) {
        filler.finish_page();
        filler.start_page(false);
        if !filler.fits(layout.summary.height) {
            return Err(RenderError::Fill(format!(
                "summary band of height {} does not fit on an empty page",
                layout.summary.height
            )));
        }
    }
    filler.place_band(&layout.summary, None);
    filler.finish_page();

    debug!(
        "Filled {} records onto {} pages",
        records,
        filler.pages.len()
    );

    Ok(FilledReport {
        page_width: layout.page_width,
        page_height: layout.page_height,
        font_size: layout.font_size,
        pages: filler.pages,
        records,
    })
}

struct PageFiller<'a> {
    layout: &'a ReportLayout,
    pages: Vec<FilledPage>,
    current: FilledPage,
    /// Distance from the top margin to the next free spot
    offset: u32,
    has_details: bool,
}

impl<'a> PageFiller<'a> {
    fn new(layout: &'a ReportLayout) -> Self {
        Self {
            layout,
            pages: Vec::new(),
            current: FilledPage::default(),
            offset: 0,
            has_details: false,
        }
    }

    /// Top of the page footer, relative to the top margin
    fn footer_top(&self) -> u32 {
        let printable = self
            .layout
            .page_height
            .saturating_sub(self.layout.margins.vertical());
        printable.saturating_sub(self.layout.page_footer.height)
    }

    fn fits(&self, height: u32) -> bool {
        self.offset + height <= self.footer_top()
    }

    fn start_page(&mut self, first: bool) {
        trace!("Starting page {}", self.pages.len() + 1);
        self.current = FilledPage::default();
        self.offset = 0;
        self.has_details = false;

        let layout = self.layout;
        if first {
            self.place_band(&layout.title, None);
        }
        self.place_band(&layout.page_header, None);
        self.place_band(&layout.column_header, None);
    }

    fn finish_page(&mut self) {
        let layout = self.layout;
        self.offset = self.footer_top();
        self.place_band(&layout.page_footer, None);
        self.pages.push(std::mem::take(&mut self.current));
    }

    fn place_band(&mut self, band: &Band, record: Option<&dyn DataSource>) {
        let left = self.layout.margins.left;
        let top = self.layout.margins.top + self.offset;

        for element in &band.elements {
            let text = match &element.content {
                ElementContent::StaticText(text) => text.clone(),
                ElementContent::TextField(field) => record
                    .and_then(|r| r.field_value(field.name()))
                    .unwrap_or_default()
                    .to_string(),
            };
            let g = element.geometry;
            self.current.texts.push(PrintedText {
                x: left + g.x,
                y: top + g.y,
                width: g.width,
                height: g.height,
                text,
            });
        }

        self.offset += band.height;
    }
}

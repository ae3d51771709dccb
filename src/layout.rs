//! Report layout synthesis
//!
//! A [`ReportLayout`] describes where the rendering engine places text and
//! which data field each text element shows. It is built from the column
//! widths: one header label and one bound detail cell per column, laid out
//! left to right.

use crate::config::{Margins, ReportConfig};
use crate::ids::IdGenerator;
use crate::widths::ColumnWidths;
use std::fmt;
use tracing::{debug, trace};
use uuid::Uuid;

/// Complete description of a report's page geometry, fields and bands
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub id: Uuid,
    pub name: String,
    pub page_width: u32,
    pub page_height: u32,
    /// Width available to the columns
    pub column_width: u32,
    pub margins: Margins,
    pub font_size: f32,
    pub fields: Vec<FieldDef>,
    pub background: Band,
    pub title: Band,
    pub page_header: Band,
    pub column_header: Band,
    pub detail: Band,
    pub page_footer: Band,
    pub summary: Band,
}

impl ReportLayout {
    /// Bands in document order, with their layout-document names
    pub fn bands(&self) -> [(&'static str, &Band); 7] {
        [
            ("background", &self.background),
            ("title", &self.title),
            ("pageHeader", &self.page_header),
            ("columnHeader", &self.column_header),
            ("detail", &self.detail),
            ("pageFooter", &self.page_footer),
            ("summary", &self.summary),
        ]
    }

    /// Look up a declared field by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A data field the report reads from its data source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
}

/// A horizontal strip of the report
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Band {
    pub height: u32,
    pub elements: Vec<Element>,
}

impl Band {
    /// A band with no elements
    pub fn empty(height: u32) -> Self {
        Self {
            height,
            elements: Vec::new(),
        }
    }
}

/// Position and size of an element, relative to its band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Geometry {
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// A text element placed in a band
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: Uuid,
    /// Shared by the header and detail element of the same column
    pub connection_id: Uuid,
    pub geometry: Geometry,
    pub content: ElementContent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementContent {
    /// Literal text, e.g. a column label
    StaticText(String),
    /// Text taken from the current record
    TextField(FieldRef),
}

/// Reference to a declared field, written as `$F{name}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef(pub String);

impl FieldRef {
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$F{{{}}}", self.0)
    }
}

/// Build the report layout for the given column widths
pub fn synthesize(
    widths: &ColumnWidths,
    config: &ReportConfig,
    ids: &mut dyn IdGenerator,
) -> ReportLayout {
    let id = ids.next_id();

    let fields = widths
        .names()
        .map(|name| FieldDef {
            name: name.to_string(),
            kind: FieldKind::Text,
        })
        .collect();

    let mut column_header = Band::empty(config.bands.column_header);
    let mut detail = Band::empty(config.bands.detail);

    let mut x = 0;
    for column in &widths.columns {
        let geometry = Geometry {
            x,
            y: 0,
            width: column.width,
            height: config.column_height,
        };
        let connection_id = ids.next_id();

        column_header.elements.push(Element {
            id: ids.next_id(),
            connection_id,
            geometry,
            content: ElementContent::StaticText(column.name.clone()),
        });
        detail.elements.push(Element {
            id: ids.next_id(),
            connection_id,
            geometry,
            content: ElementContent::TextField(FieldRef(column.name.clone())),
        });
        trace!("Placed column '{}' at {:?}", column.name, geometry);

        x += column.width + config.column_padding;
    }

    debug!(
        "Synthesized layout with {} columns on a {}x{} page",
        widths.columns.len(),
        widths.page_width,
        config.page_height
    );

    ReportLayout {
        id,
        name: config.report_name.clone(),
        page_width: widths.page_width,
        page_height: config.page_height,
        column_width: widths.total_width,
        margins: config.margins,
        font_size: config.font_size,
        fields,
        background: Band::empty(0),
        title: Band::empty(config.bands.title),
        page_header: Band::empty(config.bands.page_header),
        column_header,
        detail,
        page_footer: Band::empty(config.bands.page_footer),
        summary: Band::empty(config.bands.summary),
    }
}

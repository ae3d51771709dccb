//! Rendering engine entry point: compile, fill and export a report

use crate::datasource::DataSource;
use crate::drawing;
use crate::error::RenderError;
use crate::fill;
use crate::layout::{ElementContent, ReportLayout};
use std::collections::HashSet;
use std::io::Write;
use tracing::{debug, instrument, warn};

/// Outcome of a successful render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub pages: usize,
    pub records: usize,
}

/// A layout that passed validation
#[derive(Debug, Clone, Copy)]
pub struct CompiledReport<'a> {
    layout: &'a ReportLayout,
}

impl<'a> CompiledReport<'a> {
    pub fn layout(&self) -> &'a ReportLayout {
        self.layout
    }

    #[cfg(test)]
    pub(crate) fn unchecked(layout: &'a ReportLayout) -> Self {
        Self { layout }
    }
}

/// Validate a layout before it is filled
///
/// Fails when fields are missing or duplicated, when a text field refers to
/// an undeclared field, when an element sticks out of the bottom of its band,
/// when the fixed bands leave no room for a detail band on the first page,
/// or when the summary band would not fit on a page of its own. Elements
/// that reach past the printable width are only logged.
pub fn compile(layout: &ReportLayout) -> Result<CompiledReport<'_>, RenderError> {
    if layout.fields.is_empty() {
        return Err(RenderError::Compile("report declares no fields".to_string()));
    }

    let mut declared = HashSet::new();
    for field in &layout.fields {
        if !declared.insert(field.name.as_str()) {
            return Err(RenderError::Compile(format!(
                "field '{}' is declared more than once",
                field.name
            )));
        }
    }

    let printable_width = layout.page_width.saturating_sub(layout.margins.horizontal());
    let printable_height = layout.page_height.saturating_sub(layout.margins.vertical());

    for (band_name, band) in layout.bands() {
        for element in &band.elements {
            let g = element.geometry;

            if let ElementContent::TextField(field) = &element.content {
                if !declared.contains(field.name()) {
                    return Err(RenderError::Compile(format!(
                        "text field in {band_name} band refers to undeclared field '{}'",
                        field.name()
                    )));
                }
            }

            if g.bottom() > band.height {
                return Err(RenderError::Compile(format!(
                    "element {} reaches outside the {band_name} band: y={} height={} band height={}",
                    element.id, g.y, g.height, band.height
                )));
            }

            if g.right() > printable_width {
                warn!(
                    "Element {} in {} band reaches past the printable width: x={} width={} available={}",
                    element.id,
                    band_name,
                    g.x,
                    g.width,
                    printable_width
                );
            }
        }
    }

    let first_page = layout.title.height
        + layout.page_header.height
        + layout.column_header.height
        + layout.detail.height
        + layout.page_footer.height;
    if first_page > printable_height {
        return Err(RenderError::Compile(format!(
            "bands need {first_page} points but the page only has {printable_height}"
        )));
    }

    // The summary may be pushed onto a fresh page with only the headers above it
    let summary_page = layout.page_header.height
        + layout.column_header.height
        + layout.summary.height
        + layout.page_footer.height;
    if summary_page > printable_height {
        return Err(RenderError::Compile(format!(
            "summary band needs {summary_page} points but the page only has {printable_height}"
        )));
    }

    debug!(
        "Compiled layout '{}' with {} fields",
        layout.name,
        layout.fields.len()
    );
    Ok(CompiledReport { layout })
}

/// Render a layout filled from `data` as a PDF into `sink`
#[instrument(skip_all, fields(report = %layout.name))]
pub fn render<D: DataSource, W: Write>(
    layout: &ReportLayout,
    data: &mut D,
    sink: &mut W,
) -> Result<RenderSummary, RenderError> {
    let compiled = compile(layout)?;
    let filled = fill::fill_report(&compiled, data)?;
    drawing::export_pdf(&filled, sink)?;

    let summary = RenderSummary {
        pages: filled.pages.len(),
        records: filled.records,
    };
    debug!("Rendered {:?}", summary);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::datasource::MemoryDataSource;
    use crate::ids::SequentialIds;
    use crate::layout::{FieldDef, FieldKind, FieldRef, synthesize};
    use crate::widths::{AllocatedColumn, ColumnWidths};

    fn layout(names: &[&str]) -> ReportLayout {
        let total_width = 90 * names.len() as u32;
        let widths = ColumnWidths {
            columns: names
                .iter()
                .map(|name| AllocatedColumn {
                    name: name.to_string(),
                    percent: 100.0 / names.len() as f32,
                    width: 90,
                })
                .collect(),
            total_width,
            page_width: (total_width + 40).max(555),
        };
        synthesize(&widths, &ReportConfig::default(), &mut SequentialIds::new())
    }

    #[test]
    fn test_compile_valid_layout() {
        let layout = layout(&["a", "b"]);
        let compiled = compile(&layout).unwrap();
        assert_eq!(compiled.layout().fields.len(), 2);
    }

    #[test]
    fn test_compile_wide_layout_only_warns() {
        // The running offset adds padding the page width does not account for
        let layout = layout(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        let last = layout.detail.elements.last().unwrap().geometry;
        assert!(last.right() > layout.page_width - 40);
        assert!(compile(&layout).is_ok());
    }

    #[test]
    fn test_compile_rejects_undeclared_field() {
        let mut layout = layout(&["a"]);
        if let ElementContent::TextField(field) = &mut layout.detail.elements[0].content {
            *field = FieldRef("missing".to_string());
        }
        let err = compile(&layout).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_compile_rejects_duplicate_and_missing_fields() {
        let mut layout = layout(&["a"]);
        layout.fields.push(FieldDef {
            name: "a".to_string(),
            kind: FieldKind::Text,
        });
        assert!(matches!(compile(&layout), Err(RenderError::Compile(_))));

        layout.fields.clear();
        assert!(matches!(compile(&layout), Err(RenderError::Compile(_))));
    }

    #[test]
    fn test_compile_rejects_tall_elements() {
        let mut layout = layout(&["a"]);
        layout.column_header.elements[0].geometry.height = 36;
        assert!(matches!(compile(&layout), Err(RenderError::Compile(_))));
    }

    #[test]
    fn test_compile_rejects_tall_summary() {
        // 802 printable: 35 + 35 + 680 + 54 overflows, 678 still fits
        let mut layout = layout(&["a"]);
        layout.summary.height = 680;
        let err = compile(&layout).unwrap_err();
        assert!(err.to_string().contains("summary band"));

        layout.summary.height = 678;
        assert!(compile(&layout).is_ok());
    }

    #[test]
    fn test_render_to_pdf() {
        let layout = layout(&["a", "b"]);
        let mut data = MemoryDataSource::new(
            &["a", "b"],
            (0..20).map(|i| vec![i.to_string(), format!("row {i}")]).collect(),
        );
        let mut out = Vec::new();

        let summary = render(&layout, &mut data, &mut out).unwrap();
        assert_eq!(
            summary,
            RenderSummary {
                pages: 2,
                records: 20
            }
        );

        let doc = lopdf::Document::load_mem(&out).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }
}

//! PDF drawing operations for filled reports

use crate::error::RenderError;
use crate::fill::{FilledPage, FilledReport, PrintedText};
use crate::text::{encode_win_ansi, fit_text};
use lopdf::{
    Document, Object, ObjectId, Stream, StringFormat,
    content::{Content, Operation},
    dictionary,
};
use std::io::Write;
use tracing::{debug, trace};

const FONT_RESOURCE: &str = "F1";

/// Build a PDF document with one page per filled page
pub fn build_document(report: &FilledReport) -> Result<Document, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_RESOURCE => font_id,
        },
    });

    let media_box: Vec<Object> = vec![
        0.into(),
        0.into(),
        i64::from(report.page_width).into(),
        i64::from(report.page_height).into(),
    ];

    let mut kids: Vec<Object> = Vec::with_capacity(report.pages.len());
    for (index, page) in report.pages.iter().enumerate() {
        let page_id = add_page(
            &mut doc,
            pages_id,
            resources_id,
            media_box.clone(),
            page,
            report,
        )?;
        trace!("Added page {} as {:?}", index + 1, page_id);
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    debug!("Built PDF document with {} pages", page_count);
    Ok(doc)
}

/// Write the report as a PDF document to `sink`
pub fn export_pdf<W: Write>(report: &FilledReport, sink: &mut W) -> Result<(), RenderError> {
    let mut doc = build_document(report)?;
    doc.save_to(sink)?;
    sink.flush()?;
    Ok(())
}

fn add_page(
    doc: &mut Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    media_box: Vec<Object>,
    page: &FilledPage,
    report: &FilledReport,
) -> Result<ObjectId, RenderError> {
    let content = Content {
        operations: page_operations(page, report),
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => media_box,
        "Resources" => resources_id,
        "Contents" => content_id,
    }))
}

/// Content stream operations for every text on a page
pub fn page_operations(page: &FilledPage, report: &FilledReport) -> Vec<Operation> {
    let mut operations = Vec::new();
    for text in &page.texts {
        operations.extend(draw_text_operations(text, report.page_height, report.font_size));
    }
    trace!("Generated {} operations", operations.len());
    operations
}

/// Draw text top-aligned inside its box
fn draw_text_operations(text: &PrintedText, page_height: u32, font_size: f32) -> Vec<Operation> {
    let line = fit_text(&text.text, text.width as f32, font_size);
    if line.is_empty() {
        return Vec::new();
    }

    // PDF space grows upwards from the bottom edge
    let x = text.x as f32;
    let baseline = page_height as f32 - text.y as f32 - font_size;

    vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![
                Object::Name(FONT_RESOURCE.as_bytes().to_vec()),
                font_size.into(),
            ],
        ),
        Operation::new("rg", vec![0.into(), 0.into(), 0.into()]),
        Operation::new("Td", vec![x.into(), baseline.into()]),
        Operation::new(
            "Tj",
            vec![Object::String(
                encode_win_ansi(&line),
                StringFormat::Hexadecimal,
            )],
        ),
        Operation::new("ET", vec![]),
    ]
}

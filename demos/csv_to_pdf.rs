//! Render a CSV file as a PDF report
//!
//! Usage: cargo run --example csv_to_pdf [input.csv]

use lopdf_csv_report::{RandomIds, ReportGenerator};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    let bundled = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/data/sample.csv");
    let input = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(bundled));

    let generator = ReportGenerator::new();

    // Keep the layout next to the PDF for inspection
    let layout = generator.build_layout(&input, &mut RandomIds)?;
    fs::write("csv_report.jrxml", layout.to_jrxml())?;
    println!("Layout saved as 'csv_report.jrxml'");

    let mut out = BufWriter::new(File::create("csv_report.pdf")?);
    let summary = generator.write_pdf(&mut out, &input)?;
    println!(
        "PDF saved as 'csv_report.pdf' ({} pages, {} records)",
        summary.pages, summary.records
    );

    Ok(())
}

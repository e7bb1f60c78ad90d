//! # pdfdigest
//!
//! Batch summarization of PDF documents into structured JSON.
//!
//! Every PDF is turned into one artifact holding its metadata, per-page
//! statistics, heuristically detected headings and tables, and the most
//! frequent keywords of the document.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfdigest::{process_directory, summarize_file};
//!
//! fn main() -> pdfdigest::Result<()> {
//!     // Summarize a single file
//!     let artifact = summarize_file("report.pdf")?;
//!     println!("{} keywords", artifact.content_analysis.structure.keywords.len());
//!
//!     // Or a whole directory, one JSON file per PDF
//!     let report = process_directory("input", "output")?;
//!     println!("{} processed, {} failed", report.processed_count, report.error_count);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Heading candidates**: upper-case, numbered and title-like lines
//! - **Table grids**: raw cell grids from aligned text, cleaned and truncated
//! - **Keywords**: stop-word filtered word frequencies per document
//! - **Parallel batches**: bounded worker pool, per-file failure isolation

pub mod analysis;
pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use batch::{BatchOptions, BatchProcessor, BatchReport, FileOutcome, FileStatus};
pub use detect::{pdf_version_from_bytes, sniff_pdf_version};
pub use error::{Error, Result};
pub use model::{
    Artifact, DocumentMetadata, DocumentStructure, Heading, HeadingKind, Keyword, PageContent,
    Table,
};
pub use parser::{LopdfBackend, MetadataSource, PdfBackend};
pub use render::JsonFormat;

use std::path::Path;

/// Summarize a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdfdigest::summarize_file;
///
/// let artifact = summarize_file("report.pdf").unwrap();
/// println!("Pages analyzed: {}", artifact.analyzed_pages());
/// ```
pub fn summarize_file<P: AsRef<Path>>(path: P) -> Result<Artifact> {
    batch::summarize_path(path.as_ref())
}

/// Summarize a PDF held in memory. `filename` is recorded in the artifact.
///
/// # Example
///
/// ```no_run
/// use pdfdigest::summarize_bytes;
///
/// let data = std::fs::read("report.pdf").unwrap();
/// let artifact = summarize_bytes(&data, "report.pdf").unwrap();
/// ```
pub fn summarize_bytes(data: &[u8], filename: &str) -> Result<Artifact> {
    let backend = LopdfBackend::load_bytes(data)?;
    Ok(batch::summarize_document(&backend, filename, data.len() as u64))
}

/// Summarize a PDF file and render the artifact as JSON.
///
/// # Example
///
/// ```no_run
/// use pdfdigest::{to_json, JsonFormat};
///
/// let json = to_json("report.pdf", JsonFormat::Pretty).unwrap();
/// std::fs::write("report.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let artifact = summarize_file(path)?;
    render::to_json(&artifact, format)
}

/// Process every PDF in `input_dir`, writing one JSON file per document to
/// `output_dir` with the default options.
///
/// Fails only when the run cannot start; per-file failures are counted in
/// the returned report.
pub fn process_directory<P, Q>(input_dir: P, output_dir: Q) -> Result<BatchReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let options = BatchOptions::new(input_dir.as_ref(), output_dir.as_ref());
    BatchProcessor::new(options).run()
}

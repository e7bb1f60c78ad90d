//! Error types for pdfdigest.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdfdigest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while summarizing PDF documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted and cannot be read.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Error enumerating images on a page.
    #[error("Image extraction error: {0}")]
    ImageExtract(String),

    /// Error building raw table grids for a page.
    #[error("Table extraction error: {0}")]
    TableExtract(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Error during JSON rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// The configured input directory does not exist.
    #[error("Input directory not found: {}", .0.display())]
    InputDirMissing(PathBuf),

    /// The worker pool could not be started.
    #[error("Failed to start worker pool: {0}")]
    WorkerPool(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

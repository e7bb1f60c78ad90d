//! PDF header sniffing.
//!
//! Files are checked for the `%PDF-x.y` magic before they are handed to the
//! backend, so that stray non-PDF files with a `.pdf` extension fail fast
//! with [`Error::UnknownFormat`] instead of a parser-specific message.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"
const HEADER_PROBE_LEN: u64 = 16;

/// Read the header of `path` and return the declared PDF version.
pub fn sniff_pdf_version<P: AsRef<Path>>(path: P) -> Result<String> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(HEADER_PROBE_LEN as usize);
    file.take(HEADER_PROBE_LEN).read_to_end(&mut header)?;
    pdf_version_from_bytes(&header)
}

/// Return the PDF version declared by a header byte slice.
pub fn pdf_version_from_bytes(data: &[u8]) -> Result<String> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnknownFormat);
    }

    Ok(version)
}

fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

//! PDF backend abstraction layer.
//!
//! The analysis code talks to a PDF library only through the two traits
//! here: [`MetadataSource`] for the info dictionary and [`PdfBackend`] for
//! page contents. [`LopdfBackend`] implements both on top of `lopdf`.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use super::spans::{decode_text_simple, extract_spans};
use super::table_grid::TableGridDetector;
use crate::detect::sniff_pdf_version;
use crate::error::{Error, Result};

/// One table cell as returned by the backend; `None` when the cell is empty.
pub type RawCell = Option<String>;

/// A raw table: rows of cells, not cleaned.
pub type RawTable = Vec<Vec<RawCell>>;

/// An image referenced from a page's resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Resource name (e.g. `Im1`)
    pub name: String,
}

/// Header fields as stored in the file; any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub modification_date: Option<String>,
    /// Total number of pages in the document
    pub page_count: u32,
}

/// Read access to document-level header metadata.
pub trait MetadataSource {
    fn read_metadata(&self) -> Result<RawMetadata>;
}

/// Page-level content access.
///
/// Page numbers are 1-indexed.
pub trait PdfBackend {
    /// Total number of pages.
    fn page_count(&self) -> u32;

    /// Plain text of a page; empty when the page has no text.
    fn page_text(&self, page: u32) -> Result<String>;

    /// Images referenced by the page.
    fn page_images(&self, page: u32) -> Result<Vec<ImageRef>>;

    /// Raw table grids found on the page.
    fn page_tables(&self, page: u32) -> Result<Vec<RawTable>>;
}

/// Concrete backend over `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
    grid: TableGridDetector,
}

impl LopdfBackend {
    /// Open a PDF file after checking its header.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let version = sniff_pdf_version(path)?;
        let doc = LopdfDocument::load(path)?;
        log::debug!(
            "Opened {} (PDF {}, {} objects)",
            path.display(),
            version,
            doc.objects.len()
        );
        Ok(Self::from_document(doc))
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        crate::detect::pdf_version_from_bytes(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self::from_document(doc))
    }

    fn from_document(doc: LopdfDocument) -> Self {
        let pages = doc.get_pages();
        Self {
            doc,
            pages,
            grid: TableGridDetector::new(),
        }
    }

    fn page_id(&self, page: u32) -> Result<ObjectId> {
        self.pages
            .get(&page)
            .copied()
            .ok_or(Error::PageOutOfRange(page, self.pages.len() as u32))
    }

    fn resolve_dict<'a>(&'a self, obj: &'a Object) -> Option<&'a Dictionary> {
        match obj {
            Object::Reference(r) => self.doc.get_dictionary(*r).ok(),
            Object::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// The page's resource dictionary, inherited from the page tree when the
    /// page has none of its own.
    fn page_resources(&self, page_id: ObjectId) -> Result<Option<&Dictionary>> {
        const MAX_TREE_DEPTH: usize = 32;

        let mut current = Some(
            self.doc
                .get_dictionary(page_id)
                .map_err(|e| Error::PdfParse(e.to_string()))?,
        );

        for _ in 0..MAX_TREE_DEPTH {
            let Some(dict) = current else { break };
            let resources = dict.get(b"Resources").ok().and_then(|r| self.resolve_dict(r));
            if resources.is_some() {
                return Ok(resources);
            }
            current = dict
                .get(b"Parent")
                .ok()
                .and_then(|p| p.as_reference().ok())
                .and_then(|id| self.doc.get_dictionary(id).ok());
        }

        Ok(None)
    }

    fn image_ref(&self, name: &[u8], obj: &Object) -> Option<ImageRef> {
        let stream = match obj {
            Object::Reference(r) => match self.doc.get_object(*r).ok()? {
                Object::Stream(s) => s,
                _ => return None,
            },
            Object::Stream(s) => s,
            _ => return None,
        };

        if stream.dict.get(b"Subtype").ok()?.as_name_str().ok()? != "Image" {
            return None;
        }

        Some(ImageRef {
            name: String::from_utf8_lossy(name).to_string(),
        })
    }
}

impl MetadataSource for LopdfBackend {
    fn read_metadata(&self) -> Result<RawMetadata> {
        let mut metadata = RawMetadata {
            page_count: self.pages.len() as u32,
            ..Default::default()
        };

        let info = match self.doc.trailer.get(b"Info") {
            Ok(obj) => self
                .resolve_dict(obj)
                .ok_or_else(|| Error::PdfParse("Info entry is not a dictionary".to_string()))?,
            // No info dictionary is not an error; every field stays absent.
            Err(_) => return Ok(metadata),
        };

        metadata.title = get_string_from_dict(info, b"Title");
        metadata.author = get_string_from_dict(info, b"Author");
        metadata.subject = get_string_from_dict(info, b"Subject");
        metadata.creator = get_string_from_dict(info, b"Creator");
        metadata.producer = get_string_from_dict(info, b"Producer");
        metadata.creation_date = get_string_from_dict(info, b"CreationDate");
        metadata.modification_date = get_string_from_dict(info, b"ModDate");

        Ok(metadata)
    }
}

impl PdfBackend for LopdfBackend {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_text(&self, page: u32) -> Result<String> {
        self.page_id(page)?;
        self.doc
            .extract_text(&[page])
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page, e)))
    }

    fn page_images(&self, page: u32) -> Result<Vec<ImageRef>> {
        let page_id = self.page_id(page)?;
        let resources = self
            .page_resources(page_id)
            .map_err(|e| Error::ImageExtract(format!("Page {}: {}", page, e)))?;

        let Some(xobjects) = resources
            .and_then(|res| res.get(b"XObject").ok())
            .and_then(|x| self.resolve_dict(x))
        else {
            return Ok(Vec::new());
        };

        Ok(xobjects
            .iter()
            .filter_map(|(name, obj)| self.image_ref(name, obj))
            .collect())
    }

    fn page_tables(&self, page: u32) -> Result<Vec<RawTable>> {
        let page_id = self.page_id(page)?;
        let content = self
            .doc
            .get_page_content(page_id)
            .map_err(|e| Error::TableExtract(format!("Page {}: {}", page, e)))?;
        let spans = extract_spans(&self.doc, page_id, &content)
            .map_err(|e| Error::TableExtract(format!("Page {}: {}", page, e)))?;
        Ok(self.grid.detect(&spans))
    }
}

/// Helper to get a string from a PDF dictionary.
fn get_string_from_dict(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => Some(decode_text_simple(bytes)),
        Object::Name(bytes) => Some(String::from_utf8_lossy(bytes).to_string()),
        _ => None,
    }
}

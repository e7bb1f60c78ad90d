//! The per-file output artifact.

use serde::{Deserialize, Serialize};

use super::{DocumentMetadata, DocumentStructure, Heading, PageContent, Table};
use crate::analysis::{truncate_chars, FULL_TEXT_CHARS, PREVIEW_CHARS};

/// Summary of one PDF file, serialized as the JSON artifact.
///
/// Field order here is the key order of the written JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub document_info: DocumentInfo,
    pub content_analysis: ContentAnalysis,
    pub extracted_data: ExtractedData,
}

/// File identity and header metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Input file name, including extension
    pub filename: String,

    /// Local time the artifact was built (`%Y-%m-%d %H:%M:%S`)
    pub processing_timestamp: String,

    pub metadata: DocumentMetadata,
}

/// Document statistics plus one short summary per page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub structure: DocumentStructure,
    pub pages: Vec<PageSummary>,
}

/// Compact per-page view used in `content_analysis.pages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    pub page_number: u32,
    pub word_count: usize,
    pub has_images: bool,
    pub table_count: usize,
    pub heading_count: usize,
    pub preview_text: String,
}

impl From<&PageContent> for PageSummary {
    fn from(page: &PageContent) -> Self {
        let preview_text = if page.text.chars().count() > PREVIEW_CHARS {
            format!("{}...", truncate_chars(&page.text, PREVIEW_CHARS))
        } else {
            page.text.clone()
        };

        Self {
            page_number: page.page_number,
            word_count: page.word_count,
            has_images: page.has_images,
            table_count: page.tables.len(),
            heading_count: page.headings.len(),
            preview_text,
        }
    }
}

/// Tables, headings and text flattened across all pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedData {
    pub tables: Vec<Table>,
    pub headings: Vec<Heading>,
    pub full_text: String,
}

impl ExtractedData {
    /// Flatten page records in page order.
    pub fn from_pages(pages: &[PageContent]) -> Self {
        let joined = pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            tables: pages.iter().flat_map(|p| p.tables.iter().cloned()).collect(),
            headings: pages.iter().flat_map(|p| p.headings.iter().cloned()).collect(),
            full_text: truncate_chars(&joined, FULL_TEXT_CHARS).to_string(),
        }
    }
}

impl Artifact {
    /// Assemble the artifact for one document.
    pub fn new(
        filename: impl Into<String>,
        processing_timestamp: impl Into<String>,
        metadata: DocumentMetadata,
        structure: DocumentStructure,
        pages: &[PageContent],
    ) -> Self {
        Self {
            document_info: DocumentInfo {
                filename: filename.into(),
                processing_timestamp: processing_timestamp.into(),
                metadata,
            },
            content_analysis: ContentAnalysis {
                structure,
                pages: pages.iter().map(PageSummary::from).collect(),
            },
            extracted_data: ExtractedData::from_pages(pages),
        }
    }

    /// Number of pages that were analyzed.
    pub fn analyzed_pages(&self) -> usize {
        self.content_analysis.pages.len()
    }
}

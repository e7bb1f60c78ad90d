//! Document-level types.

use serde::{Deserialize, Serialize};

/// Document metadata read from the PDF info dictionary.
///
/// Every field is defaulted: a missing or unreadable info entry is an empty
/// string, and a metadata record that could not be read at all is
/// `DocumentMetadata::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Document title
    pub title: String,

    /// Document author
    pub author: String,

    /// Document subject
    pub subject: String,

    /// Creator application
    pub creator: String,

    /// PDF producer
    pub producer: String,

    /// Raw creation date string (e.g. `D:20240115103045Z`)
    pub creation_date: String,

    /// Raw modification date string
    pub modification_date: String,

    /// Total number of pages in the file (not capped)
    pub page_count: u32,

    /// File size in bytes
    #[serde(rename = "file_size_bytes")]
    pub file_size: u64,
}

/// A keyword and how often it occurs in the document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub word: String,
    pub frequency: usize,
}

/// Aggregate statistics over all processed pages of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStructure {
    /// Sum of per-page word counts
    pub total_words: usize,

    /// Number of tables kept across all pages
    pub total_tables: usize,

    /// Number of heading candidates across all pages
    pub total_headings: usize,

    /// Number of pages with at least one embedded image
    pub pages_with_images: usize,

    /// Most frequent non-stop-words, highest first
    pub keywords: Vec<Keyword>,

    /// `total_words / page count`, integer division
    pub average_words_per_page: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_default_is_empty() {
        let metadata = DocumentMetadata::default();
        assert!(metadata.title.is_empty());
        assert!(metadata.creation_date.is_empty());
        assert_eq!(metadata.page_count, 0);
        assert_eq!(metadata.file_size, 0);
    }

    #[test]
    fn test_metadata_serializes_file_size_bytes() {
        let metadata = DocumentMetadata {
            file_size: 2048,
            ..Default::default()
        };
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["file_size_bytes"], 2048);
        assert!(json.get("file_size").is_none());
    }
}

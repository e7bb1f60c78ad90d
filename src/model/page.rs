//! Page-level types.

use super::Table;
use serde::{Deserialize, Serialize};

/// Which heuristic rule classified a line as a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingKind {
    /// The whole line is upper-case
    Uppercase,
    /// The line starts with a section number such as `2.` or `10`
    Numbered,
    /// A short capitalized line followed by a longer line
    Title,
}

/// A line of page text that looks like a section heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Trimmed line text
    pub text: String,

    /// Rule that matched
    #[serde(rename = "type")]
    pub kind: HeadingKind,

    /// 1-indexed position of the line in the page text
    pub line_number: usize,
}

impl Heading {
    pub fn new(text: impl Into<String>, kind: HeadingKind, line_number: usize) -> Self {
        Self {
            text: text.into(),
            kind,
            line_number,
        }
    }
}

/// Everything extracted from a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Extracted text, truncated
    pub text: String,

    /// Whitespace-separated word count of the untruncated text
    pub word_count: usize,

    /// Whether the page references at least one image
    pub has_images: bool,

    /// Normalized tables
    pub tables: Vec<Table>,

    /// Heading candidates, in line order
    pub headings: Vec<Heading>,
}

impl PageContent {
    /// An empty record for a page whose extraction failed.
    pub fn empty(page_number: u32) -> Self {
        Self {
            page_number,
            text: String::new(),
            word_count: 0,
            has_images: false,
            tables: Vec::new(),
            headings: Vec::new(),
        }
    }

    /// Check if nothing was extracted from the page.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.tables.is_empty() && !self.has_images
    }
}

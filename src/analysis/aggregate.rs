//! Document-level statistics over analyzed pages.

use super::extract_keywords;
use crate::model::{DocumentStructure, PageContent};

/// Aggregate page records into document statistics.
pub fn aggregate_pages(pages: &[PageContent]) -> DocumentStructure {
    let total_words: usize = pages.iter().map(|p| p.word_count).sum();

    let all_text = pages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    DocumentStructure {
        total_words,
        total_tables: pages.iter().map(|p| p.tables.len()).sum(),
        total_headings: pages.iter().map(|p| p.headings.len()).sum(),
        pages_with_images: pages.iter().filter(|p| p.has_images).count(),
        keywords: extract_keywords(&all_text),
        average_words_per_page: total_words.checked_div(pages.len()).unwrap_or(0),
    }
}

//! Heuristic analysis of extracted page content.
//!
//! The pipeline per document is: [`summarize_page`] for every page (which
//! runs [`detect_headings`] and [`normalize_tables`]), then
//! [`aggregate_pages`] over the collected pages.

mod aggregate;
mod headings;
mod keywords;
mod page;
mod tables;

pub use aggregate::aggregate_pages;
pub use headings::{classify_line, detect_headings, HeadingRule, LineContext, HEADING_RULES};
pub use keywords::{extract_keywords, is_stop_word, STOP_WORDS};
pub use page::{metadata_from_raw, summarize_page};
pub use tables::normalize_tables;

/// Maximum number of pages analyzed per document.
pub const MAX_PAGES: u32 = 50;
/// Maximum characters of page text kept per page.
pub const MAX_PAGE_TEXT_CHARS: usize = 5000;
/// Maximum characters of the flattened document text.
pub const FULL_TEXT_CHARS: usize = 10_000;
/// Characters of page text shown in a page summary preview.
pub const PREVIEW_CHARS: usize = 200;
/// Maximum data rows kept per table.
pub const MAX_TABLE_ROWS: usize = 10;
/// Maximum heading candidates kept per page.
pub const MAX_HEADINGS_PER_PAGE: usize = 20;
/// Maximum keywords reported per document.
pub const MAX_KEYWORDS: usize = 10;
/// A word must occur more often than this to be a keyword.
pub const MIN_KEYWORD_FREQUENCY: usize = 2;

/// Prefix of `text` holding at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

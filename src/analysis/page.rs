//! Per-page summarization.

use super::{detect_headings, normalize_tables, truncate_chars, MAX_PAGE_TEXT_CHARS};
use crate::error::Result;
use crate::model::{DocumentMetadata, PageContent};
use crate::parser::{PdfBackend, RawMetadata};

/// Summarize one page.
///
/// A failure to read the page text or its images degrades to
/// [`PageContent::empty`] and is logged; it never aborts the document.
/// A table failure only empties the page's table list.
pub fn summarize_page<B: PdfBackend + ?Sized>(backend: &B, page_number: u32) -> PageContent {
    match try_summarize_page(backend, page_number) {
        Ok(page) => page,
        Err(e) => {
            log::warn!("Failed to process page {}: {}", page_number, e);
            PageContent::empty(page_number)
        }
    }
}

fn try_summarize_page<B>(backend: &B, page_number: u32) -> Result<PageContent>
where
    B: PdfBackend + ?Sized,
{
    let text = backend.page_text(page_number)?;
    let has_images = !backend.page_images(page_number)?.is_empty();

    let tables = match backend.page_tables(page_number) {
        Ok(raw) => normalize_tables(&raw),
        Err(e) => {
            log::debug!("Table extraction failed on page {}: {}", page_number, e);
            Vec::new()
        }
    };

    Ok(PageContent {
        page_number,
        word_count: text.split_whitespace().count(),
        has_images,
        tables,
        headings: detect_headings(&text),
        text: truncate_chars(&text, MAX_PAGE_TEXT_CHARS).to_string(),
    })
}

/// Build the metadata record from raw header fields.
///
/// Absent fields become empty strings; present ones are trimmed.
pub fn metadata_from_raw(raw: RawMetadata, file_size: u64) -> DocumentMetadata {
    let field = |value: Option<String>| value.map(|v| v.trim().to_string()).unwrap_or_default();

    DocumentMetadata {
        title: field(raw.title),
        author: field(raw.author),
        subject: field(raw.subject),
        creator: field(raw.creator),
        producer: field(raw.producer),
        creation_date: field(raw.creation_date),
        modification_date: field(raw.modification_date),
        page_count: raw.page_count,
        file_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::HeadingKind;
    use crate::parser::{ImageRef, RawTable};

    #[derive(Default)]
    struct FakePage {
        text: Option<String>,
        images: usize,
        tables: Option<Vec<RawTable>>,
        fail_images: bool,
    }

    impl PdfBackend for FakePage {
        fn page_count(&self) -> u32 {
            1
        }

        fn page_text(&self, _page: u32) -> Result<String> {
            self.text
                .clone()
                .ok_or_else(|| Error::TextExtract("broken content stream".to_string()))
        }

        fn page_images(&self, _page: u32) -> Result<Vec<ImageRef>> {
            if self.fail_images {
                return Err(Error::ImageExtract("bad resources".to_string()));
            }
            Ok((0..self.images)
                .map(|i| ImageRef {
                    name: format!("Im{}", i),
                })
                .collect())
        }

        fn page_tables(&self, _page: u32) -> Result<Vec<RawTable>> {
            self.tables
                .clone()
                .ok_or_else(|| Error::TableExtract("no grid".to_string()))
        }
    }

    #[test]
    fn test_introduction_page() {
        let backend = FakePage {
            text: Some(
                "INTRODUCTION\nThis chapter explains the setup process in detail.".to_string(),
            ),
            tables: Some(Vec::new()),
            ..Default::default()
        };

        let page = summarize_page(&backend, 1);
        assert_eq!(page.page_number, 1);
        assert_eq!(page.word_count, 9);
        assert_eq!(page.headings.len(), 1);
        assert_eq!(page.headings[0].kind, HeadingKind::Uppercase);
        assert!(!page.has_images);
    }

    #[test]
    fn test_text_failure_degrades_to_empty_page() {
        let backend = FakePage {
            text: None,
            images: 2,
            ..Default::default()
        };
        assert_eq!(summarize_page(&backend, 4), PageContent::empty(4));
    }

    #[test]
    fn test_image_failure_degrades_to_empty_page() {
        let backend = FakePage {
            text: Some("SOME TEXT".to_string()),
            fail_images: true,
            ..Default::default()
        };
        assert_eq!(summarize_page(&backend, 2), PageContent::empty(2));
    }

    #[test]
    fn test_table_failure_keeps_rest_of_page() {
        let backend = FakePage {
            text: Some("alpha beta".to_string()),
            images: 1,
            tables: None,
            ..Default::default()
        };
        let page = summarize_page(&backend, 1);
        assert!(page.tables.is_empty());
        assert!(page.has_images);
        assert_eq!(page.word_count, 2);
    }

    #[test]
    fn test_word_count_uses_untruncated_text() {
        let text = "word ".repeat(2000);
        let backend = FakePage {
            text: Some(text),
            tables: Some(Vec::new()),
            ..Default::default()
        };
        let page = summarize_page(&backend, 1);
        assert_eq!(page.word_count, 2000);
        assert_eq!(page.text.chars().count(), MAX_PAGE_TEXT_CHARS);
    }

    #[test]
    fn test_tables_are_normalized() {
        let raw: RawTable = vec![
            vec![Some("Item".to_string()), Some("Cost".to_string())],
            vec![Some(" pen ".to_string()), Some("2".to_string())],
        ];
        let backend = FakePage {
            text: Some(String::new()),
            tables: Some(vec![raw]),
            ..Default::default()
        };
        let page = summarize_page(&backend, 1);
        assert_eq!(page.tables.len(), 1);
        assert_eq!(page.tables[0].data[1][0], "pen");
    }

    #[test]
    fn test_metadata_from_raw_trims_and_defaults() {
        let raw = RawMetadata {
            title: Some("  Annual Report ".to_string()),
            producer: Some("Writer".to_string()),
            page_count: 12,
            ..Default::default()
        };
        let metadata = metadata_from_raw(raw, 4096);
        assert_eq!(metadata.title, "Annual Report");
        assert_eq!(metadata.author, "");
        assert_eq!(metadata.producer, "Writer");
        assert_eq!(metadata.page_count, 12);
        assert_eq!(metadata.file_size, 4096);
    }
}

//! Batch processing of a directory of PDF files.
//!
//! [`BatchProcessor`] discovers the inputs, runs each file's pipeline on a
//! worker pool bounded by [`BatchOptions::max_workers`] and folds the
//! per-file [`FileOutcome`]s into a [`BatchReport`] on the calling thread.
//! A failing file never stops the batch; it just produces no artifact.

mod options;
mod processor;
mod report;

pub use options::{BatchOptions, DEFAULT_MAX_WORKERS};
pub use processor::{summarize_document, summarize_path, BatchProcessor};
pub use report::{BatchReport, FileOutcome, FileStatus};

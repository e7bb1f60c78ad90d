//! Batch run configuration.

use std::path::PathBuf;

use crate::render::JsonFormat;

/// Default number of files processed at once.
pub const DEFAULT_MAX_WORKERS: usize = 4;

/// Options for a batch run over one input directory.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory scanned (non-recursively) for `*.pdf` files
    pub input_dir: PathBuf,

    /// Directory receiving one `<stem>.json` per processed file
    pub output_dir: PathBuf,

    /// Upper bound on concurrently processed files
    pub max_workers: usize,

    /// JSON layout of the written artifacts
    pub json_format: JsonFormat,
}

impl BatchOptions {
    /// Create options for the given input and output directories.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Set the maximum number of workers. Zero is treated as one.
    pub fn with_max_workers(mut self, workers: usize) -> Self {
        self.max_workers = workers.max(1);
        self
    }

    /// Set the JSON output format.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Write compact JSON.
    pub fn compact(mut self) -> Self {
        self.json_format = JsonFormat::Compact;
        self
    }

    /// Worker count for `file_count` files: never more workers than files.
    pub fn worker_count(&self, file_count: usize) -> usize {
        self.max_workers.min(file_count).max(1)
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("/app/input"),
            output_dir: PathBuf::from("/app/output"),
            max_workers: DEFAULT_MAX_WORKERS,
            json_format: JsonFormat::Pretty,
        }
    }
}

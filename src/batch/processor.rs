//! Directory-level batch processing on a bounded worker pool.

use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crossbeam_channel::unbounded;
use rayon::ThreadPoolBuilder;

use super::{BatchOptions, BatchReport, FileOutcome, FileStatus};
use crate::analysis::{aggregate_pages, metadata_from_raw, summarize_page, MAX_PAGES};
use crate::error::{Error, Result};
use crate::model::{Artifact, DocumentMetadata};
use crate::parser::{LopdfBackend, MetadataSource, PdfBackend};
use crate::render::write_json;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Summarize an opened document.
///
/// Metadata failures degrade to an empty record and page failures to empty
/// pages, so this never fails once the backend is open.
pub fn summarize_document<B>(backend: &B, filename: &str, file_size: u64) -> Artifact
where
    B: PdfBackend + MetadataSource + ?Sized,
{
    let metadata = match backend.read_metadata() {
        Ok(raw) => metadata_from_raw(raw, file_size),
        Err(e) => {
            log::warn!("Could not read metadata from {}: {}", filename, e);
            DocumentMetadata::default()
        }
    };

    let page_limit = backend.page_count().min(MAX_PAGES);
    let pages: Vec<_> = (1..=page_limit).map(|n| summarize_page(backend, n)).collect();
    let structure = aggregate_pages(&pages);
    let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();

    Artifact::new(filename, timestamp, metadata, structure, &pages)
}

/// Open and summarize one PDF file.
pub fn summarize_path(path: &Path) -> Result<Artifact> {
    let backend = LopdfBackend::open(path)?;
    let file_size = fs::metadata(path)?.len();
    Ok(summarize_document(&backend, &display_name(path), file_size))
}

/// Runs the per-file pipeline over every PDF in a directory.
pub struct BatchProcessor {
    options: BatchOptions,
}

impl BatchProcessor {
    pub fn new(options: BatchOptions) -> Self {
        Self { options }
    }

    /// List `*.pdf` files directly inside the input directory, sorted by path.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let input = &self.options.input_dir;
        if !input.is_dir() {
            return Err(Error::InputDirMissing(input.clone()));
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(input)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "pdf") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Where the artifact for `input` is written.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "document".to_string());
        self.options.output_dir.join(format!("{}.json", stem))
    }

    /// Summarize one file and write its artifact. Returns the output path
    /// and the number of analyzed pages.
    pub fn process_file(&self, path: &Path) -> Result<(PathBuf, usize)> {
        let artifact = summarize_path(path)?;
        let output = self.output_path(path);
        write_json(&artifact, &output, self.options.json_format)?;
        Ok((output, artifact.analyzed_pages()))
    }

    /// Process the whole directory.
    pub fn run(&self) -> Result<BatchReport> {
        self.run_with_progress(|_| {})
    }

    /// Process the whole directory, calling `progress` on the orchestrating
    /// thread as each file finishes.
    pub fn run_with_progress<F>(&self, progress: F) -> Result<BatchReport>
    where
        F: Fn(&FileOutcome),
    {
        let files = self.discover()?;
        self.run_files(files, progress)
    }

    /// Process an already discovered list of files.
    pub fn run_files<F>(&self, files: Vec<PathBuf>, progress: F) -> Result<BatchReport>
    where
        F: Fn(&FileOutcome),
    {
        self.run_pipeline(files, |path| self.process_file(path), progress)
    }

    fn run_pipeline<P, F>(
        &self,
        files: Vec<PathBuf>,
        pipeline: P,
        progress: F,
    ) -> Result<BatchReport>
    where
        P: Fn(&Path) -> Result<(PathBuf, usize)> + Sync,
        F: Fn(&FileOutcome),
    {
        let started = Instant::now();
        fs::create_dir_all(&self.options.output_dir)?;

        let mut report = BatchReport::default();
        if files.is_empty() {
            log::warn!("No PDF files found in input directory");
            return Ok(report);
        }
        log::info!("Found {} PDF files to process", files.len());

        let workers = self.options.worker_count(files.len());
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("pdfdigest-worker-{}", i))
            .build()
            .map_err(|e| Error::WorkerPool(e.to_string()))?;
        log::debug!("Started {} workers", workers);

        let pipeline = &pipeline;
        let (tx, rx) = unbounded::<FileOutcome>();
        pool.in_place_scope(|scope| {
            for path in &files {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    // The receiver lives until the scope ends.
                    let _ = tx.send(isolate(path, || pipeline(path.as_path())));
                });
            }
            drop(tx);

            for outcome in rx.iter() {
                progress(&outcome);
                report.record(outcome);
            }
        });

        report.elapsed = started.elapsed();
        log::info!(
            "Processing complete: {} succeeded, {} failed",
            report.processed_count,
            report.error_count
        );
        log::info!(
            "Total time: {:.2}s, average {:.2}s per file",
            report.elapsed.as_secs_f64(),
            report.average_per_file().as_secs_f64()
        );
        Ok(report)
    }
}

/// Run one file's pipeline, turning errors and panics into an outcome.
fn isolate<F>(path: &Path, pipeline: F) -> FileOutcome
where
    F: FnOnce() -> Result<(PathBuf, usize)>,
{
    let name = display_name(path);
    log::info!("Processing: {}", name);
    let started = Instant::now();

    let result = panic::catch_unwind(AssertUnwindSafe(pipeline));
    let elapsed = started.elapsed();

    let status = match result {
        Ok(Ok((output, pages))) => {
            log::info!("Successfully processed {} in {:.2}s", name, elapsed.as_secs_f64());
            FileStatus::Succeeded { output, pages }
        }
        Ok(Err(e)) => {
            log::error!("Failed to process {}: {}", name, e);
            FileStatus::Failed {
                reason: e.to_string(),
            }
        }
        Err(payload) => {
            let reason = panic_message(payload.as_ref());
            log::error!("Failed to process {}: panic: {}", name, reason);
            FileStatus::Failed {
                reason: format!("panic: {}", reason),
            }
        }
    };

    FileOutcome {
        input: path.to_path_buf(),
        status,
        elapsed,
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

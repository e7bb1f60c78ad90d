//! Per-file outcomes and the batch report.

use std::path::PathBuf;
use std::time::Duration;

/// How processing one input file ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// The artifact was written to `output`
    Succeeded { output: PathBuf, pages: usize },
    /// No artifact was written
    Failed { reason: String },
}

/// Outcome of one worker task.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub status: FileStatus,
    pub elapsed: Duration,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, FileStatus::Succeeded { .. })
    }

    /// Input file name for display.
    pub fn file_name(&self) -> String {
        self.input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.input.display().to_string())
    }
}

/// Tally of a finished batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Files that produced an artifact
    pub processed_count: usize,
    /// Files that did not
    pub error_count: usize,
    /// Every outcome, in completion order
    pub outcomes: Vec<FileOutcome>,
    /// Wall time of the whole run
    pub elapsed: Duration,
}

impl BatchReport {
    /// Fold one outcome into the tally.
    pub fn record(&mut self, outcome: FileOutcome) {
        if outcome.is_success() {
            self.processed_count += 1;
        } else {
            self.error_count += 1;
        }
        self.outcomes.push(outcome);
    }

    /// Number of files the run attempted.
    pub fn total_files(&self) -> usize {
        self.outcomes.len()
    }

    /// Average wall time per attempted file.
    pub fn average_per_file(&self) -> Duration {
        match u32::try_from(self.total_files()) {
            Ok(n) if n > 0 => self.elapsed / n,
            _ => Duration::ZERO,
        }
    }

    /// Outcomes that did not produce an artifact.
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(name: &str, ok: bool) -> FileOutcome {
        let status = if ok {
            FileStatus::Succeeded {
                output: PathBuf::from(format!("/out/{}.json", name)),
                pages: 1,
            }
        } else {
            FileStatus::Failed {
                reason: "Unknown file format: not a valid PDF".to_string(),
            }
        };
        FileOutcome {
            input: PathBuf::from(format!("/in/{}.pdf", name)),
            status,
            elapsed: Duration::from_millis(5),
        }
    }

    #[test]
    fn test_record_tallies() {
        let mut report = BatchReport::default();
        report.record(outcome("a", true));
        report.record(outcome("b", false));
        report.record(outcome("c", true));

        assert_eq!(report.processed_count, 2);
        assert_eq!(report.error_count, 1);
        assert_eq!(report.total_files(), 3);
        assert_eq!(report.failures().count(), 1);
        assert_eq!(report.failures().next().unwrap().file_name(), "b.pdf");
    }

    #[test]
    fn test_average_per_file() {
        let mut report = BatchReport::default();
        assert_eq!(report.average_per_file(), Duration::ZERO);

        report.record(outcome("a", true));
        report.record(outcome("b", true));
        report.elapsed = Duration::from_secs(3);
        assert_eq!(report.average_per_file(), Duration::from_millis(1500));
    }
}

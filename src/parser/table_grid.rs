//! Raw table grid detection from text positions (stream mode).
//!
//! Rows are formed by grouping spans on the same baseline; columns are the
//! left edges that recur across rows. A run of consecutive rows aligned to
//! those edges becomes one raw grid of optional cells. The grids are not
//! cleaned here; that is the table normalizer's job.

use std::collections::{HashMap, HashSet};

use super::backend::RawTable;
use super::spans::TextSpan;

/// Width of the buckets left edges are snapped to, in points.
const EDGE_BUCKET: f32 = 5.0;
/// Distance within which a span counts as aligned with a column edge.
const ALIGN_TOLERANCE: f32 = 5.0;

/// Table grid detector configuration.
#[derive(Debug, Clone)]
pub struct TableGridConfig {
    /// Minimum number of rows to consider as table
    pub min_rows: usize,
    /// Minimum number of columns to consider as table
    pub min_columns: usize,
    /// Maximum number of columns (above this, likely word-level splitting)
    pub max_columns: usize,
    /// Y tolerance for grouping spans into rows (fraction of font size)
    pub y_tolerance_factor: f32,
    /// Minimum column alignment ratio (0.0-1.0)
    pub min_alignment_ratio: f32,
    /// Minimum gap between columns (points)
    pub min_column_gap: f32,
}

impl Default for TableGridConfig {
    fn default() -> Self {
        Self {
            min_rows: 2,
            min_columns: 2,
            max_columns: 6,
            y_tolerance_factor: 0.4,
            min_alignment_ratio: 0.5,
            min_column_gap: 15.0,
        }
    }
}

#[derive(Debug, Clone)]
struct SpanRow {
    spans: Vec<TextSpan>,
}

/// Finds tabular regions in a page's text spans.
#[derive(Debug, Clone, Default)]
pub struct TableGridDetector {
    config: TableGridConfig,
}

impl TableGridDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Detect raw table grids, top of the page first.
    pub fn detect(&self, spans: &[TextSpan]) -> Vec<RawTable> {
        if spans.len() < self.config.min_rows * self.config.min_columns {
            return Vec::new();
        }

        let rows = self.group_into_rows(spans);
        let multi_span_rows = rows.iter().filter(|r| r.spans.len() >= 2).count();
        if multi_span_rows < self.config.min_rows {
            log::debug!(
                "TableGridDetector: {} multi-span rows, not enough for a table",
                multi_span_rows
            );
            return Vec::new();
        }

        let mut tables = Vec::new();
        for (start, end) in self.find_regions(&rows) {
            let region = &rows[start..=end];
            let columns = self.detect_columns(region);
            if columns.len() < self.config.min_columns || columns.len() > self.config.max_columns {
                log::debug!(
                    "TableGridDetector: skipping region of {} rows with {} columns",
                    region.len(),
                    columns.len()
                );
                continue;
            }
            tables.push(build_grid(region, &columns));
        }

        log::debug!("TableGridDetector: found {} tables", tables.len());
        tables
    }

    /// Group spans into rows by Y position, top to bottom.
    fn group_into_rows(&self, spans: &[TextSpan]) -> Vec<SpanRow> {
        let mut sorted = spans.to_vec();
        sorted.sort_by(|a, b| {
            b.y.partial_cmp(&a.y)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
        });

        let mut rows: Vec<SpanRow> = Vec::new();
        let mut current_y: Option<f32> = None;

        for span in sorted {
            let tolerance = span.font_size * self.config.y_tolerance_factor;
            match (current_y, rows.last_mut()) {
                (Some(y), Some(row)) if (span.y - y).abs() <= tolerance => row.spans.push(span),
                _ => {
                    current_y = Some(span.y);
                    rows.push(SpanRow { spans: vec![span] });
                }
            }
        }

        rows
    }

    /// Left edges shared by enough rows, merged when closer than the
    /// minimum column gap.
    fn detect_columns(&self, rows: &[SpanRow]) -> Vec<f32> {
        let mut edge_counts: HashMap<i32, usize> = HashMap::new();
        for row in rows {
            let buckets: HashSet<i32> = row
                .spans
                .iter()
                .map(|s| (s.x / EDGE_BUCKET).round() as i32)
                .collect();
            for bucket in buckets {
                *edge_counts.entry(bucket).or_insert(0) += 1;
            }
        }

        let min_occurrences =
            ((rows.len() as f32 * self.config.min_alignment_ratio) as usize).max(2);

        let mut edges: Vec<f32> = edge_counts
            .into_iter()
            .filter(|(_, count)| *count >= min_occurrences)
            .map(|(bucket, _)| bucket as f32 * EDGE_BUCKET)
            .collect();
        edges.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mut merged: Vec<f32> = Vec::new();
        for edge in edges {
            match merged.last() {
                Some(last) if edge - last < self.config.min_column_gap => {}
                _ => merged.push(edge),
            }
        }
        merged
    }

    /// Runs of consecutive multi-span rows aligned with the page's column
    /// edges, as inclusive index ranges.
    fn find_regions(&self, rows: &[SpanRow]) -> Vec<(usize, usize)> {
        let candidates: Vec<SpanRow> = rows
            .iter()
            .filter(|r| r.spans.len() >= 2)
            .cloned()
            .collect();
        let columns = self.detect_columns(&candidates);
        if columns.len() < self.config.min_columns {
            return Vec::new();
        }

        let mut regions = Vec::new();
        let mut start: Option<usize> = None;

        for (i, row) in rows.iter().enumerate() {
            let is_table_row = row.spans.len() >= 2
                && alignment_score(row, &columns) >= self.config.min_alignment_ratio;

            match (is_table_row, start) {
                (true, None) => start = Some(i),
                (false, Some(s)) => {
                    if i - s >= self.config.min_rows {
                        regions.push((s, i - 1));
                    }
                    start = None;
                }
                _ => {}
            }
        }

        if let Some(s) = start {
            if rows.len() - s >= self.config.min_rows {
                regions.push((s, rows.len() - 1));
            }
        }

        regions
    }
}

fn alignment_score(row: &SpanRow, columns: &[f32]) -> f32 {
    if row.spans.is_empty() {
        return 0.0;
    }
    let aligned = row
        .spans
        .iter()
        .filter(|s| columns.iter().any(|c| (s.x - c).abs() <= ALIGN_TOLERANCE))
        .count();
    aligned as f32 / row.spans.len() as f32
}

/// Index of the column whose left edge is the last one at or before `x`.
fn column_for(x: f32, columns: &[f32]) -> usize {
    columns
        .iter()
        .rposition(|&c| x >= c - ALIGN_TOLERANCE)
        .unwrap_or(0)
}

fn build_grid(rows: &[SpanRow], columns: &[f32]) -> RawTable {
    rows.iter()
        .map(|row| {
            let mut cells: Vec<Vec<&str>> = vec![Vec::new(); columns.len()];
            for span in &row.spans {
                cells[column_for(span.x, columns)].push(span.text.trim());
            }
            cells
                .into_iter()
                .map(|parts| {
                    if parts.is_empty() {
                        None
                    } else {
                        Some(parts.join(" "))
                    }
                })
                .collect()
        })
        .collect()
}

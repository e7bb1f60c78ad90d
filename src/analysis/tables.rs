//! Cleaning of raw table grids.

use super::MAX_TABLE_ROWS;
use crate::model::Table;
use crate::parser::{RawCell, RawTable};

/// A table needs a header row and at least one data row.
const MIN_TABLE_ROWS: usize = 2;

/// Clean the raw tables of one page.
///
/// Rows with no non-blank cell are dropped and every kept cell is trimmed.
/// Tables with fewer than two rows, before or after cleaning, are dropped.
/// `table_id` is the 1-indexed position in `raw`, so ids of kept tables can
/// have gaps.
pub fn normalize_tables(raw: &[RawTable]) -> Vec<Table> {
    raw.iter()
        .enumerate()
        .filter(|(_, table)| table.len() >= MIN_TABLE_ROWS)
        .filter_map(|(i, table)| {
            let cleaned: Vec<Vec<String>> = table
                .iter()
                .filter(|row| row.iter().any(has_content))
                .map(|row| row.iter().map(clean_cell).collect())
                .collect();

            if cleaned.len() < MIN_TABLE_ROWS {
                return None;
            }

            Some(Table {
                id: i + 1,
                rows: cleaned.len(),
                columns: cleaned[0].len(),
                data: cleaned.into_iter().take(MAX_TABLE_ROWS).collect(),
            })
        })
        .collect()
}

fn has_content(cell: &RawCell) -> bool {
    cell.as_deref().is_some_and(|c| !c.trim().is_empty())
}

fn clean_cell(cell: &RawCell) -> String {
    cell.as_deref().map(str::trim).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[Option<&str>]) -> Vec<RawCell> {
        cells.iter().map(|c| c.map(str::to_string)).collect()
    }

    #[test]
    fn test_header_only_table_is_dropped() {
        let raw = vec![vec![row(&[Some("Name"), Some("Value")])]];
        assert!(normalize_tables(&raw).is_empty());
    }

    #[test]
    fn test_whitespace_data_row_drops_table() {
        let raw = vec![vec![
            row(&[Some("Name"), Some("Value")]),
            row(&[Some("   "), None]),
        ]];
        assert!(normalize_tables(&raw).is_empty());
    }

    #[test]
    fn test_cells_are_trimmed_and_missing_cells_empty() {
        let raw = vec![vec![
            row(&[Some(" Name "), Some("Value\n")]),
            row(&[Some("bolts"), None]),
            row(&[None, None]),
            row(&[Some("nuts"), Some(" 40 ")]),
        ]];
        let tables = normalize_tables(&raw);
        assert_eq!(tables.len(), 1);
        let table = &tables[0];
        assert_eq!(table.id, 1);
        assert_eq!(table.rows, 3);
        assert_eq!(table.columns, 2);
        assert_eq!(
            table.data,
            vec![
                vec!["Name".to_string(), "Value".to_string()],
                vec!["bolts".to_string(), String::new()],
                vec!["nuts".to_string(), "40".to_string()],
            ]
        );
    }

    #[test]
    fn test_data_truncated_but_row_count_kept() {
        let mut table = vec![row(&[Some("n")])];
        for i in 0..14 {
            table.push(vec![Some(i.to_string())]);
        }
        let tables = normalize_tables(&[table]);
        assert_eq!(tables[0].rows, 15);
        assert_eq!(tables[0].data.len(), MAX_TABLE_ROWS);
    }

    #[test]
    fn test_ids_follow_raw_positions() {
        let good = vec![row(&[Some("a"), Some("b")]), row(&[Some("1"), Some("2")])];
        let raw = vec![good.clone(), vec![row(&[Some("x")])], good];
        let ids: Vec<usize> = normalize_tables(&raw).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_columns_from_first_cleaned_row() {
        let raw = vec![vec![
            row(&[None, None, None]),
            row(&[Some("a"), Some("b")]),
            row(&[Some("1"), Some("2"), Some("3")]),
        ]];
        let tables = normalize_tables(&raw);
        assert_eq!(tables[0].columns, 2);
        assert_eq!(tables[0].rows, 2);
    }

    #[test]
    fn test_empty_rows_are_dropped() {
        let raw = vec![vec![
            Vec::new(),
            row(&[Some("h1"), Some("h2")]),
            row(&[Some("d1"), Some("d2")]),
        ]];
        let tables = normalize_tables(&raw);
        assert_eq!(tables[0].rows, 2);
    }
}

//! Table types.

use serde::{Deserialize, Serialize};

/// A cleaned table from one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// 1-indexed position of the table in the backend's list for the page
    #[serde(rename = "table_id")]
    pub id: usize,

    /// Number of cleaned rows, before truncation
    pub rows: usize,

    /// Width of the first cleaned row
    pub columns: usize,

    /// Leading cleaned rows, truncated
    pub data: Vec<Vec<String>>,
}

//! Table domain models.
//!
//! A `Table` is the normalized grid produced from an uploaded file, before any
//! schema rules are applied. A `ValidatedRow` is a manufacturer/part-number
//! pair that passed schema validation.

use serde::{Deserialize, Serialize};

/// Ordered grid of string cells. Row 0 is the header.
///
/// Rows may have different lengths; a missing trailing cell reads as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `(row, column)`, or `""` when either index is out of range.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// True when every cell of the row is empty after trimming.
pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// A data row that passed schema validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedRow {
    pub manufacturer: String,
    pub part_number: String,
}

impl ValidatedRow {
    pub fn new(manufacturer: impl Into<String>, part_number: impl Into<String>) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            part_number: part_number.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> Table {
        Table::new(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_missing_cells_read_as_empty() {
        let t = table(&[&["manufacturer", "part no"], &["Acme"]]);
        assert_eq!(t.cell(1, 0), "Acme");
        assert_eq!(t.cell(1, 1), "");
        assert_eq!(t.cell(7, 3), "");
    }

    #[test]
    fn test_blank_row_detection() {
        assert!(is_blank_row(&[]));
        assert!(is_blank_row(&["".to_string(), "  ".to_string()]));
        assert!(!is_blank_row(&["".to_string(), "x".to_string()]));
    }
}

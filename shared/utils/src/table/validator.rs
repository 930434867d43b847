//! Schema Validator
//!
//! Enforces the two-column header contract and per-row completeness. This is
//! the only validation routine; every entry point that accepts an upload goes
//! through `validate`.

use crate::error::{PriceCheckError, PriceCheckResult};
use pricecheck_models::{is_blank_row, Table, ValidatedRow};

pub const MANUFACTURER_HEADER: &str = "manufacturer";
pub const PART_NUMBER_HEADER: &str = "part no";

/// Validate a parsed table and extract its data rows.
///
/// Fully blank rows are skipped. A non-blank row with an empty manufacturer
/// or part number fails the whole table with its 1-based display row number
/// (header = row 1). Accepted cells are carried over verbatim, untrimmed.
pub fn validate(table: &Table) -> PriceCheckResult<Vec<ValidatedRow>> {
    if table.is_empty() {
        return Err(PriceCheckError::schema("No rows"));
    }

    let manufacturer_header = normalize_header(table.cell(0, 0));
    let part_number_header = normalize_header(table.cell(0, 1));
    if manufacturer_header != MANUFACTURER_HEADER || part_number_header != PART_NUMBER_HEADER {
        return Err(PriceCheckError::schema(format!(
            "Invalid header row: expected '{}', '{}' but found '{}', '{}'",
            MANUFACTURER_HEADER, PART_NUMBER_HEADER, manufacturer_header, part_number_header
        )));
    }

    let mut validated = Vec::with_capacity(table.len() - 1);
    for (idx, row) in table.rows().iter().enumerate().skip(1) {
        if is_blank_row(row) {
            continue;
        }

        let display_row = idx + 1;
        let manufacturer = table.cell(idx, 0);
        let part_number = table.cell(idx, 1);

        if manufacturer.trim().is_empty() {
            return Err(PriceCheckError::schema_at_row(display_row, "Missing manufacturer"));
        }
        if part_number.trim().is_empty() {
            return Err(PriceCheckError::schema_at_row(display_row, "Missing part number"));
        }

        validated.push(ValidatedRow::new(manufacturer, part_number));
    }

    Ok(validated)
}

fn normalize_header(cell: &str) -> String {
    cell.trim().to_lowercase()
}

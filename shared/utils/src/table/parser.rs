//! Upload Parser
//!
//! Turns raw upload bytes into a positional `Table`. The format is chosen by an
//! exact, case-sensitive file-name suffix.

use calamine::{open_workbook_from_rs, DataType, Ods, Range, Reader, Xls, Xlsb, Xlsx};
use std::fmt::Display;
use std::io::Cursor;

use crate::error::{PriceCheckError, PriceCheckResult};
use pricecheck_models::{is_blank_row, Table};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Supported upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Xlsx, // also .xlsm
    Xlsb,
    Xls,
    Ods,
}

impl TableFormat {
    /// Detect format from the file name suffix. Matching is case-sensitive.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        const SUFFIXES: &[(&str, TableFormat)] = &[
            (".csv", TableFormat::Csv),
            (".xlsx", TableFormat::Xlsx),
            (".xlsm", TableFormat::Xlsx),
            (".xlsb", TableFormat::Xlsb),
            (".xls", TableFormat::Xls),
            (".ods", TableFormat::Ods),
        ];

        SUFFIXES
            .iter()
            .find(|(suffix, _)| file_name.ends_with(suffix))
            .map(|(_, format)| *format)
    }
}

/// Parse an upload into a table. Pure transform.
pub fn parse(data: &[u8], file_name: &str) -> PriceCheckResult<Table> {
    let format = TableFormat::from_file_name(file_name).ok_or_else(|| {
        PriceCheckError::parse(format!("Unsupported file type: {}", file_name))
    })?;

    let table = match format {
        TableFormat::Csv => parse_csv(data)?,
        TableFormat::Xlsx => parse_workbook::<Xlsx<_>>(data)?,
        TableFormat::Xlsb => parse_workbook::<Xlsb<_>>(data)?,
        TableFormat::Xls => parse_workbook::<Xls<_>>(data)?,
        TableFormat::Ods => parse_workbook::<Ods<_>>(data)?,
    };

    tracing::debug!(file_name, ?format, rows = table.len(), "Parsed upload");
    Ok(table)
}

/// Comma separated, blank lines skipped. The first bad record aborts the parse.
fn parse_csv(data: &[u8]) -> PriceCheckResult<Table> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut rows = Vec::new();
    let mut record = csv::StringRecord::new();
    let mut record_number = 0;
    loop {
        record_number += 1;
        let start = reader.position().byte() as usize;
        let more = reader.read_record(&mut record).map_err(|e| {
            PriceCheckError::parse(format!("CSV record {}: {}", record_number, e))
        })?;
        if !more {
            break;
        }

        // The csv reader accepts broken quoting silently, so check the raw bytes.
        let end = (reader.position().byte() as usize).min(data.len());
        check_quoting(&data[start.min(end)..end]).map_err(|reason| {
            PriceCheckError::parse(format!("CSV record {}: {}", record_number, reason))
        })?;

        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table::new(rows))
}

/// Quoted fields must be closed, and a closing quote must end the field.
fn check_quoting(raw: &[u8]) -> Result<(), &'static str> {
    let mut i = 0;
    let mut field_start = true;

    while i < raw.len() {
        if field_start && raw[i] == b'"' {
            i += 1;
            loop {
                match raw.get(i) {
                    None => return Err("unterminated quoted field"),
                    Some(b'"') if raw.get(i + 1) == Some(&b'"') => i += 2,
                    Some(b'"') => {
                        i += 1;
                        break;
                    }
                    Some(_) => i += 1,
                }
            }
            match raw.get(i) {
                None | Some(b',') | Some(b'\r') | Some(b'\n') => {}
                Some(_) => return Err("unexpected characters after closing quote"),
            }
            field_start = false;
            continue;
        }

        field_start = matches!(raw[i], b',' | b'\r' | b'\n');
        i += 1;
    }

    Ok(())
}

/// Reads only the first sheet, in declared order.
fn parse_workbook<'a, R>(data: &'a [u8]) -> PriceCheckResult<Table>
where
    R: Reader<Cursor<&'a [u8]>>,
    R::Error: Display,
{
    let mut workbook: R = open_workbook_from_rs(Cursor::new(data))
        .map_err(|e| PriceCheckError::parse(format!("Failed to open workbook: {}", e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| PriceCheckError::parse("No sheets found in workbook"))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .ok_or_else(|| PriceCheckError::parse(format!("Sheet '{}' not found", sheet_name)))?
        .map_err(|e| {
            PriceCheckError::parse(format!("Failed to read sheet '{}': {}", sheet_name, e))
        })?;

    Ok(Table::new(range_to_rows(&range)))
}

fn range_to_rows(range: &Range<DataType>) -> Vec<Vec<String>> {
    // The used range may start right of column A; pad so cells stay positional.
    let leading_columns = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    let mut rows: Vec<Vec<String>> = range
        .rows()
        .map(|cells| {
            let mut row = vec![String::new(); leading_columns];
            row.extend(cells.iter().map(cell_to_string));
            while row.last().is_some_and(|cell| cell.is_empty()) {
                row.pop();
            }
            row
        })
        .collect();

    while rows.last().is_some_and(|row| is_blank_row(row)) {
        rows.pop();
    }
    rows
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        DataType::String(s) => s.clone(),
        // f64 Display drops the fractional part of whole numbers (123.0 -> "123")
        DataType::Float(f) => f.to_string(),
        DataType::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

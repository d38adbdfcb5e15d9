use calamine::{Data, Range, Reader, Xlsx};
use std::io::Cursor;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::inventory::models::{CellValue, InventoryRow, InventoryTable};

pub const COLUMN_CODE: &str = "Código";
pub const COLUMN_ARTICLE: &str = "Artículo";
pub const COLUMN_EXISTENCE: &str = "Existencia";
pub const COLUMN_UNIT_COST: &str = "Costo unitario";

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Failed to open workbook: {0}")]
    WorkbookOpen(String),

    #[error("Workbook has no worksheets")]
    NoWorksheet,

    #[error("Failed to read worksheet: {0}")]
    WorksheetRead(String),

    #[error("Worksheet is empty")]
    EmptyWorksheet,

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),
}

/// Positions of the columns the pipeline reads
#[derive(Debug, Clone, Copy)]
struct ColumnLayout {
    code: usize,
    article: usize,
    existence: usize,
    unit_cost: usize,
}

/// Decode an ERP export from raw xlsx bytes.
///
/// # Expected Sheet Structure:
/// ```text
/// Row 1:  Header (Código | Artículo | Existencia | Costo unitario | ...)
/// Row 2+: Classification rows (e.g. "LLANTAS"), item rows, subtotals, blanks
/// ```
///
/// Only the first worksheet is read. Blank rows are kept so that row indices
/// line up with the sheet.
#[instrument(skip(bytes), fields(bytes = bytes.len()))]
pub fn read_inventory(bytes: &[u8]) -> Result<InventoryTable, ReadError> {
    let mut workbook: Xlsx<Cursor<&[u8]>> =
        Xlsx::new(Cursor::new(bytes)).map_err(|e| ReadError::WorkbookOpen(e.to_string()))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => range,
        Some(Err(e)) => return Err(ReadError::WorksheetRead(e.to_string())),
        None => return Err(ReadError::NoWorksheet),
    };

    let table = parse_inventory_range(&range)?;
    info!("Read {} inventory rows", table.len());
    Ok(table)
}

/// Parse an already-loaded worksheet range (first row is the header).
pub fn parse_inventory_range(range: &Range<Data>) -> Result<InventoryTable, ReadError> {
    let mut rows_iter = range.rows();
    let header: Vec<String> = match rows_iter.next() {
        Some(header) => header.iter().map(header_text).collect(),
        None => return Err(ReadError::EmptyWorksheet),
    };
    debug!("Header columns: {:?}", header);

    let layout = ColumnLayout {
        code: find_column(&header, COLUMN_CODE)?,
        article: find_column(&header, COLUMN_ARTICLE)?,
        existence: find_column(&header, COLUMN_EXISTENCE)?,
        unit_cost: find_column(&header, COLUMN_UNIT_COST)?,
    };
    let known = [
        layout.code,
        layout.article,
        layout.existence,
        layout.unit_cost,
    ];

    let extra_indices: Vec<usize> = (0..header.len())
        .filter(|col| !known.contains(col))
        .collect();
    let extra_columns = extra_indices
        .iter()
        .map(|&col| header[col].clone())
        .collect();

    let rows = rows_iter
        .map(|cells| {
            let cell_at = |col: usize| cells.get(col).map(cell_value).unwrap_or_default();

            InventoryRow {
                code: cell_at(layout.code),
                article: cell_at(layout.article),
                existence: cell_at(layout.existence),
                unit_cost: cell_at(layout.unit_cost),
                extra_values: extra_indices.iter().map(|&col| cell_at(col)).collect(),
            }
        })
        .collect();

    Ok(InventoryTable::with_extra_columns(extra_columns, rows))
}

fn find_column(header: &[String], name: &'static str) -> Result<usize, ReadError> {
    header.iter().position(|h| h == name).ok_or_else(|| {
        warn!("Column '{}' not found in header", name);
        ReadError::MissingColumn(name)
    })
}

fn header_text(cell: &Data) -> String {
    cell_value(cell).to_string().trim().to_string()
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Text(
            dt.as_datetime()
                .map(|d| d.to_string())
                .unwrap_or_else(|| dt.as_f64().to_string()),
        ),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Empty,
    }
}

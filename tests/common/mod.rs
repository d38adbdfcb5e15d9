// Shared fixtures for integration tests
// Builds ERP-style exports in memory and reads processed workbooks back

#![allow(dead_code)]

use calamine::{Data, Range, Reader, Xlsx};
use rust_xlsxwriter::Workbook;
use std::io::Cursor;

/// One row of a fixture export
#[derive(Debug, Clone)]
pub enum FixtureCell {
    Blank,
    Text(&'static str),
    Number(f64),
}

pub use FixtureCell::{Blank, Number, Text};

/// Header of the ERP export, plus one column the pipeline ignores
pub const EXPORT_HEADER: [&str; 5] = [
    "Código",
    "Artículo",
    "Existencia",
    "Costo unitario",
    "Costo total",
];

/// Classification row as the ERP writes it
pub fn marker_row() -> Vec<FixtureCell> {
    vec![Text("LLANTAS"), Blank, Blank, Blank, Blank]
}

pub fn item_row(
    code: &'static str,
    article: &'static str,
    existence: FixtureCell,
    cost: FixtureCell,
) -> Vec<FixtureCell> {
    vec![Text(code), Text(article), existence, cost, Blank]
}

/// Build an export workbook with the standard header and the given rows
pub fn build_export(rows: &[Vec<FixtureCell>]) -> Vec<u8> {
    build_workbook(&EXPORT_HEADER, rows)
}

/// Build a single-sheet workbook with an arbitrary header
pub fn build_workbook(header: &[&str], rows: &[Vec<FixtureCell>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in header.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *name)
            .expect("Failed to write header");
    }

    for (idx, row) in rows.iter().enumerate() {
        let row_num = (idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Blank => {}
                Text(s) => {
                    worksheet
                        .write_string(row_num, col, *s)
                        .expect("Failed to write text cell");
                }
                Number(n) => {
                    worksheet
                        .write_number(row_num, col, *n)
                        .expect("Failed to write number cell");
                }
            }
        }
    }

    workbook
        .save_to_buffer()
        .expect("Failed to save fixture workbook")
}

/// The export from the documented example:
/// marker, A(10, 100), marker, B(5, 50), C("N/A", 20)
pub fn scenario_export() -> Vec<u8> {
    build_export(&[
        marker_row(),
        item_row("A", "Llanta A", Number(10.0), Number(100.0)),
        marker_row(),
        item_row("B", "Llanta B", Number(5.0), Number(50.0)),
        item_row("C", "Llanta C", Text("N/A"), Number(20.0)),
    ])
}

/// Open processed workbook bytes for inspection
pub fn open_output(bytes: &[u8]) -> Xlsx<Cursor<Vec<u8>>> {
    Xlsx::new(Cursor::new(bytes.to_vec())).expect("Failed to open output workbook")
}

pub fn sheet_range(bytes: &[u8], sheet: &str) -> Range<Data> {
    open_output(bytes)
        .worksheet_range(sheet)
        .expect("Failed to read output sheet")
}

/// Cell at 0-based (row, col), Empty when outside the used range
pub fn cell(range: &Range<Data>, row: u32, col: u32) -> Data {
    range.get_value((row, col)).cloned().unwrap_or(Data::Empty)
}

pub fn cell_text(range: &Range<Data>, row: u32, col: u32) -> String {
    match cell(range, row, col) {
        Data::String(s) => s,
        other => panic!("Expected text at ({row}, {col}), got {other:?}"),
    }
}

pub fn cell_number(range: &Range<Data>, row: u32, col: u32) -> f64 {
    match cell(range, row, col) {
        Data::Float(f) => f,
        Data::Int(i) => i as f64,
        other => panic!("Expected number at ({row}, {col}), got {other:?}"),
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

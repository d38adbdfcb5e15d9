/// Warehouse section partitioner
///
/// The ERP export lists the ALMACEN ABURTO rows first and the CEDIS HERMOSILLO
/// rows second. The boundary is the second row whose `Código` contains the
/// LLANTAS classification marker.
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::inventory::models::{InventoryRow, InventoryTable};

/// Marker text searched for (after uppercasing) in the `Código` column
pub const SECTION_MARKER: &str = "LLANTAS";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("Section separator '{marker}' must appear at least twice, found {found}")]
    MissingSeparator { marker: &'static str, found: usize },
}

/// The two warehouse sections of one export
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    /// Rows before the second marker row (first marker row included)
    pub upper: InventoryTable,
    /// Rows after the second marker row
    pub lower: InventoryTable,
    /// Index of the dropped second marker row in the original table
    pub split_index: usize,
}

/// Return the row indices whose uppercased `Código` contains `marker`.
pub fn find_marker_rows(table: &InventoryTable, marker: &str) -> Vec<usize> {
    let marker = marker.to_uppercase();
    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| is_marker_row(row, &marker))
        .map(|(idx, _)| idx)
        .collect()
}

fn is_marker_row(row: &InventoryRow, marker_upper: &str) -> bool {
    row.code.to_string().to_uppercase().contains(marker_upper)
}

/// Split the export at the second marker row.
///
/// Only the first two marker rows matter; any later marker rows stay inside
/// `lower`. The second marker row itself belongs to neither section.
#[instrument(skip(table), fields(rows = table.len()))]
pub fn partition(table: InventoryTable) -> Result<Partition, StructuralError> {
    let marker_rows = find_marker_rows(&table, SECTION_MARKER);
    debug!("Found {} marker rows at {:?}", marker_rows.len(), marker_rows);

    let Some(&split_index) = marker_rows.get(1) else {
        warn!(
            "Expected at least 2 '{}' marker rows, found {}",
            SECTION_MARKER,
            marker_rows.len()
        );
        return Err(StructuralError::MissingSeparator {
            marker: SECTION_MARKER,
            found: marker_rows.len(),
        });
    };

    if marker_rows.len() > 2 {
        debug!(
            "Ignoring {} additional marker rows after index {}",
            marker_rows.len() - 2,
            split_index
        );
    }

    let InventoryTable {
        extra_columns,
        mut rows,
    } = table;
    let lower = rows.split_off(split_index + 1);
    rows.truncate(split_index);

    info!(
        "Split export at row {}: {} upper rows, {} lower rows",
        split_index,
        rows.len(),
        lower.len()
    );

    Ok(Partition {
        upper: InventoryTable::with_extra_columns(extra_columns.clone(), rows),
        lower: InventoryTable::with_extra_columns(extra_columns, lower),
        split_index,
    })
}

use chrono::NaiveDate;
use std::time::Instant;
use tracing::{error, info, instrument, warn};

use crate::inventory::{
    partition, read_inventory, transform, InventoryTable, ReadError, StructuralError,
};
use crate::report::{format_workbook, FormatError, SectionSheet, SheetStyle};
use crate::utils::processed_file_name;

/// Output sheet name and title label for one warehouse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarehouseSheet {
    pub sheet_name: &'static str,
    pub label: &'static str,
}

/// Rows after the second marker row
pub const HERMOSILLO_SECTION: WarehouseSheet = WarehouseSheet {
    sheet_name: "MAYOREO HERMOSILLO",
    label: "CEDIS HERMOSILLO",
};

/// Rows before the second marker row
pub const ABURTO_SECTION: WarehouseSheet = WarehouseSheet {
    sheet_name: "SUCURSAL ABURTO",
    label: "ALMACEN ABURTO",
};

/// Error types for inventory processing
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Read failed: {0}")]
    Read(#[from] ReadError),

    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error("Format failed: {0}")]
    Format(#[from] FormatError),
}

impl ProcessError {
    /// True when the upload itself is malformed and must be fixed by the user
    pub fn is_structural(&self) -> bool {
        matches!(self, ProcessError::Structural(_))
    }
}

/// Per-sheet processing counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSummary {
    pub sheet_name: String,
    /// Rows in the warehouse section before cleaning
    pub rows_in: usize,
    pub rows_written: usize,
    /// Rows without a numeric existence (headers, subtotals, blanks)
    pub rows_dropped: usize,
}

/// Result of one successful processing run
#[derive(Debug, Clone)]
pub struct ProcessedInventory {
    /// xlsx bytes ready for download
    pub workbook: Vec<u8>,
    pub file_name: String,
    pub sections: Vec<SectionSummary>,
}

/// Runs the read → partition → transform → format pipeline.
///
/// Synchronous and CPU-bound; async callers should use spawn_blocking.
#[derive(Clone, Default)]
pub struct InventoryService {
    style: SheetStyle,
}

impl InventoryService {
    pub fn new(style: SheetStyle) -> Self {
        Self { style }
    }

    /// Process one ERP export into the two-sheet price workbook
    ///
    /// Fails without producing any bytes when the export cannot be read or the
    /// section separator is missing.
    #[instrument(
        skip(self, bytes, report_date),
        fields(bytes = bytes.len(), report_date = %report_date)
    )]
    pub fn process(
        &self,
        bytes: &[u8],
        report_date: NaiveDate,
    ) -> Result<ProcessedInventory, ProcessError> {
        let start_time = Instant::now();
        info!("Processing inventory export");

        // 1. Decode the upload
        let table = read_inventory(bytes)
            .inspect_err(|e| error!("Failed to read inventory export: {}", e))?;

        // 2. Split warehouses
        let sections = partition(table).inspect_err(|e| warn!("Rejecting export: {}", e))?;

        // 3. Price each section (Hermosillo sheet first, as in the download)
        let plan = [
            (HERMOSILLO_SECTION, &sections.lower),
            (ABURTO_SECTION, &sections.upper),
        ];

        let mut sheets = Vec::with_capacity(plan.len());
        let mut summaries = Vec::with_capacity(plan.len());
        for (target, section) in plan {
            let (sheet, summary) = Self::price_section(target, section);
            info!(
                "Section {}: {} rows written, {} dropped",
                summary.sheet_name, summary.rows_written, summary.rows_dropped
            );
            sheets.push(sheet);
            summaries.push(summary);
        }

        // 4. Render workbook
        let workbook = format_workbook(&sheets, &self.style, report_date)?;

        info!(
            "✓ Inventory processed ({:.1}ms, {} bytes)",
            start_time.elapsed().as_secs_f64() * 1000.0,
            workbook.len()
        );

        Ok(ProcessedInventory {
            workbook,
            file_name: processed_file_name(report_date),
            sections: summaries,
        })
    }

    fn price_section(
        target: WarehouseSheet,
        section: &InventoryTable,
    ) -> (SectionSheet, SectionSummary) {
        let table = transform(section);
        let summary = SectionSummary {
            sheet_name: target.sheet_name.to_string(),
            rows_in: section.len(),
            rows_written: table.len(),
            rows_dropped: section.len() - table.len(),
        };
        let sheet = SectionSheet {
            sheet_name: target.sheet_name.to_string(),
            label: target.label.to_string(),
            table,
        };
        (sheet, summary)
    }
}

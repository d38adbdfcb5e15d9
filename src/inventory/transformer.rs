/// Section transformer: quantity/cost coercion and price derivation
use tracing::{debug, info, instrument};

use crate::inventory::models::{InventoryTable, PricedRow, PricedTable};

/// List price markup over unit cost
pub const LIST_PRICE_FACTOR: f64 = 1.40;
/// Promotional price markup over unit cost
pub const PROMO_PRICE_FACTOR: f64 = 1.25;

/// Build the priced table for one warehouse section.
///
/// Rows whose `Existencia` is not numeric (blank lines, classification headers,
/// subtotals) are dropped. A non-numeric `Costo unitario` prices the row at 0.
/// Prices keep full precision; rounding is left to the sheet number format.
#[instrument(skip(section), fields(rows = section.len()))]
pub fn transform(section: &InventoryTable) -> PricedTable {
    let mut rows = Vec::with_capacity(section.len());
    let mut dropped = 0usize;

    for (row_idx, row) in section.rows.iter().enumerate() {
        let Some(existence) = row.existence.coerce_number() else {
            debug!(
                "Dropping row {} (code '{}'): non-numeric existence '{}'",
                row_idx, row.code, row.existence
            );
            dropped += 1;
            continue;
        };

        let unit_cost = row.unit_cost.coerce_number().unwrap_or(0.0);

        rows.push(PricedRow {
            code: row.code.clone(),
            description: row.article.clone(),
            existence,
            list_price: unit_cost * LIST_PRICE_FACTOR,
            promo_price: unit_cost * PROMO_PRICE_FACTOR,
            clearance: None,
        });
    }

    info!("Priced {} rows, dropped {} non-item rows", rows.len(), dropped);

    PricedTable { rows }
}

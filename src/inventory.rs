// Inventory ERP export handling
//
// The ERP exports one "Valor del inventario por clasificación" workbook that
// holds both warehouses one after the other, separated by LLANTAS marker rows.
// - reader: decodes the uploaded xlsx bytes into an InventoryTable
// - partitioner: splits the table at the second marker row
// - transformer: coerces quantities/costs and derives the price columns

pub mod models;
pub mod partitioner;
pub mod reader;
pub mod transformer;

// Re-export commonly used items
pub use models::{CellValue, InventoryRow, InventoryTable, PricedRow, PricedTable};
pub use partitioner::{find_marker_rows, partition, Partition, StructuralError, SECTION_MARKER};
pub use reader::{read_inventory, ReadError};
pub use transformer::{transform, LIST_PRICE_FACTOR, PROMO_PRICE_FACTOR};

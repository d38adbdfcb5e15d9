pub mod inventory_service;

pub use inventory_service::{
    InventoryService, ProcessError, ProcessedInventory, SectionSummary, WarehouseSheet,
    ABURTO_SECTION, HERMOSILLO_SECTION,
};

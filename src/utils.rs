/// Shared utility functions for the inventory pricing service
use chrono::NaiveDate;

/// Content type of the downloadable workbook
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Download name for a processed inventory workbook
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use inventory_pricing_service::utils::processed_file_name;
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
/// assert_eq!(processed_file_name(date), "Inventario_Procesado_2026-03-05.xlsx");
/// ```
pub fn processed_file_name(date: NaiveDate) -> String {
    format!("Inventario_Procesado_{}.xlsx", date.format("%Y-%m-%d"))
}

/// Check whether bytes look like an xlsx (ZIP container) document
///
/// Only the container signature is checked; the reader reports anything else.
pub fn looks_like_xlsx(bytes: &[u8]) -> bool {
    bytes.starts_with(b"PK\x03\x04")
}

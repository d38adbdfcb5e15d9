// Price sheet report module
//
// Renders priced warehouse sections into the downloadable workbook:
// - layout: sheet presentation settings, title lines and the month table
// - formatter: rust_xlsxwriter rendering into an in-memory buffer

pub mod formatter;
pub mod layout;

pub use formatter::{format_workbook, FormatError, SectionSheet};
pub use layout::{inventory_title, month_name, title_lines, SheetStyle, MONTH_NAMES};

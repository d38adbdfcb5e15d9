/// Presentation settings for the downloadable price sheets
use chrono::{Datelike, NaiveDate};

/// Number of columns in every price sheet
pub const COLUMN_COUNT: usize = 6;

/// Month names used in the sheet title date
pub static MONTH_NAMES: [&str; 12] = [
    "ENERO",
    "FEBRERO",
    "MARZO",
    "ABRIL",
    "MAYO",
    "JUNIO",
    "JULIO",
    "AGOSTO",
    "SEPTIEMBRE",
    "OCTUBRE",
    "NOVIEMBRE",
    "DICIEMBRE",
];

/// Look/layout of one price sheet.
///
/// Rows 0-3 hold the title lines, row `header_row` holds the column headers and
/// the body starts right below it.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetStyle {
    /// Solid header fill as 0xRRGGBB
    pub header_fill: u32,
    pub header_labels: [String; COLUMN_COUNT],
    /// Column widths in Excel character units, A through F
    pub column_widths: [f64; COLUMN_COUNT],
    pub title_font_size: f64,
    /// Number format for the price columns (D, E, F)
    pub currency_format: String,
    pub price_notice: String,
    pub contact_line: String,
    /// 0-based header row; must leave room for the four title lines
    pub header_row: u32,
}

impl Default for SheetStyle {
    fn default() -> Self {
        Self {
            header_fill: 0xB4C6E7,
            header_labels: [
                "Código".to_string(),
                "Descripcion".to_string(),
                "Existencia".to_string(),
                "Precio lista".to_string(),
                "Promocion".to_string(),
                "Remate".to_string(),
            ],
            column_widths: [25.0, 65.0, 15.0, 20.0, 20.0, 20.0],
            title_font_size: 11.0,
            currency_format: "\"$\"#,##0.00".to_string(),
            price_notice: "PRECIOS IVA INCLUIDO".to_string(),
            contact_line: "CONTACTO...".to_string(),
            header_row: 5,
        }
    }
}

impl SheetStyle {
    /// First 0-based row of the sheet body
    pub fn body_start_row(&self) -> u32 {
        self.header_row + 1
    }
}

/// Spanish month name for a 1-based month number
pub fn month_name(month: u32) -> Option<&'static str> {
    let idx = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(idx).copied()
}

/// First title line, e.g. `INVENTARIO 18 OCTUBRE 2026`
pub fn inventory_title(date: NaiveDate) -> String {
    // NaiveDate::month() is always 1..=12
    let month = month_name(date.month()).unwrap_or_default();
    format!("INVENTARIO {} {} {}", date.day(), month, date.year())
}

/// The four bold title lines written above the header row
pub fn title_lines(style: &SheetStyle, section_label: &str, date: NaiveDate) -> [String; 4] {
    [
        inventory_title(date),
        section_label.to_string(),
        style.price_notice.clone(),
        style.contact_line.clone(),
    ]
}

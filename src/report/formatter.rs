/// Price sheet workbook renderer
///
/// Produces the same sheet layout the warehouse staff print from:
/// ```text
/// Row 1-4: Bold titles (date, section label, tax notice, contact)
/// Row 5:   Blank
/// Row 6:   Header (Código | Descripcion | Existencia | Precio lista | Promocion | Remate)
/// Row 7+:  One row per priced item
/// ```
use chrono::NaiveDate;
use rust_xlsxwriter::{
    Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet, XlsxError,
};
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::inventory::models::{CellValue, PricedTable};
use crate::report::layout::{title_lines, SheetStyle};

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("row index overflow: {0}")]
    RowOverflow(usize),
}

/// One sheet of the output workbook
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSheet {
    pub sheet_name: String,
    /// Second title line, e.g. "CEDIS HERMOSILLO"
    pub label: String,
    pub table: PricedTable,
}

/// Cell formats derived once per workbook from the sheet style
struct SheetFormats {
    title: Format,
    header: Format,
    code: Format,
    description: Format,
    existence: Format,
    currency: Format,
}

impl SheetFormats {
    fn from_style(style: &SheetStyle) -> Self {
        Self {
            title: Format::new()
                .set_bold()
                .set_font_size(style.title_font_size),
            header: Format::new()
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_pattern(FormatPattern::Solid)
                .set_background_color(Color::RGB(style.header_fill))
                .set_border(FormatBorder::Thin),
            code: Format::new().set_align(FormatAlign::Left),
            description: Format::new(),
            existence: Format::new().set_align(FormatAlign::Center),
            currency: Format::new().set_num_format(style.currency_format.as_str()),
        }
    }
}

/// Render the sections into one xlsx workbook held in memory.
///
/// Sheets appear in the order given. An empty table still yields a sheet with
/// titles and header.
#[instrument(skip(sheets, style), fields(sheets = sheets.len()))]
pub fn format_workbook(
    sheets: &[SectionSheet],
    style: &SheetStyle,
    report_date: NaiveDate,
) -> Result<Vec<u8>, FormatError> {
    let formats = SheetFormats::from_style(style);
    let mut workbook = Workbook::new();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.sheet_name)?;

        write_titles(worksheet, style, &formats, &sheet.label, report_date)?;
        write_header(worksheet, style, &formats)?;
        write_body(worksheet, style, &formats, &sheet.table)?;

        for (col, width) in style.column_widths.iter().enumerate() {
            worksheet.set_column_width(cast_col_num(col), *width)?;
        }

        debug!(
            "Rendered sheet '{}' with {} body rows",
            sheet.sheet_name,
            sheet.table.len()
        );
    }

    let buffer = workbook.save_to_buffer()?;
    info!("Workbook rendered ({} bytes)", buffer.len());
    Ok(buffer)
}

fn write_titles(
    worksheet: &mut Worksheet,
    style: &SheetStyle,
    formats: &SheetFormats,
    label: &str,
    report_date: NaiveDate,
) -> Result<(), FormatError> {
    for (row, line) in title_lines(style, label, report_date).iter().enumerate() {
        worksheet.write_string_with_format(cast_row_num(row)?, 0, line, &formats.title)?;
    }
    Ok(())
}

fn write_header(
    worksheet: &mut Worksheet,
    style: &SheetStyle,
    formats: &SheetFormats,
) -> Result<(), FormatError> {
    for (col, label) in style.header_labels.iter().enumerate() {
        worksheet.write_string_with_format(
            style.header_row,
            cast_col_num(col),
            label,
            &formats.header,
        )?;
    }
    Ok(())
}

fn write_body(
    worksheet: &mut Worksheet,
    style: &SheetStyle,
    formats: &SheetFormats,
    table: &PricedTable,
) -> Result<(), FormatError> {
    let body_start = style.body_start_row();

    for (idx, row) in table.rows.iter().enumerate() {
        let row_num = body_start
            .checked_add(cast_row_num(idx)?)
            .ok_or(FormatError::RowOverflow(idx))?;

        write_cell(worksheet, row_num, 0, &row.code, &formats.code)?;
        write_cell(worksheet, row_num, 1, &row.description, &formats.description)?;
        worksheet.write_number_with_format(row_num, 2, row.existence, &formats.existence)?;
        worksheet.write_number_with_format(row_num, 3, row.list_price, &formats.currency)?;
        worksheet.write_number_with_format(row_num, 4, row.promo_price, &formats.currency)?;
        match row.clearance {
            Some(value) => {
                worksheet.write_number_with_format(row_num, 5, value, &formats.currency)?;
            }
            None => {
                worksheet.write_blank(row_num, 5, &formats.currency)?;
            }
        }
    }
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    format: &Format,
) -> Result<(), FormatError> {
    match value {
        CellValue::Empty => {
            worksheet.write_blank(row, col, format)?;
        }
        CellValue::Text(s) => {
            worksheet.write_string_with_format(row, col, s, format)?;
        }
        CellValue::Number(n) => {
            worksheet.write_number_with_format(row, col, *n, format)?;
        }
        CellValue::Bool(b) => {
            worksheet.write_boolean_with_format(row, col, *b, format)?;
        }
    }
    Ok(())
}

fn cast_row_num(value: usize) -> Result<u32, FormatError> {
    u32::try_from(value).map_err(|_| FormatError::RowOverflow(value))
}

// Column indices come from the fixed six-column layout
fn cast_col_num(value: usize) -> u16 {
    value as u16
}

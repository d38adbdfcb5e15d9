// Tests for the cell styles of the rendered price workbook
// calamine does not expose styles, so the package XML is inspected directly

use chrono::NaiveDate;
use inventory_pricing_service::inventory::{CellValue, PricedRow, PricedTable};
use inventory_pricing_service::report::{format_workbook, SectionSheet, SheetStyle};
use roxmltree::{Document, Node};
use std::collections::HashMap;
use std::io::{Cursor, Read};

const CURRENCY_FORMAT: &str = "\"$\"#,##0.00";

/// Resolved style of one `cellXfs` entry
#[derive(Debug, Clone, Default)]
struct CellStyle {
    num_format: Option<String>,
    bold: bool,
    fill_rgb: Option<String>,
    thin_border: bool,
    horizontal: Option<String>,
    vertical: Option<String>,
}

/// Parsed parts of the first worksheet and the shared styles
struct RenderedSheet {
    styles: Vec<CellStyle>,
    cell_styles: HashMap<String, usize>,
    column_widths: HashMap<u32, f64>,
}

impl RenderedSheet {
    fn style_of(&self, cell_ref: &str) -> CellStyle {
        let idx = self.cell_styles.get(cell_ref).copied().unwrap_or(0);
        self.styles[idx].clone()
    }

    fn width_of(&self, column: u32) -> f64 {
        *self
            .column_widths
            .get(&column)
            .unwrap_or_else(|| panic!("No width set for column {column}"))
    }
}

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("Output is not a zip");
    let mut part = archive.by_name(name).expect("Missing workbook part");
    let mut xml = String::new();
    part.read_to_string(&mut xml).expect("Failed to read part");
    xml
}

fn elements<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Vec<Node<'a, 'input>> {
    node.children()
        .filter(|child| child.has_tag_name(tag))
        .collect()
}

fn section<'a, 'input>(doc: &'a Document<'input>, tag: &str) -> Node<'a, 'input> {
    doc.descendants()
        .find(|node| node.has_tag_name(tag))
        .unwrap_or_else(|| panic!("styles.xml has no <{tag}>"))
}

fn attr_index(node: Node, name: &str) -> usize {
    node.attribute(name)
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn parse_styles(xml: &str) -> Vec<CellStyle> {
    let doc = Document::parse(xml).expect("Invalid styles.xml");

    let num_formats: HashMap<usize, String> = doc
        .descendants()
        .filter(|node| node.has_tag_name("numFmt"))
        .map(|node| {
            (
                attr_index(node, "numFmtId"),
                node.attribute("formatCode").unwrap_or_default().to_string(),
            )
        })
        .collect();

    let fonts: Vec<bool> = elements(section(&doc, "fonts"), "font")
        .into_iter()
        .map(|font| font.children().any(|c| c.has_tag_name("b")))
        .collect();

    let fills: Vec<Option<String>> = elements(section(&doc, "fills"), "fill")
        .into_iter()
        .map(|fill| {
            fill.descendants()
                .find_map(|n| n.attribute("rgb"))
                .map(str::to_string)
        })
        .collect();

    let borders: Vec<bool> = elements(section(&doc, "borders"), "border")
        .into_iter()
        .map(|border| {
            ["left", "right", "top", "bottom"].iter().all(|side| {
                border
                    .children()
                    .find(|c| c.has_tag_name(*side))
                    .and_then(|c| c.attribute("style"))
                    == Some("thin")
            })
        })
        .collect();

    elements(section(&doc, "cellXfs"), "xf")
        .into_iter()
        .map(|xf| {
            let alignment = xf.children().find(|c| c.has_tag_name("alignment"));
            CellStyle {
                num_format: num_formats.get(&attr_index(xf, "numFmtId")).cloned(),
                bold: fonts[attr_index(xf, "fontId")],
                fill_rgb: fills[attr_index(xf, "fillId")].clone(),
                thin_border: borders[attr_index(xf, "borderId")],
                horizontal: alignment
                    .and_then(|a| a.attribute("horizontal"))
                    .map(str::to_string),
                vertical: alignment
                    .and_then(|a| a.attribute("vertical"))
                    .map(str::to_string),
            }
        })
        .collect()
}

fn render_first_sheet(bytes: &[u8]) -> RenderedSheet {
    let styles = parse_styles(&read_part(bytes, "xl/styles.xml"));

    let sheet_xml = read_part(bytes, "xl/worksheets/sheet1.xml");
    let doc = Document::parse(&sheet_xml).expect("Invalid sheet1.xml");

    let cell_styles = doc
        .descendants()
        .filter(|node| node.has_tag_name("c"))
        .filter_map(|cell| {
            let cell_ref = cell.attribute("r")?.to_string();
            Some((cell_ref, attr_index(cell, "s")))
        })
        .collect();

    let mut column_widths = HashMap::new();
    for col in doc.descendants().filter(|node| node.has_tag_name("col")) {
        let min: u32 = col.attribute("min").and_then(|v| v.parse().ok()).unwrap();
        let max: u32 = col.attribute("max").and_then(|v| v.parse().ok()).unwrap();
        let width: f64 = col.attribute("width").and_then(|v| v.parse().ok()).unwrap();
        for column in min..=max {
            column_widths.insert(column, width);
        }
    }

    RenderedSheet {
        styles,
        cell_styles,
        column_widths,
    }
}

fn rendered() -> RenderedSheet {
    let row = |code: &str, clearance: Option<f64>| PricedRow {
        code: CellValue::from(code),
        description: CellValue::from("Llanta 205/55 R16"),
        existence: 4.0,
        list_price: 140.0,
        promo_price: 125.0,
        clearance,
    };
    let sheets = vec![SectionSheet {
        sheet_name: "MAYOREO HERMOSILLO".to_string(),
        label: "CEDIS HERMOSILLO".to_string(),
        table: PricedTable {
            rows: vec![row("B", None), row("C", Some(99.5))],
        },
    }];

    let bytes = format_workbook(
        &sheets,
        &SheetStyle::default(),
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
    )
    .expect("Failed to render workbook");

    render_first_sheet(&bytes)
}

#[test]
fn test_header_row_style() {
    let sheet = rendered();

    for col in ["A", "B", "C", "D", "E", "F"] {
        let style = sheet.style_of(&format!("{col}6"));
        assert!(style.bold, "{col}6 should be bold");
        assert_eq!(style.fill_rgb.as_deref(), Some("FFB4C6E7"), "{col}6 fill");
        assert!(style.thin_border, "{col}6 should have a thin border");
        assert_eq!(style.horizontal.as_deref(), Some("center"), "{col}6");
        assert_eq!(style.vertical.as_deref(), Some("center"), "{col}6");
    }
}

#[test]
fn test_title_lines_are_bold() {
    let sheet = rendered();

    for row in 1..=4 {
        assert!(sheet.style_of(&format!("A{row}")).bold, "A{row} bold");
    }
}

#[test]
fn test_body_column_alignment() {
    let sheet = rendered();

    assert_eq!(sheet.style_of("A7").horizontal.as_deref(), Some("left"));
    assert_eq!(sheet.style_of("C7").horizontal.as_deref(), Some("center"));
    assert!(!sheet.style_of("A7").bold);
    assert_eq!(sheet.style_of("A7").fill_rgb, None);
}

#[test]
fn test_price_columns_use_currency_format() {
    let sheet = rendered();

    for cell_ref in ["D7", "E7", "F7", "D8", "E8", "F8"] {
        assert_eq!(
            sheet.style_of(cell_ref).num_format.as_deref(),
            Some(CURRENCY_FORMAT),
            "{cell_ref} format"
        );
    }
    // Remate is blank for computed rows but still formatted
    assert!(sheet.cell_styles.contains_key("F7"));
}

#[test]
fn test_column_widths() {
    let sheet = rendered();

    for (column, expected) in [(1, 25.0), (2, 65.0), (3, 15.0), (4, 20.0), (5, 20.0), (6, 20.0)] {
        let width = sheet.width_of(column);
        // Stored widths include the font padding added by the writer
        assert!(
            width >= expected && width < expected + 1.0,
            "column {column}: expected about {expected}, got {width}"
        );
    }
}

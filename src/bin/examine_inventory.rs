use calamine::{open_workbook_auto, DataType, Reader};
use inventory_pricing_service::inventory::reader::parse_inventory_range;
use inventory_pricing_service::inventory::{find_marker_rows, SECTION_MARKER};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let Some(file_path) = args.get(1) else {
        eprintln!("Usage: examine-inventory <export.xlsx> [rows]");
        std::process::exit(2);
    };
    let rows_to_show: usize = match args.get(2) {
        Some(n) => n.parse()?,
        None => 40,
    };

    println!("Opening inventory export: {file_path}");
    let mut workbook = open_workbook_auto(file_path)?;

    println!("\nSheet names:");
    for (i, name) in workbook.sheet_names().iter().enumerate() {
        println!("  {i}: {name}");
    }

    let range = workbook
        .worksheet_range_at(0)
        .ok_or("Workbook has no worksheets")??;

    println!("\nFirst sheet dimensions: {:?}", range.get_size());

    // Data rows are offset by one from the sheet rows because of the header
    let table = parse_inventory_range(&range)?;
    let markers = find_marker_rows(&table, SECTION_MARKER);
    println!(
        "'{}' marker rows (sheet row numbers): {:?}",
        SECTION_MARKER,
        markers.iter().map(|idx| idx + 2).collect::<Vec<_>>()
    );
    match markers.get(1) {
        Some(split) => println!(
            "Split at sheet row {}: {} rows above, {} rows below",
            split + 2,
            split,
            table.len() - split - 1
        ),
        None => println!("⚠ Fewer than 2 marker rows: this export would be rejected"),
    }

    println!("\nFirst {rows_to_show} rows (showing first 6 columns):");
    println!("{}", "=".repeat(100));

    for (row_idx, row) in range.rows().enumerate().take(rows_to_show) {
        let has_data = row.iter().any(|cell| !cell.is_empty());
        if has_data {
            print!("Row {:3}: ", row_idx + 1);
            for cell in row.iter().take(6) {
                if cell.is_empty() {
                    print!("[empty] ");
                } else {
                    print!("[{cell}] ");
                }
            }
            println!();
        }
    }

    Ok(())
}

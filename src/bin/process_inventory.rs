use chrono::{Local, NaiveDate};
use clap::Parser;
use inventory_pricing_service::api::{unexpected_error_message, STRUCTURAL_ERROR_MESSAGE};
use inventory_pricing_service::report::SheetStyle;
use inventory_pricing_service::services::InventoryService;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "process-inventory")]
#[command(about = "Split an ERP inventory export into the warehouse price sheets", long_about = None)]
struct Cli {
    /// Path to the ERP export ("Valor del inventario por clasificación.xlsx")
    #[arg(long)]
    input: PathBuf,

    /// Output file (default: Inventario_Procesado_<date>.xlsx in --output-dir)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Directory for the default output file name
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Date printed in the sheet titles, YYYY-MM-DD (default: today)
    #[arg(long, env = "INVENTORY_REPORT_DATE")]
    date: Option<NaiveDate>,
}

fn has_xlsx_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
}

fn main() -> ExitCode {
    // Load .env file if it exists (ignore errors if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !has_xlsx_extension(&cli.input) {
        return Err(format!(
            "Solo se permiten archivos Excel (.xlsx): {}",
            cli.input.display()
        )
        .into());
    }

    info!("Reading {}", cli.input.display());
    let bytes = fs::read(&cli.input)?;

    let report_date = cli.date.unwrap_or_else(|| Local::now().date_naive());
    let service = InventoryService::new(SheetStyle::default());

    let processed = match service.process(&bytes, report_date) {
        Ok(processed) => processed,
        Err(e) if e.is_structural() => return Err(STRUCTURAL_ERROR_MESSAGE.into()),
        Err(e) => return Err(unexpected_error_message(&e.to_string()).into()),
    };

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.output_dir.join(&processed.file_name));
    fs::write(&output, &processed.workbook)?;

    println!("✅ ¡Archivo procesado exitosamente!");
    for section in &processed.sections {
        println!(
            "  {:<20} {:>6} filas ({} descartadas)",
            section.sheet_name, section.rows_written, section.rows_dropped
        );
    }
    println!("  → {}", output.display());

    Ok(())
}

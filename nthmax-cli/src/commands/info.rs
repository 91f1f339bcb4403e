use anyhow::{bail, Context, Result};
use nthmax::NthMaxService;
use std::path::PathBuf;

pub fn run(service: &NthMaxService, file: PathBuf) -> Result<()> {
    let path = service.resolve_path(&file);
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }

    let summary = service
        .column_summary(&path)
        .context("Failed to read spreadsheet")?;
    let file_size = std::fs::metadata(&path)?.len();

    println!("File: {}", path.display());
    println!("File size: {}", format_size(file_size));
    println!("Sheets: {}", summary.sheet_names.join(", "));
    println!();
    println!("Sheet scanned: {}", summary.sheet_name);
    println!("Rows: {}", summary.rows);
    println!("Numeric values: {}", summary.numeric_values);
    println!("Blank cells: {}", summary.blank_cells);

    if let (Some(min), Some(max)) = (summary.min, summary.max) {
        println!();
        println!("Min value: {}", min);
        println!("Max value: {}", max);
    }

    Ok(())
}

/// Human-readable file size using binary units.
fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{} bytes", bytes);
    }

    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit + 1 < UNITS.len() {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, UNITS[unit])
}

use anyhow::{Context, Result};
use nthmax::NthMaxService;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NthMaxResponse {
    file_path: String,
    n: usize,
    value: i64,
    rows_scanned: usize,
    numeric_values: usize,
}

pub fn run(service: &NthMaxService, file: PathBuf, n: i64, json: bool) -> Result<()> {
    let outcome = service
        .nth_max(&file, n)
        .with_context(|| format!("Failed to find max #{} in {}", n, file.display()))?;

    if json {
        let response = NthMaxResponse {
            file_path: file.display().to_string(),
            n: outcome.n,
            value: outcome.value,
            rows_scanned: outcome.rows_scanned,
            numeric_values: outcome.numeric_values,
        };
        println!("{}", serde_json::to_string(&response)?);
    } else {
        println!("{}", outcome.value);
    }

    Ok(())
}

use anyhow::{Context, Result};
use nthmax::NthMaxService;
use std::path::PathBuf;

pub fn run(service: &NthMaxService, file: PathBuf, n: i64, json: bool) -> Result<()> {
    let values = service
        .top_values(&file, n)
        .with_context(|| format!("Failed to read top {} values from {}", n, file.display()))?;

    if json {
        println!("{}", serde_json::to_string(&values)?);
        return Ok(());
    }

    println!("{:>6} {:>20}", "RANK", "VALUE");
    println!("{}", "-".repeat(27));
    for (rank, value) in values.iter().enumerate() {
        println!("{:>6} {:>20}", rank + 1, value);
    }

    Ok(())
}

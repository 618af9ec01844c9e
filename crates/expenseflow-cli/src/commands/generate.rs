//! Synthetic data generation command

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use expenseflow_core::export::{write_expenses, ExportFormat};
use expenseflow_core::models::today;
use expenseflow_core::PastMonthGenerator;

use super::format_amount;

pub fn cmd_generate(
    user: &str,
    seed: Option<u64>,
    as_of: Option<&str>,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let format: ExportFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let as_of = as_of
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("Invalid --as-of date format (use YYYY-MM-DD)")?
        .unwrap_or_else(today);

    let mut generator = match seed {
        Some(seed) => PastMonthGenerator::seeded(seed),
        None => PastMonthGenerator::new(),
    };
    let expenses = generator.generate(user, as_of);

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_expenses(&expenses, format, &mut writer)?;
            writer.flush()?;

            let total: f64 = expenses.iter().map(|e| e.amount).sum();
            println!(
                "✅ Generated {} expenses totalling {} to {}",
                expenses.len(),
                format_amount(total),
                path.display()
            );
        }
        None => {
            // Write to stdout
            let stdout = std::io::stdout();
            write_expenses(&expenses, format, stdout.lock())?;
        }
    }

    Ok(())
}

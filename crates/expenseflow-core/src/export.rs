//! Expense list export (JSON and CSV)

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::models::Expense;

/// Output format for exported expense lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(format!("Unknown export format: {} (use json or csv)", s)),
        }
    }
}

/// CSV column order
pub const CSV_HEADER: [&str; 6] = ["id", "date", "title", "category", "amount", "description"];

/// Flat CSV row
#[derive(Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    date: String,
    title: &'a str,
    category: &'a str,
    amount: f64,
    description: &'a str,
}

/// Write expenses as CSV; the header row is written even for an empty list
pub fn write_csv<W: Write>(expenses: &[Expense], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;
    for expense in expenses {
        csv_writer.serialize(CsvRow {
            id: &expense.id,
            date: expense.date.format("%Y-%m-%d").to_string(),
            title: &expense.title,
            category: expense.category.as_str(),
            amount: expense.amount,
            description: &expense.description,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write any serializable value as pretty JSON followed by a newline
pub fn write_json<W: Write, T: Serialize + ?Sized>(value: &T, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Write expenses in the requested format
pub fn write_expenses<W: Write>(expenses: &[Expense], format: ExportFormat, writer: W) -> Result<()> {
    match format {
        ExportFormat::Json => write_json(expenses, writer),
        ExportFormat::Csv => write_csv(expenses, writer),
    }
}

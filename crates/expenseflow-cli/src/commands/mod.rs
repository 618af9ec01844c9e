//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analyze` - Analytics over an expense list read from disk
//! - `categories` - Category reference listing
//! - `generate` - Synthetic past-month data
//! - `serve` - Web server command

pub mod analyze;
pub mod categories;
pub mod generate;
pub mod serve;

// Re-export command functions for main.rs
pub use analyze::*;
pub use categories::*;
pub use generate::*;
pub use serve::*;

/// Format an amount with two decimals and thousands separators
pub fn format_amount(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, cents)
}

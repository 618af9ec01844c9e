//! Category reference listing

use anyhow::Result;

use expenseflow_core::generator::{pattern_for, CATEGORY_WEIGHTS};
use expenseflow_core::Category;

pub fn cmd_categories() -> Result<()> {
    println!();
    println!("🗂️  Categories");
    println!("   ─────────────────────────────────────────────────");
    println!("   {:<20} {:>7} {:>15}", "Category", "Weight", "Amount range");

    for category in Category::ALL {
        let pattern = pattern_for(category);
        let weight = CATEGORY_WEIGHTS[category.index()];
        println!(
            "   {:<20} {:>6.0}% {:>15}",
            category.as_str(),
            weight * 100.0,
            format!("{} - {}", pattern.range.min, pattern.range.max)
        );
    }

    Ok(())
}

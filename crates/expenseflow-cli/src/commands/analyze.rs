//! Analytics command over an expense list on disk

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use expenseflow_core::{
    compute_analytics_summary, compute_budget_stats, AnalyticsSummary, BudgetStats, Expense,
};

/// Analytics summary, plus budget stats when a budget was given
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub summary: AnalyticsSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_stats: Option<BudgetStats>,
}

/// Load an expense list and analyze it
pub fn analyze_file(path: &Path, budget: Option<f64>) -> Result<AnalysisReport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let expenses: Vec<Expense> = serde_json::from_str(&content)
        .with_context(|| format!("Expected a JSON array of expenses: {}", path.display()))?;

    if let Some(budget) = budget {
        if !budget.is_finite() || budget <= 0.0 {
            anyhow::bail!("Budget must be greater than 0");
        }
    }

    Ok(AnalysisReport {
        summary: compute_analytics_summary(&expenses),
        budget_stats: budget.map(|b| compute_budget_stats(&expenses, b)),
    })
}

pub fn cmd_analyze(file: &Path, budget: Option<f64>) -> Result<()> {
    let report = analyze_file(file, budget)?;

    let json =
        serde_json::to_string_pretty(&report).context("Failed to serialize analysis to JSON")?;
    println!("{}", json);

    Ok(())
}

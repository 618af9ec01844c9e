//! Spending analytics and rule-based savings recommendations
//!
//! All functions here are pure: they aggregate an expense slice and apply
//! fixed thresholds. Empty input yields zero totals and no findings.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{
    AnalyticsSummary, BudgetStats, Category, Expense, FlaggedExpense, Recommendation,
    RecommendationLevel,
};

/// A per-expense threshold above which spending is considered avoidable
#[derive(Debug, Clone, Copy)]
pub struct FlagRule {
    pub category: Category,
    /// Amount must be strictly greater than this
    pub threshold: f64,
    pub savings_percentage: f64,
    pub reason: &'static str,
}

/// Flagging rules, highest tier first within each category
pub static FLAG_RULES: [FlagRule; 8] = [
    FlagRule {
        category: Category::FoodDining,
        threshold: 1000.0,
        savings_percentage: 0.5,
        reason: "Expensive meal - consider cooking at home more often",
    },
    FlagRule {
        category: Category::FoodDining,
        threshold: 400.0,
        savings_percentage: 0.4,
        reason: "High dining expense - look for cheaper alternatives",
    },
    FlagRule {
        category: Category::Entertainment,
        threshold: 1500.0,
        savings_percentage: 0.6,
        reason: "Premium entertainment - explore free or low-cost options",
    },
    FlagRule {
        category: Category::Entertainment,
        threshold: 800.0,
        savings_percentage: 0.5,
        reason: "High entertainment spend - consider cheaper alternatives",
    },
    FlagRule {
        category: Category::Shopping,
        threshold: 3000.0,
        savings_percentage: 0.5,
        reason: "Large purchase - wait 24 hours before buying non-essentials",
    },
    FlagRule {
        category: Category::Shopping,
        threshold: 1500.0,
        savings_percentage: 0.3,
        reason: "High shopping expense - compare prices before buying",
    },
    FlagRule {
        category: Category::Transportation,
        threshold: 500.0,
        savings_percentage: 0.25,
        reason: "Costly ride - consider public transport or carpooling",
    },
    FlagRule {
        category: Category::Other,
        threshold: 1500.0,
        savings_percentage: 0.3,
        reason: "Large miscellaneous expense - review if it was necessary",
    },
];

/// A category-total threshold that triggers a recommendation
#[derive(Debug, Clone, Copy)]
pub struct RecommendationRule {
    pub category: Category,
    pub level: RecommendationLevel,
    /// Category total must be strictly greater than this
    pub threshold: f64,
    pub suggested: f64,
    pub tip: &'static str,
}

/// Recommendation rules for the watched categories, high tier first
pub static RECOMMENDATION_RULES: [RecommendationRule; 8] = [
    RecommendationRule {
        category: Category::FoodDining,
        level: RecommendationLevel::High,
        threshold: 15000.0,
        suggested: 12000.0,
        tip: "Cook more meals at home and limit dining out to weekends",
    },
    RecommendationRule {
        category: Category::FoodDining,
        level: RecommendationLevel::Mild,
        threshold: 10000.0,
        suggested: 9000.0,
        tip: "Plan weekly meals and carry lunch to work a few days a week",
    },
    RecommendationRule {
        category: Category::Entertainment,
        level: RecommendationLevel::High,
        threshold: 5000.0,
        suggested: 3000.0,
        tip: "Choose free entertainment options like parks, free events, or home activities",
    },
    RecommendationRule {
        category: Category::Entertainment,
        level: RecommendationLevel::Mild,
        threshold: 3000.0,
        suggested: 2500.0,
        tip: "Review streaming subscriptions and keep only the ones you use",
    },
    RecommendationRule {
        category: Category::Shopping,
        level: RecommendationLevel::High,
        threshold: 8000.0,
        suggested: 5000.0,
        tip: "Create a shopping list and stick to it. Wait 24 hours before non-essential purchases",
    },
    RecommendationRule {
        category: Category::Shopping,
        level: RecommendationLevel::Mild,
        threshold: 5000.0,
        suggested: 4000.0,
        tip: "Compare prices online and buy household staples in bulk",
    },
    RecommendationRule {
        category: Category::Transportation,
        level: RecommendationLevel::High,
        threshold: 6000.0,
        suggested: 4000.0,
        tip: "Use public transport or carpool instead of daily cab rides",
    },
    RecommendationRule {
        category: Category::Transportation,
        level: RecommendationLevel::Mild,
        threshold: 4000.0,
        suggested: 3500.0,
        tip: "Combine errands into fewer trips and consider a monthly transit pass",
    },
];

/// Sum of all amounts
pub fn total_spent(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

/// Summed amount per category (only categories that occur)
pub fn category_totals(expenses: &[Expense]) -> BTreeMap<Category, f64> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.category).or_insert(0.0) += expense.amount;
    }
    totals
}

/// Summed amount per calendar day
pub fn daily_spending(expenses: &[Expense]) -> BTreeMap<NaiveDate, f64> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.date).or_insert(0.0) += expense.amount;
    }
    totals
}

/// Find the highest flagging tier that applies to an expense
pub fn flag_rule_for(expense: &Expense) -> Option<&'static FlagRule> {
    FLAG_RULES
        .iter()
        .find(|rule| rule.category == expense.category && expense.amount > rule.threshold)
}

/// Flag avoidable expenses, in input order
pub fn flag_unnecessary(expenses: &[Expense]) -> Vec<FlaggedExpense> {
    expenses
        .iter()
        .filter_map(|expense| {
            flag_rule_for(expense).map(|rule| FlaggedExpense {
                expense: expense.clone(),
                savings_percentage: rule.savings_percentage,
                potential_savings: expense.amount * rule.savings_percentage,
                reason: rule.reason.to_string(),
            })
        })
        .collect()
}

/// Build at most one recommendation per watched category
pub fn recommendations(category_totals: &BTreeMap<Category, f64>) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = Vec::new();

    for rule in &RECOMMENDATION_RULES {
        if recommendations.iter().any(|r| r.category == rule.category) {
            continue;
        }
        let current = category_totals.get(&rule.category).copied().unwrap_or(0.0);
        if current > rule.threshold {
            recommendations.push(Recommendation {
                category: rule.category,
                current,
                suggested: rule.suggested,
                savings: current - rule.suggested,
                tip: rule.tip.to_string(),
                level: rule.level,
            });
        }
    }

    recommendations
}

/// Summarize an expense list: totals, flagged expenses and recommendations
pub fn compute_analytics_summary(expenses: &[Expense]) -> AnalyticsSummary {
    let category_totals = category_totals(expenses);
    let unnecessary_expenses = flag_unnecessary(expenses);
    let savings_potential = unnecessary_expenses
        .iter()
        .map(|f| f.potential_savings)
        .sum();
    let recommendations = recommendations(&category_totals);

    AnalyticsSummary {
        total_spent: total_spent(expenses),
        category_totals,
        daily_spending: daily_spending(expenses),
        unnecessary_expenses,
        savings_potential,
        recommendations,
        expense_count: expenses.len(),
    }
}

/// Measure spending against a monthly budget
///
/// Remaining budget is floored at zero and the used percentage capped at 100.
/// A non-positive budget reports 0% used.
pub fn compute_budget_stats(expenses: &[Expense], budget: f64) -> BudgetStats {
    let total = total_spent(expenses);
    let budget_used_percentage = if budget > 0.0 {
        (total / budget * 100.0).min(100.0)
    } else {
        0.0
    };

    BudgetStats {
        total_spent: total,
        budget,
        remaining: (budget - total).max(0.0),
        budget_used_percentage,
        category_totals: category_totals(expenses),
        expense_count: expenses.len(),
    }
}

//! Synthetic past-month expense generator
//!
//! Produces a randomized month of expenses that approximates a fixed total.
//! Categories are picked by weight and amounts are paced against the budget
//! that is still left, so the set lands close to (but never above) the target.
//!
//! ```rust,ignore
//! use expenseflow_core::generator::PastMonthGenerator;
//!
//! let mut generator = PastMonthGenerator::seeded(42);
//! let expenses = generator.generate("demo_user", today());
//! ```

use chrono::{Days, NaiveDate};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use tracing::{debug, error, warn};

use crate::error::{Error, Result};
use crate::models::{today, Category, Expense};

/// Total the generated month should add up to
pub const TARGET_TOTAL: i64 = 50_000;

/// Category weights, aligned with [`Category::ALL`]
pub const CATEGORY_WEIGHTS: [f64; 9] = [0.25, 0.15, 0.15, 0.10, 0.10, 0.08, 0.07, 0.05, 0.05];

/// Inclusive amount range for a single transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountRange {
    pub min: i64,
    pub max: i64,
}

impl AmountRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

/// Item names and typical amounts for a category
#[derive(Debug, Clone, Copy)]
pub struct CategoryPattern {
    pub category: Category,
    pub items: &'static [&'static str],
    pub range: AmountRange,
}

/// Patterns in [`Category::ALL`] order
pub static PATTERNS: [CategoryPattern; 9] = [
    CategoryPattern {
        category: Category::FoodDining,
        items: &["Breakfast", "Lunch", "Dinner", "Snacks", "Coffee"],
        range: AmountRange::new(50, 500),
    },
    CategoryPattern {
        category: Category::Transportation,
        items: &["Metro", "Auto", "Uber", "Petrol", "Bus"],
        range: AmountRange::new(20, 300),
    },
    CategoryPattern {
        category: Category::Shopping,
        items: &["Groceries", "Clothes", "Electronics", "Books", "Household"],
        range: AmountRange::new(200, 2000),
    },
    CategoryPattern {
        category: Category::Entertainment,
        items: &["Movies", "Games", "Streaming", "Events", "Sports"],
        range: AmountRange::new(100, 1000),
    },
    CategoryPattern {
        category: Category::BillsUtilities,
        items: &["Electricity", "Internet", "Phone", "Water", "Gas"],
        range: AmountRange::new(500, 3000),
    },
    CategoryPattern {
        category: Category::Healthcare,
        items: &["Medicine", "Doctor Visit", "Gym", "Supplements"],
        range: AmountRange::new(200, 2000),
    },
    CategoryPattern {
        category: Category::Education,
        items: &["Course Fee", "Books", "Online Learning", "Certification"],
        range: AmountRange::new(500, 5000),
    },
    CategoryPattern {
        category: Category::Travel,
        items: &["Weekend Trip", "Vacation", "Flight", "Hotel"],
        range: AmountRange::new(1000, 8000),
    },
    CategoryPattern {
        category: Category::Other,
        items: &["Gifts", "Charity", "Miscellaneous", "Emergency"],
        range: AmountRange::new(100, 2000),
    },
];

/// Look up the generation pattern for a category
pub fn pattern_for(category: Category) -> &'static CategoryPattern {
    &PATTERNS[category.index()]
}

/// Budget state handed to a pacing strategy for one transaction
#[derive(Debug, Clone, Copy)]
pub struct PacingContext {
    /// Target total minus what has been generated so far
    pub remaining_amount: i64,
    /// Transactions left including the current one
    pub remaining_transactions: u32,
    /// Typical range for the chosen category
    pub range: AmountRange,
}

/// Decides the amount of the next generated transaction
pub trait PacingStrategy: Send + Sync {
    fn next_amount(&self, rng: &mut dyn RngCore, ctx: &PacingContext) -> Result<i64>;
}

/// Default pacing: stay inside the category range while the budget allows,
/// scale up (to at most twice the range max) when there is budget to spare,
/// and shrink towards the remaining budget when it runs low.
#[derive(Debug, Clone, Copy, Default)]
pub struct BudgetPacing;

impl PacingStrategy for BudgetPacing {
    fn next_amount(&self, rng: &mut dyn RngCore, ctx: &PacingContext) -> Result<i64> {
        if ctx.remaining_transactions == 0 {
            return Ok(ctx.remaining_amount);
        }

        let avg_remaining = ctx.remaining_amount as f64 / ctx.remaining_transactions as f64;
        let AmountRange { min, max } = ctx.range;

        let (low, high) = if avg_remaining > max as f64 {
            (max, ((avg_remaining * 1.5) as i64).min(max * 2))
        } else if avg_remaining < min as f64 {
            let ceiling = ctx.remaining_amount.max(1);
            (min.min(ceiling), ceiling)
        } else {
            (min, max)
        };

        if low > high {
            return Err(Error::Generation(format!(
                "empty amount range {}..={}",
                low, high
            )));
        }

        Ok(rng.gen_range(low..=high))
    }
}

/// Tunables for the generator
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub target_total: i64,
    pub min_transactions: u32,
    pub max_transactions: u32,
    /// Length of the window ending yesterday that dates are drawn from
    pub window_days: u32,
    /// Category weights aligned with [`Category::ALL`]
    pub weights: Vec<f64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            target_total: TARGET_TOTAL,
            min_transactions: 60,
            max_transactions: 80,
            window_days: 30,
            weights: CATEGORY_WEIGHTS.to_vec(),
        }
    }
}

/// Generator for synthetic past-month expense data
pub struct PastMonthGenerator<R: Rng = StdRng> {
    rng: R,
    config: GeneratorConfig,
    pacing: Box<dyn PacingStrategy>,
}

impl PastMonthGenerator<StdRng> {
    /// Generator seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible generator
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for PastMonthGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PastMonthGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            config: GeneratorConfig::default(),
            pacing: Box::new(BudgetPacing),
        }
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_pacing(mut self, pacing: impl PacingStrategy + 'static) -> Self {
        self.pacing = Box::new(pacing);
        self
    }

    /// Generate a month of expenses ending the day before `today`
    ///
    /// Never fails: a broken configuration is logged and yields an empty list.
    pub fn generate(&mut self, user_id: &str, today: NaiveDate) -> Vec<Expense> {
        match self.try_generate(today) {
            Ok(expenses) => {
                debug!(
                    user_id,
                    count = expenses.len(),
                    total = expenses.iter().map(|e| e.amount).sum::<f64>(),
                    "Generated past-month data"
                );
                expenses
            }
            Err(e) => {
                error!(user_id, error = %e, "Failed to generate past-month data");
                vec![]
            }
        }
    }

    fn try_generate(&mut self, today: NaiveDate) -> Result<Vec<Expense>> {
        let config = &self.config;
        if config.min_transactions > config.max_transactions {
            return Err(Error::Generation(format!(
                "min_transactions ({}) exceeds max_transactions ({})",
                config.min_transactions, config.max_transactions
            )));
        }
        if config.window_days == 0 {
            return Err(Error::Generation("window_days must be positive".to_string()));
        }
        if config.weights.len() != Category::ALL.len() {
            return Err(Error::Generation(format!(
                "expected {} category weights, got {}",
                Category::ALL.len(),
                config.weights.len()
            )));
        }

        let weights = WeightedIndex::new(&config.weights)
            .map_err(|e| Error::Generation(format!("invalid category weights: {}", e)))?;
        let base_date = today
            .checked_sub_days(Days::new(u64::from(config.window_days)))
            .ok_or_else(|| Error::Generation(format!("date underflow from {}", today)))?;
        let target = config.target_total;

        let count = self
            .rng
            .gen_range(config.min_transactions..=config.max_transactions);
        let mut spent = 0i64;
        let mut expenses = Vec::with_capacity(count as usize);

        for i in 0..count {
            match self.next_expense(i, count, spent, base_date, &weights) {
                Ok(Some(expense)) => {
                    spent += expense.amount as i64;
                    expenses.push(expense);
                    if spent >= target {
                        break;
                    }
                }
                // Non-positive amount: transaction dropped
                Ok(None) => {}
                Err(e) => {
                    warn!(index = i, error = %e, "Skipping past-month expense");
                }
            }
        }

        expenses.sort_by_key(|e| e.date);
        Ok(expenses)
    }

    fn next_expense(
        &mut self,
        index: u32,
        count: u32,
        spent: i64,
        base_date: NaiveDate,
        weights: &WeightedIndex<f64>,
    ) -> Result<Option<Expense>> {
        let days_ago = self.rng.gen_range(0..self.config.window_days);
        let date = base_date
            .checked_add_days(Days::new(u64::from(days_ago)))
            .ok_or_else(|| Error::Generation(format!("date overflow from {}", base_date)))?;

        let category = Category::ALL[weights.sample(&mut self.rng)];
        let pattern = pattern_for(category);

        let target = self.config.target_total;
        let ctx = PacingContext {
            remaining_amount: target - spent,
            remaining_transactions: count - index,
            range: pattern.range,
        };
        let mut amount = self.pacing.next_amount(&mut self.rng, &ctx)?;

        if spent + amount > target {
            amount = target - spent;
        }
        if amount <= 0 {
            return Ok(None);
        }

        let title = pattern
            .items
            .choose(&mut self.rng)
            .ok_or_else(|| Error::Generation(format!("no items for {}", category)))?;

        Ok(Some(Expense::new(
            *title,
            amount as f64,
            category,
            date,
            format!("Past month expense - {}", category.as_str().to_lowercase()),
        )))
    }
}

/// Generate a fresh past-month data set for a user
pub fn generate_past_month_data(user_id: &str) -> Vec<Expense> {
    PastMonthGenerator::new().generate(user_id, today())
}

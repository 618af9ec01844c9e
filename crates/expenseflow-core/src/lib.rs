//! ExpenseFlow Core Library
//!
//! Shared functionality for the ExpenseFlow expense tracker:
//! - Expense, category and analytics models
//! - Synthetic past-month data generator
//! - Analytics and savings recommendation engine
//! - Storage abstraction with an in-memory backend
//! - Account workflows (registration, login, demo seeding)
//! - JSON/CSV export

pub mod accounts;
pub mod analytics;
pub mod error;
pub mod export;
pub mod generator;
pub mod models;
pub mod store;

pub use analytics::{compute_analytics_summary, compute_budget_stats};
pub use error::{Error, Result};
pub use export::ExportFormat;
pub use generator::{
    generate_past_month_data, BudgetPacing, GeneratorConfig, PacingContext, PacingStrategy,
    PastMonthGenerator,
};
pub use models::{
    AnalyticsSummary, BudgetStats, Category, Expense, ExpenseInput, FlaggedExpense,
    Recommendation, RecommendationLevel, Session, User,
};
pub use store::{ExpenseStore, MemoryStore, SessionStore, Store, UserStore};

//! Domain models for ExpenseFlow

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Fixed spending categories, in display order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum Category {
    FoodDining,
    Transportation,
    Shopping,
    Entertainment,
    BillsUtilities,
    Healthcare,
    Education,
    Travel,
    #[default]
    Other,
}

impl Category {
    /// All categories in their canonical order
    pub const ALL: [Category; 9] = [
        Self::FoodDining,
        Self::Transportation,
        Self::Shopping,
        Self::Entertainment,
        Self::BillsUtilities,
        Self::Healthcare,
        Self::Education,
        Self::Travel,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoodDining => "Food & Dining",
            Self::Transportation => "Transportation",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::BillsUtilities => "Bills & Utilities",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::Other => "Other",
        }
    }

    /// Position in [`Category::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unknown labels decode as `Other` so stored records never fail to load
impl From<String> for Category {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}

/// A single dated spending entry
///
/// Decoding is tolerant: any missing field is replaced by a default
/// (fresh id, empty text, zero amount, `Other`, today's date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default = "new_id", deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: Category,
    #[serde(default = "today", deserialize_with = "lenient_date")]
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
}

impl Expense {
    pub fn new(
        title: impl Into<String>,
        amount: f64,
        category: Category,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            amount,
            category,
            date,
            description: description.into(),
        }
    }
}

/// Generate a fresh random identifier
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

// Any JSON value is accepted; only strings carry text
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?
        .filter(|s| !s.is_empty())
        .unwrap_or_else(new_id))
}

fn lenient_category<'de, D>(deserializer: D) -> std::result::Result<Category, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.map(Category::from).unwrap_or_default())
}

fn lenient_amount<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_amount).unwrap_or(0.0))
}

fn lenient_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
        .unwrap_or_else(today))
}

/// Read an amount from a JSON number or numeric string
pub fn parse_amount(value: &serde_json::Value) -> Option<f64> {
    let amount = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    amount.filter(|a| a.is_finite())
}

/// Expense payload as submitted by a user, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpenseInput {
    pub title: Option<String>,
    pub amount: Option<serde_json::Value>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

impl ExpenseInput {
    /// Validate the payload and build a new expense record
    ///
    /// `title`, `amount` and `category` are required and must be non-empty;
    /// the amount must be a positive number (numeric strings are accepted).
    pub fn into_expense(self, today: NaiveDate) -> Result<Expense> {
        let title = required_text(self.title.as_deref(), "title")?;

        let amount_value = self
            .amount
            .filter(|v| !is_blank(v))
            .ok_or_else(|| Error::InvalidData("Missing required field: amount".to_string()))?;

        let category_label = required_text(self.category.as_deref(), "category")?;

        let amount = parse_amount(&amount_value)
            .ok_or_else(|| Error::InvalidData("Invalid amount format".to_string()))?;
        if amount <= 0.0 {
            return Err(Error::InvalidData(
                "Amount must be greater than 0".to_string(),
            ));
        }

        let category: Category = category_label.parse().map_err(Error::InvalidData)?;

        let date = match self.date.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
                Error::InvalidData("Invalid date format (use YYYY-MM-DD)".to_string())
            })?,
            None => today,
        };

        let description = self.description.unwrap_or_default().trim().to_string();

        Ok(Expense::new(title, amount, category, date, description))
    }
}

fn required_text(value: Option<&str>, field: &str) -> Result<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidData(format!("Missing required field: {}", field)))
}

// Null, empty strings, zero and false all count as "not provided"
fn is_blank(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Bool(b) => !b,
        serde_json::Value::String(s) => s.trim().is_empty(),
        serde_json::Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// A registered user
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub monthly_budget: f64,
}

/// Sessions older than this are rejected and pruned
pub const SESSION_TTL_HOURS: i64 = 7 * 24;

/// An authenticated browser session
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at > Duration::hours(SESSION_TTL_HOURS)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// An expense flagged as avoidable, with the estimated saving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedExpense {
    #[serde(flatten)]
    pub expense: Expense,
    /// Fraction of the amount that could be saved (0.0 - 1.0)
    pub savings_percentage: f64,
    pub potential_savings: f64,
    pub reason: String,
}

/// Strength of a category recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationLevel {
    High,
    Mild,
}

/// Category-level savings recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: Category,
    pub current: f64,
    pub suggested: f64,
    pub savings: f64,
    pub tip: String,
    pub level: RecommendationLevel,
}

/// Summary of a past-month expense list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_spent: f64,
    pub category_totals: BTreeMap<Category, f64>,
    pub daily_spending: BTreeMap<NaiveDate, f64>,
    pub unnecessary_expenses: Vec<FlaggedExpense>,
    pub savings_potential: f64,
    pub recommendations: Vec<Recommendation>,
    pub expense_count: usize,
}

/// Spending against a monthly budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStats {
    pub total_spent: f64,
    pub budget: f64,
    pub remaining: f64,
    pub budget_used_percentage: f64,
    pub category_totals: BTreeMap<Category, f64>,
    pub expense_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_category_order_and_labels() {
        let labels: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Food & Dining",
                "Transportation",
                "Shopping",
                "Entertainment",
                "Bills & Utilities",
                "Healthcare",
                "Education",
                "Travel",
                "Other",
            ]
        );
        for (i, c) in Category::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Food & Dining".parse::<Category>(), Ok(Category::FoodDining));
        assert_eq!(" travel ".parse::<Category>(), Ok(Category::Travel));
        assert!("Groceries".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&Category::BillsUtilities).unwrap();
        assert_eq!(json, "\"Bills & Utilities\"");

        let back: Category = serde_json::from_str("\"Bills & Utilities\"").unwrap();
        assert_eq!(back, Category::BillsUtilities);

        let unknown: Category = serde_json::from_str("\"Pets\"").unwrap();
        assert_eq!(unknown, Category::Other);
    }

    #[test]
    fn test_expense_decoding_substitutes_defaults() {
        let expense: Expense = serde_json::from_str(r#"{"title": "Lunch"}"#).unwrap();
        assert_eq!(expense.title, "Lunch");
        assert_eq!(expense.amount, 0.0);
        assert_eq!(expense.category, Category::Other);
        assert_eq!(expense.description, "");
        assert!(!expense.id.is_empty());
        assert_eq!(expense.date, today());

        let expense: Expense = serde_json::from_str(
            r#"{"id": null, "amount": null, "category": null, "description": null, "date": "bad"}"#,
        )
        .unwrap();
        assert_eq!(expense.amount, 0.0);
        assert_eq!(expense.category, Category::Other);
        assert!(!expense.id.is_empty());
    }

    #[test]
    fn test_expense_decoding_ignores_wrong_types() {
        let expenses: Vec<Expense> = serde_json::from_str(
            r#"[
                {"id": 42, "title": 5, "amount": {"v": 1}, "category": 7, "date": 20240101, "description": ["x"]},
                {"title": "Taxi", "amount": 300, "category": true, "date": {"day": 1}}
            ]"#,
        )
        .unwrap();

        assert_eq!(expenses.len(), 2);
        let first = &expenses[0];
        assert!(!first.id.is_empty());
        assert_eq!(first.title, "");
        assert_eq!(first.amount, 0.0);
        assert_eq!(first.category, Category::Other);
        assert_eq!(first.date, today());
        assert_eq!(first.description, "");

        assert_eq!(expenses[1].title, "Taxi");
        assert_eq!(expenses[1].amount, 300.0);
        assert_eq!(expenses[1].category, Category::Other);
    }

    #[test]
    fn test_expense_decoding_reads_string_amount() {
        let expense: Expense = serde_json::from_str(
            r#"{"id": "e1", "amount": "250.5", "category": "Shopping", "date": "2024-03-02"}"#,
        )
        .unwrap();
        assert_eq!(expense.id, "e1");
        assert_eq!(expense.amount, 250.5);
        assert_eq!(expense.category, Category::Shopping);
        assert_eq!(expense.date, date("2024-03-02"));
    }

    #[test]
    fn test_expense_serializes_wire_shape() {
        let mut expense = Expense::new("Metro", 40.0, Category::Transportation, date("2024-01-05"), "");
        expense.id = "abc".to_string();
        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["category"], "Transportation");
        assert_eq!(json["date"], "2024-01-05");
        assert_eq!(json["amount"], 40.0);
    }

    #[test]
    fn test_expense_input_valid() {
        let input = ExpenseInput {
            title: Some("  Coffee ".to_string()),
            amount: Some(serde_json::json!("120")),
            category: Some("Food & Dining".to_string()),
            date: None,
            description: Some(" morning ".to_string()),
        };
        let expense = input.into_expense(date("2024-06-01")).unwrap();
        assert_eq!(expense.title, "Coffee");
        assert_eq!(expense.amount, 120.0);
        assert_eq!(expense.category, Category::FoodDining);
        assert_eq!(expense.date, date("2024-06-01"));
        assert_eq!(expense.description, "morning");
    }

    #[test]
    fn test_expense_input_rejects_bad_fields() {
        let base = ExpenseInput {
            title: Some("Coffee".to_string()),
            amount: Some(serde_json::json!(10)),
            category: Some("Food & Dining".to_string()),
            date: None,
            description: None,
        };
        let today = date("2024-06-01");

        let missing_title = ExpenseInput {
            title: Some("   ".to_string()),
            ..base.clone()
        };
        let err = missing_title.into_expense(today).unwrap_err();
        assert!(err.to_string().contains("Missing required field: title"));

        let zero = ExpenseInput {
            amount: Some(serde_json::json!(0)),
            ..base.clone()
        };
        let err = zero.into_expense(today).unwrap_err();
        assert!(err.to_string().contains("Missing required field: amount"));

        let negative = ExpenseInput {
            amount: Some(serde_json::json!(-5)),
            ..base.clone()
        };
        let err = negative.into_expense(today).unwrap_err();
        assert!(err.to_string().contains("greater than 0"));

        let garbage = ExpenseInput {
            amount: Some(serde_json::json!("ten")),
            ..base.clone()
        };
        let err = garbage.into_expense(today).unwrap_err();
        assert!(err.to_string().contains("Invalid amount format"));

        let unknown = ExpenseInput {
            category: Some("Pets".to_string()),
            ..base.clone()
        };
        let err = unknown.into_expense(today).unwrap_err();
        assert!(err.to_string().contains("Unknown category"));

        let bad_date = ExpenseInput {
            date: Some("01/02/2024".to_string()),
            ..base
        };
        let err = bad_date.into_expense(today).unwrap_err();
        assert!(err.to_string().contains("Invalid date format"));
    }

    #[test]
    fn test_session_expiry() {
        let created_at = Utc::now();
        let session = Session {
            token: "t".to_string(),
            user_id: "u1".to_string(),
            user_name: "A".to_string(),
            created_at,
        };
        assert!(!session.is_expired());
        assert!(!session.is_expired_at(created_at + Duration::hours(SESSION_TTL_HOURS)));
        assert!(session.is_expired_at(created_at + Duration::hours(SESSION_TTL_HOURS + 1)));
    }

    #[test]
    fn test_user_hides_password_hash() {
        let user = User {
            id: "u1".to_string(),
            email: "a@b.com".to_string(),
            password_hash: "secret".to_string(),
            name: "A".to_string(),
            monthly_budget: 1000.0,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "a@b.com");
    }
}

//! Account workflows: registration, login and demo seeding
//!
//! Every new account starts with three starter expenses and a freshly
//! generated past-month data set so the analytics pages have something to show.

use std::sync::LazyLock;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Days, NaiveDate};
use rand::RngCore;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::generator::generate_past_month_data;
use crate::models::{new_id, today, Category, Expense, Session, User};
use crate::store::Store;

/// Budget used when a registration does not name one
pub const DEFAULT_MONTHLY_BUDGET: f64 = 30000.0;

pub const DEMO_USER_ID: &str = "demo_user";
pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "demo123";
const DEMO_NAME: &str = "Demo User";
const DEMO_BUDGET: f64 = 60000.0;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex"));

/// Registration request
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub budget: Option<f64>,
}

/// Hash a password into an Argon2id PHC string
pub fn hash_password(password: &str) -> Result<String> {
    let mut salt_bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt_bytes);

    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| Error::PasswordHash(format!("Failed to create salt: {}", e)))?;

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::PasswordHash(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Check a password against a stored PHC string
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!(error = %e, "Stored password hash is malformed");
            false
        }
    }
}

fn validate_email(email: &str) -> Result<()> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(Error::InvalidData(format!("Invalid email address: {}", email)))
    }
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::InvalidData(format!("Missing required field: {}", field)))
}

/// The three expenses every new account starts with
pub fn starter_expenses(today: NaiveDate) -> Vec<Expense> {
    let days_back = |n: u64| today.checked_sub_days(Days::new(n)).unwrap_or(today);

    vec![
        Expense::new(
            "Grocery Shopping",
            2500.0,
            Category::FoodDining,
            today,
            "Weekly groceries from supermarket",
        ),
        Expense::new(
            "Metro Card Recharge",
            500.0,
            Category::Transportation,
            days_back(1),
            "Monthly metro pass",
        ),
        Expense::new(
            "Movie Tickets",
            800.0,
            Category::Entertainment,
            days_back(2),
            "Weekend movie with friends",
        ),
    ]
}

fn provision(store: &dyn Store, user: &User) -> Result<()> {
    for expense in starter_expenses(today()) {
        store.add_expense(&user.id, expense)?;
    }
    store.put_past_month(&user.id, generate_past_month_data(&user.id))?;
    Ok(())
}

/// Create an account, seed its data and open a session
pub fn register(
    store: &dyn Store,
    registration: Registration,
    default_budget: f64,
) -> Result<(User, Session)> {
    let email = required(registration.email, "email")?;
    let password = registration
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| Error::InvalidData("Missing required field: password".to_string()))?;
    let name = required(registration.name, "name")?;
    let budget = registration.budget.unwrap_or(default_budget);

    validate_email(&email)?;
    if !budget.is_finite() || budget <= 0.0 {
        return Err(Error::InvalidData(
            "Budget must be greater than 0".to_string(),
        ));
    }
    if store.get_user_by_email(&email)?.is_some() {
        return Err(Error::Conflict("Email already exists".to_string()));
    }

    let user = User {
        id: new_id(),
        email,
        password_hash: hash_password(&password)?,
        name,
        monthly_budget: budget,
    };
    store.insert_user(user.clone())?;
    provision(store, &user)?;

    let session = store.create_session(&user)?;
    info!(user_id = %user.id, "Registered new user");
    Ok((user, session))
}

/// Verify credentials and open a session
///
/// Makes sure past-month data exists for the user before returning.
pub fn login(store: &dyn Store, email: &str, password: &str) -> Result<(User, Session)> {
    let user = store
        .get_user_by_email(email)?
        .filter(|u| verify_password(password, &u.password_hash))
        .ok_or_else(|| Error::Auth("Invalid credentials".to_string()))?;

    ensure_past_month(store, &user.id)?;

    let session = store.create_session(&user)?;
    debug!(user_id = %user.id, "User logged in");
    Ok((user, session))
}

/// Look up the account behind a session
pub fn current_user(store: &dyn Store, user_id: &str) -> Result<User> {
    store
        .get_user(user_id)?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))
}

/// Return the cached past-month data, generating it on first use
pub fn ensure_past_month(store: &dyn Store, user_id: &str) -> Result<Vec<Expense>> {
    if let Some(existing) = store.past_month(user_id)? {
        return Ok(existing);
    }
    regenerate_past_month(store, user_id)
}

/// Replace the cached past-month data with a new random set
pub fn regenerate_past_month(store: &dyn Store, user_id: &str) -> Result<Vec<Expense>> {
    let expenses = generate_past_month_data(user_id);
    store.put_past_month(user_id, expenses.clone())?;
    debug!(user_id, count = expenses.len(), "Stored past-month data");
    Ok(expenses)
}

/// Create the demo account if it does not exist yet
pub fn seed_demo_user(store: &dyn Store) -> Result<User> {
    if let Some(existing) = store.get_user(DEMO_USER_ID)? {
        return Ok(existing);
    }

    let user = User {
        id: DEMO_USER_ID.to_string(),
        email: DEMO_EMAIL.to_string(),
        password_hash: hash_password(DEMO_PASSWORD)?,
        name: DEMO_NAME.to_string(),
        monthly_budget: DEMO_BUDGET,
    };
    store.insert_user(user.clone())?;
    provision(store, &user)?;

    info!(email = DEMO_EMAIL, "Seeded demo account");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ExpenseStore, MemoryStore, SessionStore, UserStore};

    fn registration(email: &str) -> Registration {
        Registration {
            email: Some(email.to_string()),
            password: Some("hunter22".to_string()),
            name: Some("Alice".to_string()),
            budget: None,
        }
    }

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("s3cret").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s3cret", &hash));
        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("s3cret", "not-a-hash"));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("a.b+c@mail.example.org").is_ok());
        for bad in ["alice", "alice@", "@example.com", "alice@example", "a b@example.com"] {
            let err = validate_email(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidData(_)), "{}", bad);
        }
    }

    #[test]
    fn test_register_provisions_account() {
        let store = MemoryStore::new();
        let (user, session) =
            register(&store, registration("alice@example.com"), DEFAULT_MONTHLY_BUDGET).unwrap();

        assert_eq!(user.monthly_budget, 30000.0);
        assert_eq!(session.user_id, user.id);
        assert_ne!(user.password_hash, "hunter22");

        let expenses = store.list_expenses(&user.id).unwrap();
        assert_eq!(expenses.len(), 3);
        assert_eq!(expenses[0].title, "Grocery Shopping");
        assert_eq!(expenses[0].amount, 2500.0);

        let past = store.past_month(&user.id).unwrap().unwrap();
        assert!(!past.is_empty());
        assert!(store.get_session(&session.token).unwrap().is_some());
    }

    #[test]
    fn test_register_validation() {
        let store = MemoryStore::new();

        let err = register(&store, registration("not-an-email"), 30000.0).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));

        let mut no_name = registration("bob@example.com");
        no_name.name = Some("  ".to_string());
        let err = register(&store, no_name, 30000.0).unwrap_err();
        assert!(err.to_string().contains("name"));

        let mut negative = registration("bob@example.com");
        negative.budget = Some(-1.0);
        let err = register(&store, negative, 30000.0).unwrap_err();
        assert!(err.to_string().contains("Budget"));

        register(&store, registration("bob@example.com"), 30000.0).unwrap();
        let err = register(&store, registration("BOB@example.com"), 30000.0).unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[test]
    fn test_login() {
        let store = MemoryStore::new();
        let (user, _) = register(&store, registration("alice@example.com"), 30000.0).unwrap();

        let (logged_in, session) = login(&store, "alice@example.com", "hunter22").unwrap();
        assert_eq!(logged_in.id, user.id);
        assert_eq!(session.user_name, "Alice");

        let err = login(&store, "alice@example.com", "nope").unwrap_err();
        assert!(matches!(err, Error::Auth(_)));
        let err = login(&store, "ghost@example.com", "hunter22").unwrap_err();
        assert!(matches!(err, Error::Auth(_)));
    }

    #[test]
    fn test_current_user() {
        let store = MemoryStore::new();
        let (user, _) = register(&store, registration("alice@example.com"), 30000.0).unwrap();

        assert_eq!(current_user(&store, &user.id).unwrap().email, "alice@example.com");

        let err = current_user(&store, "ghost").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(err.to_string(), "Not found: User not found");
    }

    #[test]
    fn test_login_generates_missing_past_month() {
        let store = MemoryStore::new();
        let user = User {
            id: "u1".to_string(),
            email: "carol@example.com".to_string(),
            password_hash: hash_password("pw").unwrap(),
            name: "Carol".to_string(),
            monthly_budget: 1000.0,
        };
        store.insert_user(user).unwrap();
        assert!(store.past_month("u1").unwrap().is_none());

        login(&store, "carol@example.com", "pw").unwrap();
        assert!(store.past_month("u1").unwrap().is_some());
    }

    #[test]
    fn test_ensure_past_month_keeps_cache() {
        let store = MemoryStore::new();
        let first = ensure_past_month(&store, "u1").unwrap();
        let second = ensure_past_month(&store, "u1").unwrap();
        let first_ids: Vec<&str> = first.iter().map(|e| e.id.as_str()).collect();
        let second_ids: Vec<&str> = second.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(first_ids, second_ids);

        let regenerated = regenerate_past_month(&store, "u1").unwrap();
        let stored = store.past_month("u1").unwrap().unwrap();
        assert_eq!(regenerated, stored);
    }

    #[test]
    fn test_seed_demo_user_is_idempotent() {
        let store = MemoryStore::new();
        let demo = seed_demo_user(&store).unwrap();
        assert_eq!(demo.id, DEMO_USER_ID);
        assert_eq!(demo.monthly_budget, 60000.0);

        seed_demo_user(&store).unwrap();
        assert_eq!(store.list_expenses(DEMO_USER_ID).unwrap().len(), 3);

        let (user, _) = login(&store, DEMO_EMAIL, DEMO_PASSWORD).unwrap();
        assert_eq!(user.name, "Demo User");
    }

    #[test]
    fn test_starter_expense_dates() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let expenses = starter_expenses(today);
        assert_eq!(expenses[0].date, today);
        assert_eq!(expenses[1].date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(expenses[2].date, NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
    }
}

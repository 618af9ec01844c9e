//! Store tests

use super::*;
use crate::models::{Category, SESSION_TTL_HOURS};
use chrono::{Duration, NaiveDate, Utc};

fn test_user(id: &str, email: &str) -> User {
    User {
        id: id.to_string(),
        email: email.to_string(),
        password_hash: "hash".to_string(),
        name: format!("User {}", id),
        monthly_budget: 30000.0,
    }
}

fn test_expense(title: &str, amount: f64) -> Expense {
    Expense::new(
        title,
        amount,
        Category::FoodDining,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        "",
    )
}

// ========== User Tests ==========

#[test]
fn test_insert_and_get_user() {
    let store = MemoryStore::new();
    store.insert_user(test_user("u1", "Alice@Example.com")).unwrap();

    let by_id = store.get_user("u1").unwrap().unwrap();
    assert_eq!(by_id.email, "Alice@Example.com");

    let by_email = store.get_user_by_email("alice@example.com").unwrap().unwrap();
    assert_eq!(by_email.id, "u1");

    let padded = store.get_user_by_email("  ALICE@example.com ").unwrap();
    assert!(padded.is_some());

    assert!(store.get_user("missing").unwrap().is_none());
    assert!(store.get_user_by_email("bob@example.com").unwrap().is_none());
}

#[test]
fn test_duplicate_email_conflicts() {
    let store = MemoryStore::new();
    store.insert_user(test_user("u1", "alice@example.com")).unwrap();

    let err = store
        .insert_user(test_user("u2", "ALICE@example.com"))
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
    assert!(store.get_user("u2").unwrap().is_none());
}

#[test]
fn test_duplicate_id_conflicts() {
    let store = MemoryStore::new();
    store.insert_user(test_user("u1", "alice@example.com")).unwrap();

    let err = store.insert_user(test_user("u1", "bob@example.com")).unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
    assert!(store.get_user_by_email("bob@example.com").unwrap().is_none());
}

// ========== Expense Tests ==========

#[test]
fn test_expenses_are_per_user() {
    let store = MemoryStore::new();
    store.add_expense("u1", test_expense("Lunch", 200.0)).unwrap();
    store.add_expense("u1", test_expense("Dinner", 400.0)).unwrap();
    store.add_expense("u2", test_expense("Coffee", 50.0)).unwrap();

    let u1 = store.list_expenses("u1").unwrap();
    assert_eq!(u1.len(), 2);
    assert_eq!(u1[0].title, "Lunch");
    assert_eq!(u1[1].title, "Dinner");

    assert_eq!(store.list_expenses("u2").unwrap().len(), 1);
    assert!(store.list_expenses("nobody").unwrap().is_empty());
}

#[test]
fn test_delete_expense() {
    let store = MemoryStore::new();
    let expense = test_expense("Lunch", 200.0);
    let id = expense.id.clone();
    store.add_expense("u1", expense).unwrap();
    store.add_expense("u1", test_expense("Dinner", 400.0)).unwrap();

    assert!(store.delete_expense("u1", &id).unwrap());
    assert!(!store.delete_expense("u1", &id).unwrap());
    assert!(!store.delete_expense("u2", &id).unwrap());

    let remaining = store.list_expenses("u1").unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "Dinner");
}

#[test]
fn test_past_month_replace() {
    let store = MemoryStore::new();
    assert!(store.past_month("u1").unwrap().is_none());

    store
        .put_past_month("u1", vec![test_expense("A", 1.0), test_expense("B", 2.0)])
        .unwrap();
    assert_eq!(store.past_month("u1").unwrap().unwrap().len(), 2);

    store.put_past_month("u1", vec![test_expense("C", 3.0)]).unwrap();
    let data = store.past_month("u1").unwrap().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].title, "C");

    store.put_past_month("u1", vec![]).unwrap();
    assert_eq!(store.past_month("u1").unwrap(), Some(vec![]));
}

// ========== Session Tests ==========

#[test]
fn test_session_lifecycle() {
    let store = MemoryStore::new();
    let user = test_user("u1", "alice@example.com");

    let session = store.create_session(&user).unwrap();
    assert_eq!(session.user_id, "u1");
    assert_eq!(session.user_name, "User u1");
    assert!(!session.token.is_empty());

    let found = store.get_session(&session.token).unwrap().unwrap();
    assert_eq!(found.user_id, "u1");

    assert!(store.delete_session(&session.token).unwrap());
    assert!(store.get_session(&session.token).unwrap().is_none());
    assert!(!store.delete_session(&session.token).unwrap());
}

#[test]
fn test_sessions_are_distinct() {
    let store = MemoryStore::new();
    let user = test_user("u1", "alice@example.com");

    let a = store.create_session(&user).unwrap();
    let b = store.create_session(&user).unwrap();
    assert_ne!(a.token, b.token);

    store.delete_session(&a.token).unwrap();
    assert!(store.get_session(&b.token).unwrap().is_some());
}

#[test]
fn test_expired_sessions_rejected_and_pruned() {
    let store = MemoryStore::new();
    let user = test_user("u1", "alice@example.com");

    let mut stale = store.create_session(&user).unwrap();
    stale.created_at = Utc::now() - Duration::hours(SESSION_TTL_HOURS + 1);
    store
        .inner
        .sessions
        .write()
        .unwrap()
        .insert(stale.token.clone(), stale.clone());

    assert!(store.get_session(&stale.token).unwrap().is_none());

    let fresh = store.create_session(&user).unwrap();
    let sessions = store.inner.sessions.read().unwrap();
    assert!(!sessions.contains_key(&stale.token));
    assert!(sessions.contains_key(&fresh.token));
    assert_eq!(sessions.len(), 1);
}

#[test]
fn test_clones_share_state() {
    let store = MemoryStore::new();
    let clone = store.clone();
    clone.add_expense("u1", test_expense("Lunch", 200.0)).unwrap();
    assert_eq!(store.list_expenses("u1").unwrap().len(), 1);

    let shared: Arc<dyn Store> = Arc::new(store);
    assert_eq!(shared.list_expenses("u1").unwrap().len(), 1);
}

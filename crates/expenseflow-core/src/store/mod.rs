//! Storage abstraction with an in-memory implementation
//!
//! The store is split by domain:
//! - `users` - Registered accounts, looked up by id or email
//! - `expenses` - Live expenses and cached past-month data per user
//! - `sessions` - Browser sessions keyed by token
//!
//! Nothing here survives a restart. Callers hold the store as `Arc<dyn Store>`
//! so another backend can be swapped in without touching the handlers.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Error, Result};
use crate::models::{Expense, Session, User};

mod expenses;
mod sessions;
mod users;

/// Account storage
pub trait UserStore: Send + Sync {
    /// Insert a new user; fails with `Conflict` if the email is taken
    fn insert_user(&self, user: User) -> Result<()>;

    fn get_user(&self, user_id: &str) -> Result<Option<User>>;

    /// Case-insensitive email lookup
    fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
}

/// Expense storage, keyed by user id
pub trait ExpenseStore: Send + Sync {
    fn list_expenses(&self, user_id: &str) -> Result<Vec<Expense>>;

    fn add_expense(&self, user_id: &str, expense: Expense) -> Result<()>;

    /// Remove an expense by id, returning whether anything was removed
    fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<bool>;

    /// Cached synthetic past-month data, if any was generated
    fn past_month(&self, user_id: &str) -> Result<Option<Vec<Expense>>>;

    /// Replace the cached past-month data wholesale
    fn put_past_month(&self, user_id: &str, expenses: Vec<Expense>) -> Result<()>;
}

/// Session storage, keyed by opaque token
pub trait SessionStore: Send + Sync {
    fn create_session(&self, user: &User) -> Result<Session>;

    fn get_session(&self, token: &str) -> Result<Option<Session>>;

    /// Drop a session, returning whether it existed
    fn delete_session(&self, token: &str) -> Result<bool>;
}

/// Everything the application needs from a backend
pub trait Store: UserStore + ExpenseStore + SessionStore {}

impl<T: UserStore + ExpenseStore + SessionStore> Store for T {}

#[derive(Default)]
struct Users {
    by_id: HashMap<String, User>,
    /// Lowercased email -> user id
    id_by_email: HashMap<String, String>,
}

#[derive(Default)]
struct Inner {
    users: RwLock<Users>,
    expenses: RwLock<HashMap<String, Vec<Expense>>>,
    past_month: RwLock<HashMap<String, Vec<Expense>>>,
    sessions: RwLock<HashMap<String, Session>>,
}

/// Process-local store backed by hash maps
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn read<'a, T>(lock: &'a RwLock<T>, what: &str) -> Result<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| Error::Store(format!("{} lock poisoned", what)))
}

fn write<'a, T>(lock: &'a RwLock<T>, what: &str) -> Result<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| Error::Store(format!("{} lock poisoned", what)))
}

#[cfg(test)]
mod tests;

//! User account operations

use super::{read, write, MemoryStore, UserStore};
use crate::error::{Error, Result};
use crate::models::User;

impl UserStore for MemoryStore {
    fn insert_user(&self, user: User) -> Result<()> {
        let mut users = write(&self.inner.users, "users")?;
        let email_key = user.email.trim().to_lowercase();

        if users.id_by_email.contains_key(&email_key) {
            return Err(Error::Conflict("Email already exists".to_string()));
        }
        if users.by_id.contains_key(&user.id) {
            return Err(Error::Conflict(format!("User id {} already exists", user.id)));
        }

        users.id_by_email.insert(email_key, user.id.clone());
        users.by_id.insert(user.id.clone(), user);
        Ok(())
    }

    fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let users = read(&self.inner.users, "users")?;
        Ok(users.by_id.get(user_id).cloned())
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = read(&self.inner.users, "users")?;
        Ok(users
            .id_by_email
            .get(&email.trim().to_lowercase())
            .and_then(|id| users.by_id.get(id))
            .cloned())
    }
}

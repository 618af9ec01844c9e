//! Expense and past-month data operations

use super::{read, write, ExpenseStore, MemoryStore};
use crate::error::Result;
use crate::models::Expense;

impl ExpenseStore for MemoryStore {
    fn list_expenses(&self, user_id: &str) -> Result<Vec<Expense>> {
        let expenses = read(&self.inner.expenses, "expenses")?;
        Ok(expenses.get(user_id).cloned().unwrap_or_default())
    }

    fn add_expense(&self, user_id: &str, expense: Expense) -> Result<()> {
        let mut expenses = write(&self.inner.expenses, "expenses")?;
        expenses
            .entry(user_id.to_string())
            .or_default()
            .push(expense);
        Ok(())
    }

    fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<bool> {
        let mut expenses = write(&self.inner.expenses, "expenses")?;
        let Some(list) = expenses.get_mut(user_id) else {
            return Ok(false);
        };
        let before = list.len();
        list.retain(|e| e.id != expense_id);
        Ok(list.len() != before)
    }

    fn past_month(&self, user_id: &str) -> Result<Option<Vec<Expense>>> {
        let past_month = read(&self.inner.past_month, "past_month")?;
        Ok(past_month.get(user_id).cloned())
    }

    fn put_past_month(&self, user_id: &str, expenses: Vec<Expense>) -> Result<()> {
        let mut past_month = write(&self.inner.past_month, "past_month")?;
        past_month.insert(user_id.to_string(), expenses);
        Ok(())
    }
}

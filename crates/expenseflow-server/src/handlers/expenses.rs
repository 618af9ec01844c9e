//! Expense handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use tracing::{debug, info};

use expenseflow_core::models::today;
use expenseflow_core::{Expense, ExpenseInput, Session};

use crate::{AppError, AppState, SuccessResponse};

/// GET /api/expenses - List the user's expenses
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Json<Vec<Expense>>, AppError> {
    let expenses = state.store.list_expenses(&session.user_id)?;
    Ok(Json(expenses))
}

/// POST /api/expenses - Record a new expense
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    body: Option<Json<ExpenseInput>>,
) -> Result<Json<Expense>, AppError> {
    let Json(input) = body.ok_or_else(|| AppError::bad_request("No data provided"))?;

    let expense = input.into_expense(today()).map_err(AppError::from_core)?;
    state.store.add_expense(&session.user_id, expense.clone())?;

    info!(
        user_id = %session.user_id,
        category = %expense.category,
        amount = expense.amount,
        "Expense added"
    );

    Ok(Json(expense))
}

/// DELETE /api/expenses/:id - Remove an expense (no-op when it does not exist)
pub async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    let removed = state.store.delete_expense(&session.user_id, &id)?;
    debug!(user_id = %session.user_id, expense_id = %id, removed, "Delete expense");

    Ok(Json(SuccessResponse { success: true }))
}

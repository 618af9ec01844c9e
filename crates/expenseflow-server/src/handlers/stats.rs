//! Budget statistics handler

use std::sync::Arc;

use axum::{extract::State, Extension, Json};

use expenseflow_core::accounts;
use expenseflow_core::{compute_budget_stats, BudgetStats, Session};

use crate::{AppError, AppState};

/// GET /api/stats - Live expenses measured against the user's monthly budget
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Json<BudgetStats>, AppError> {
    let user =
        accounts::current_user(state.store.as_ref(), &session.user_id).map_err(AppError::from_core)?;

    let expenses = state.store.list_expenses(&user.id)?;

    Ok(Json(compute_budget_stats(&expenses, user.monthly_budget)))
}

//! Past-month data and analytics handlers

use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use tracing::info;

use expenseflow_core::accounts;
use expenseflow_core::{compute_analytics_summary, AnalyticsSummary, Expense, Session};

use crate::{AppError, AppState};

/// GET /api/past-month-data - The cached synthetic past-month expenses
pub async fn get_past_month_data(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Json<Vec<Expense>>, AppError> {
    let expenses = state
        .store
        .past_month(&session.user_id)?
        .unwrap_or_default();

    Ok(Json(expenses))
}

/// POST /api/past-month-data/regenerate - Replace the synthetic data with a new set
pub async fn regenerate_past_month_data(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Json<Vec<Expense>>, AppError> {
    let expenses = accounts::regenerate_past_month(state.store.as_ref(), &session.user_id)
        .map_err(AppError::from_core)?;

    info!(user_id = %session.user_id, count = expenses.len(), "Regenerated past-month data");

    Ok(Json(expenses))
}

/// GET /api/analytics-summary - Spending analysis of the synthetic past month
pub async fn get_analytics_summary(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Json<AnalyticsSummary>, AppError> {
    let expenses = state
        .store
        .past_month(&session.user_id)?
        .unwrap_or_default();

    Ok(Json(compute_analytics_summary(&expenses)))
}

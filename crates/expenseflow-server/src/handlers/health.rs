//! Health check and reference data handlers

use axum::Json;
use serde::Serialize;

use expenseflow_core::Category;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// GET /health - Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        message: "ExpenseFlow is running",
    })
}

/// GET /api/categories - The fixed category labels in display order
pub async fn list_categories() -> Json<Vec<Category>> {
    Json(Category::ALL.to_vec())
}

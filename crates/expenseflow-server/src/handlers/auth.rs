//! Authentication handlers: login, registration, logout and the current user

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use expenseflow_core::accounts::{self, Registration};
use expenseflow_core::{Error, Session, User};

use crate::{clear_session_cookie, session_cookie, session_token, AppError, AppState, SuccessResponse};

/// Response body for login and registration
#[derive(Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl AuthResponse {
    fn failure(status: StatusCode, message: &str) -> Response {
        let body = Self {
            success: false,
            message: message.to_string(),
            user: None,
        };
        (status, Json(body)).into_response()
    }
}

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

fn signed_in(state: &AppState, user: User, session: Session, message: &str) -> Response {
    let cookie = session_cookie(&session.token, state.config.secure_cookies);
    let body = AuthResponse {
        success: true,
        message: message.to_string(),
        user: Some(user),
    };
    ([(header::SET_COOKIE, cookie)], Json(body)).into_response()
}

/// POST /api/login - Verify credentials and start a session
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, AppError> {
    let store = state.store.clone();
    let email = req.email.trim().to_string();

    // Argon2 verification is CPU bound
    let result =
        tokio::task::spawn_blocking(move || accounts::login(store.as_ref(), &email, &req.password))
            .await?;

    match result {
        Ok((user, session)) => {
            info!(user_id = %user.id, "Login successful");
            Ok(signed_in(&state, user, session, "Login successful"))
        }
        Err(Error::Auth(msg)) => {
            warn!("Failed login attempt");
            Ok(AuthResponse::failure(StatusCode::UNAUTHORIZED, &msg))
        }
        Err(e) => Err(AppError::from_core(e)),
    }
}

/// POST /api/register - Create an account and start a session
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<Registration>,
) -> Result<Response, AppError> {
    let store = state.store.clone();
    let default_budget = state.config.default_budget;

    let result = tokio::task::spawn_blocking(move || {
        accounts::register(store.as_ref(), req, default_budget)
    })
    .await?;

    match result {
        Ok((user, session)) => Ok(signed_in(&state, user, session, "Registration successful")),
        Err(Error::InvalidData(msg)) | Err(Error::Conflict(msg)) => {
            Ok(AuthResponse::failure(StatusCode::BAD_REQUEST, &msg))
        }
        Err(e) => Err(AppError::from_core(e)),
    }
}

/// POST /api/logout - End the current session, if any
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    if let Some(token) = session_token(&headers) {
        if state.store.delete_session(&token)? {
            info!("Session ended");
        }
    }

    let cookie = clear_session_cookie(state.config.secure_cookies);
    Ok(([(header::SET_COOKIE, cookie)], Json(SuccessResponse { success: true })).into_response())
}

/// GET /api/me - The signed-in user
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Json<User>, AppError> {
    let user =
        accounts::current_user(state.store.as_ref(), &session.user_id).map_err(AppError::from_core)?;

    Ok(Json(user))
}

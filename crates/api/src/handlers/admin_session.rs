//! Admin login and logout.
//!
//! Login exchanges the shared `ADMIN_SECRET` for an HTTP-only cookie that
//! [`AdminSession`](crate::middleware::admin::AdminSession) checks on every
//! admin request.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use armory_core::error::CoreError;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::admin::{cleared_cookie, secrets_match, session_cookie};
use crate::response::DataResponse;
use crate::state::AppState;

/// Where the admin lands after logging in when no `next` is given.
pub const DEFAULT_NEXT: &str = "/admin";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub secret: String,
    pub next: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub next: String,
}

// ---------------------------------------------------------------------------
// POST /admin/login
// ---------------------------------------------------------------------------

/// Check the submitted secret and set the admin cookie.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let expected = state
        .config
        .admin_secret
        .as_deref()
        .ok_or_else(|| AppError::InternalError("ADMIN_SECRET is not configured".into()))?;

    if !secrets_match(&input.secret, expected) {
        tracing::warn!("Rejected admin login");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid admin secret".into(),
        )));
    }

    let next = input
        .next
        .as_deref()
        .map(str::trim)
        .filter(|n| n.starts_with('/'))
        .unwrap_or(DEFAULT_NEXT)
        .to_string();

    tracing::info!(next = %next, "Admin logged in");

    Ok((
        [(SET_COOKIE, session_cookie(expected, &state.config))],
        Json(DataResponse {
            data: LoginResponse { next },
        }),
    ))
}

// ---------------------------------------------------------------------------
// POST /admin/logout
// ---------------------------------------------------------------------------

/// Clear the admin cookie.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, cleared_cookie(&state.config))],
    )
}

//! HTTP request handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::Uri,
    Extension, Json,
};

use crate::api::types::*;
use crate::auth::AuthenticatedUser;
use crate::error::{AppError, AppResult};
use crate::AppState;

/// Health check endpoint.
///
/// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ==================== Authentication Endpoints ====================

/// Login to obtain a bearer token.
///
/// POST /api/auth/login (also served at /auth/login)
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Email or password missing", body = crate::error::ErrorResponse),
        (status = 401, description = "Wrong email or password", body = crate::error::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let email = request.email.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    let issued = state.verifier.issue(&email, &password).map_err(|e| {
        if matches!(e, AppError::Unauthorized(_)) {
            tracing::warn!(email = %email, "Failed login attempt");
        }
        e
    })?;

    tracing::info!(
        email = %issued.subject,
        expires_at = %issued.expires_at,
        "Administrator logged in"
    );

    Ok(Json(LoginResponse {
        message: "login successful".to_string(),
        token: issued.token,
        user: UserInfo {
            email: issued.subject,
        },
        expires_in: state.verifier.token_ttl_secs(),
    }))
}

/// Confirm a stored token is still valid.
///
/// GET /api/auth/me (also served at /auth/me)
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Token is valid", body = MeResponse),
        (status = 401, description = "Missing, invalid or expired token", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn get_current_user(Extension(user): Extension<AuthenticatedUser>) -> Json<MeResponse> {
    Json(MeResponse {
        message: "token is valid".to_string(),
        user: UserInfo { email: user.email },
    })
}

/// JSON 404 for unmatched API paths.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}

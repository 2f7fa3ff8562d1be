//! Authentication middleware for axum.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::auth::{CredentialVerifier, InvalidReason};
use crate::error::ErrorResponse;

/// Identity attached to the request once the bearer token checks out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub email: String,
}

/// Authentication failure returned before the protected handler runs.
#[derive(Debug)]
pub struct AuthError {
    reason: InvalidReason,
}

impl From<InvalidReason> for AuthError {
    fn from(reason: InvalidReason) -> Self {
        Self { reason }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = match self.reason {
            InvalidReason::Missing => ErrorResponse::new("missing token", "MISSING_TOKEN"),
            _ => ErrorResponse::new("invalid or expired token", "INVALID_TOKEN"),
        };
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

/// Extract and validate the bearer token from the request.
///
/// Expects `Authorization: Bearer <token>` header.
pub async fn require_jwt(
    State(verifier): State<CredentialVerifier>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let email = verifier.verify(authorization).map_err(|reason| {
        tracing::debug!(reason = %reason, path = %request.uri().path(), "Rejected request");
        AuthError::from(reason)
    })?;

    request.extensions_mut().insert(AuthenticatedUser { email });

    Ok(next.run(request).await)
}

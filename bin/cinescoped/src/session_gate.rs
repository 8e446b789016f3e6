//! Session gate — bearer-token authentication middleware.
//!
//! Extracts the JWT from `Authorization: Bearer <token>`, verifies it
//! through the auth service, and injects [`Identity`] into request
//! extensions for downstream handlers. Everything except the public
//! paths (health, version, register, login) requires a valid token.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use auth::service::AuthService;
use cinescope_core::Identity;

/// Authentication failures at the gate. Both map to 401: a missing
/// token and a bad/expired one are the same session-invalidation
/// signal from the client's point of view.
#[derive(Debug)]
pub enum GateError {
    MissingToken,
    InvalidToken(String),
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let msg = match self {
            GateError::MissingToken => "missing authorization token".to_string(),
            GateError::InvalidToken(e) => e,
        };
        let body = serde_json::json!({ "success": false, "message": msg });
        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

/// Middleware that authenticates every non-public request.
///
/// Handlers downstream take the caller from the injected Identity and
/// never from ids in the request body.
pub async fn gate(
    State(svc): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, GateError> {
    let path = request.uri().path().to_string();

    if is_public_path(&path) {
        return Ok(next.run(request).await);
    }

    let token = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(GateError::MissingToken)?;

    let claims = svc
        .verify_token(token)
        .map_err(|e| GateError::InvalidToken(e.to_string()))?;

    request.extensions_mut().insert(Identity {
        user_id: claims.sub,
        username: claims.username,
    });

    Ok(next.run(request).await)
}

/// Check if a request path is public (no auth required).
fn is_public_path(path: &str) -> bool {
    matches!(
        path,
        "/health" | "/version" | "/auth/register" | "/auth/login"
    )
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};

use cinescope_core::ServiceError;

use crate::api::AppState;
use crate::model::{LoginRequest, RegisterRequest};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// POST /auth/register — create an account, return its first token.
async fn register(
    State(svc): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    let (user, token) = svc.register(&req).map_err(ServiceError::from)?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "token": token,
            "user": user.to_public(),
        })),
    ))
}

/// POST /auth/login — verify credentials, return a fresh token.
async fn login(
    State(svc): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let (user, token) = svc.login(&req).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "success": true,
        "token": token,
        "user": user.to_public(),
    })))
}

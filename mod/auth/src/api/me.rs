use axum::extract::{Extension, State};
use axum::routing::get;
use axum::{Json, Router};

use cinescope_core::{Identity, ServiceError};

use crate::api::AppState;
use crate::service::AuthError;

pub fn routes() -> Router<AppState> {
    Router::new().route("/me", get(me))
}

/// GET /auth/me — current user, resolved from the gate's Identity.
///
/// A valid token whose user has vanished is a dead session, so the
/// lookup miss surfaces as 401 rather than 404.
async fn me(
    State(svc): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let user = svc
        .get_user(&identity.user_id)
        .map_err(|e| match e {
            AuthError::NotFound(_) => AuthError::Unauthorized("Invalid credentials".into()),
            other => other,
        })
        .map_err(ServiceError::from)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "user": user.to_public(),
    })))
}

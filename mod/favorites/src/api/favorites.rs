use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use cinescope_core::{Identity, ServiceError};

use crate::api::AppState;
use crate::model::AddFavoriteRequest;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_favorites).post(add_favorite))
        .route("/{id}", axum::routing::delete(remove_favorite))
        .route("/check/{tmdb_id}", get(check_favorite))
}

// ---------------------------------------------------------------------------
// GET /favorites
// ---------------------------------------------------------------------------

async fn list_favorites(
    State(svc): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let favorites = svc.list(&identity.user_id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "success": true,
        "data": favorites,
    })))
}

// ---------------------------------------------------------------------------
// POST /favorites
// ---------------------------------------------------------------------------

async fn add_favorite(
    State(svc): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<AddFavoriteRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    let favorite = svc
        .add(&identity.user_id, &req)
        .map_err(ServiceError::from)?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "data": favorite,
        })),
    ))
}

// ---------------------------------------------------------------------------
// DELETE /favorites/:id
// ---------------------------------------------------------------------------

async fn remove_favorite(
    State(svc): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.remove(&identity.user_id, &id)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Favorite removed",
    })))
}

// ---------------------------------------------------------------------------
// GET /favorites/check/:tmdb_id
// ---------------------------------------------------------------------------

/// Membership probe. A malformed id segment still answers false rather
/// than 400, keeping the never-errors contract.
async fn check_favorite(
    State(svc): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(tmdb_id): Path<String>,
) -> Json<serde_json::Value> {
    let is_favorite = match tmdb_id.parse::<i64>() {
        Ok(id) => svc.check(&identity.user_id, id),
        Err(_) => false,
    };
    Json(serde_json::json!({
        "success": true,
        "isFavorite": is_favorite,
    }))
}

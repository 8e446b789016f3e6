mod favorites;

use std::sync::Arc;

use axum::Router;

use crate::service::FavoritesService;

/// Shared application state.
pub type AppState = Arc<FavoritesService>;

/// Build the favorites API router.
///
/// Routes (all bearer-protected by the server's session gate):
/// - `GET    /`                 — list the caller's favorites
/// - `POST   /`                 — save a favorite
/// - `DELETE /{id}`             — remove by record id (idempotent)
/// - `GET    /check/{tmdb_id}`  — membership probe, never errors
///
/// All routes are relative — the caller nests them under `/favorites`.
pub fn build_router(svc: Arc<FavoritesService>) -> Router {
    Router::new()
        .merge(favorites::routes())
        .with_state(svc)
}

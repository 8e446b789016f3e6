mod me;
mod sessions;

use std::sync::Arc;

use axum::Router;

use crate::service::AuthService;

/// Shared application state.
pub type AppState = Arc<AuthService>;

/// Build the auth API router.
///
/// Routes:
/// - `POST /register` — create account, returns token (public)
/// - `POST /login`    — verify credentials, returns token (public)
/// - `GET  /me`       — current user (bearer required)
///
/// All routes are relative — the caller nests them under `/auth` and
/// layers the session gate, with register/login on its public list.
pub fn build_router(svc: Arc<AuthService>) -> Router {
    Router::new()
        .merge(sessions::routes())
        .merge(me::routes())
        .with_state(svc)
}

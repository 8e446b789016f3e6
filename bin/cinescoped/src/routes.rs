//! Route registration — collects all module routes + system endpoints.

use std::sync::Arc;

use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use auth::service::AuthService;

use crate::session_gate;

/// Build the complete router with all routes.
pub fn build_router(svc: Arc<AuthService>, module_routes: Vec<(&str, Router)>) -> Router {
    // System endpoints (public).
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/version", get(version));

    // Mount each module's routes under /{module_name}.
    // Module routes are already Router<()> (they called .with_state() internally).
    for (name, router) in module_routes {
        app = app.nest(&format!("/{}", name), router);
    }

    // Every request passes the session gate; public paths short-circuit.
    app.layer(middleware::from_fn_with_state(svc, session_gate::gate))
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "cinescoped",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

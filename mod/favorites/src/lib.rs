//! Favorites module — per-user saved catalog items.
//!
//! A favorite is the join of a user and an upstream catalog id, plus a
//! denormalized display snapshot (title, poster, media type, rating,
//! release date) so list views never re-query the catalog. Uniqueness
//! of (user, tmdb_id) and owner-scoped deletes are the two contracts
//! everything here revolves around.
//!
//! # Usage
//!
//! ```ignore
//! use favorites::FavoritesModule;
//!
//! let module = FavoritesModule::new(sql)?;
//! let router = module.routes(); // Mount under /favorites, behind the gate
//! ```

pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use cinescope_core::Module;
use cinescope_sql::SQLStore;

use crate::service::FavoritesService;

/// Favorites module implementing the Module trait.
pub struct FavoritesModule {
    service: Arc<FavoritesService>,
}

impl FavoritesModule {
    /// Create a new FavoritesModule.
    pub fn new(sql: Arc<dyn SQLStore>) -> Result<Self, cinescope_core::ServiceError> {
        let service =
            FavoritesService::new(sql).map_err(cinescope_core::ServiceError::from)?;
        Ok(Self { service })
    }

    /// Get a reference to the underlying FavoritesService.
    pub fn service(&self) -> &Arc<FavoritesService> {
        &self.service
    }
}

impl Module for FavoritesModule {
    fn name(&self) -> &str {
        "favorites"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}

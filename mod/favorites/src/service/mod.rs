pub mod favorite;
pub mod schema;

use std::sync::Arc;

use thiserror::Error;

use cinescope_sql::SQLStore;

/// Favorites service error type.
///
/// There is deliberately no NotFound variant: remove is idempotent and
/// check swallows lookup failures, so a missing record is never an
/// error in this module.
#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Storage(String),

    #[error("{0}")]
    Internal(String),
}

impl From<FavoritesError> for cinescope_core::ServiceError {
    fn from(e: FavoritesError) -> Self {
        match e {
            FavoritesError::Conflict(m) => cinescope_core::ServiceError::Conflict(m),
            FavoritesError::Validation(m) => cinescope_core::ServiceError::Validation(m),
            FavoritesError::Storage(m) => cinescope_core::ServiceError::Storage(m),
            FavoritesError::Internal(m) => cinescope_core::ServiceError::Internal(m),
        }
    }
}

/// The Favorites service. Holds the storage handle.
pub struct FavoritesService {
    pub(crate) sql: Arc<dyn SQLStore>,
}

impl FavoritesService {
    /// Create a new FavoritesService, initializing the DB schema.
    pub fn new(sql: Arc<dyn SQLStore>) -> Result<Arc<Self>, FavoritesError> {
        schema::init_schema(sql.as_ref())?;
        Ok(Arc::new(Self { sql }))
    }
}

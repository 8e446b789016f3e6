//! CineScope client — session state and favorites synchronization.
//!
//! Layered bottom-up:
//!
//! - [`ApiClient`] — typed HTTP driver for the cinescoped API
//! - [`SessionContext`] / [`SessionStore`] — owned session state and
//!   its on-disk persistence
//! - [`ContentPool`] — id-keyed accumulator of catalog payloads
//! - [`FavoriteSync`] — the synchronizer keeping the local favorite
//!   set consistent with the server across toggles

pub mod api;
pub mod error;
pub mod pool;
pub mod session;
pub mod sync;

pub use api::{AddFavorite, ApiClient, AuthSuccess, FavoriteRecord, UserInfo};
pub use error::ApiError;
pub use pool::{CatalogEntry, ContentItem, ContentPool, MediaType};
pub use session::{token_expires_at, AuthSession, FavoriteSet, SessionContext, SessionStore};
pub use sync::{FavoriteSync, ToggleOutcome};

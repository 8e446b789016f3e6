//! Owned session state and its on-disk persistence.
//!
//! [`SessionContext`] is the one place client state lives: who is
//! logged in, which ids they favor, and the pooled catalog payloads.
//! It is owned by the synchronizer and handed around by reference,
//! never ambient.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::{FavoriteRecord, UserInfo};
use crate::error::ApiError;
use crate::pool::ContentPool;

// ── Auth session ──

/// A live authentication: the bearer token and the account it proves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: UserInfo,
}

// ── Favorite set ──

/// The local favorite set, keyed by external content id. Membership
/// and the record-id lookup table are one map so they cannot drift
/// apart.
#[derive(Debug, Default)]
pub struct FavoriteSet {
    records: HashMap<i64, FavoriteRecord>,
}

impl FavoriteSet {
    pub fn contains(&self, tmdb_id: i64) -> bool {
        self.records.contains_key(&tmdb_id)
    }

    /// Server-assigned record id for a favorited item. Removal needs
    /// it, since the delete endpoint is keyed by record id.
    pub fn record_id(&self, tmdb_id: i64) -> Option<String> {
        self.records.get(&tmdb_id).map(|r| r.id.clone())
    }

    pub fn insert(&mut self, record: FavoriteRecord) {
        self.records.insert(record.tmdb_id, record);
    }

    pub fn remove(&mut self, tmdb_id: i64) {
        self.records.remove(&tmdb_id);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Replace the whole set from a server listing.
    pub fn rebuild(&mut self, records: Vec<FavoriteRecord>) {
        self.records = records.into_iter().map(|r| (r.tmdb_id, r)).collect();
    }

    /// Snapshot of the records, order unspecified.
    pub fn records(&self) -> Vec<FavoriteRecord> {
        self.records.values().cloned().collect()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.records.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── Session context ──

/// All client-side session state.
///
/// Constructed empty at app start, or primed from a persisted session
/// via [`SessionStore`]; torn down on logout or a 401. The content
/// pool survives teardown: it holds public catalog data, not user
/// state.
#[derive(Debug, Default)]
pub struct SessionContext {
    pub auth: Option<AuthSession>,
    pub favorites: FavoriteSet,
    pub pool: ContentPool,
}

// ── Persistence ──

/// On-disk persistence for [`AuthSession`] — a small TOML file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default session file: `~/.cinescope/session.toml`.
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".cinescope").join("session.toml")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted session, if one exists and its token has not
    /// already expired. An expired or undecodable token yields `None`;
    /// only file-level failures are errors.
    pub fn load(&self) -> Result<Option<AuthSession>, ApiError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ApiError::Store(e.to_string())),
        };
        let session: AuthSession =
            toml::from_str(&content).map_err(|e| ApiError::Store(e.to_string()))?;

        match token_expires_at(&session.token) {
            Some(exp) if exp > chrono::Utc::now().timestamp() => Ok(Some(session)),
            _ => {
                tracing::debug!("persisted session expired, discarding");
                Ok(None)
            }
        }
    }

    /// Save a session to disk, creating parent directories as needed.
    pub fn save(&self, session: &AuthSession) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ApiError::Store(e.to_string()))?;
        }
        let content =
            toml::to_string_pretty(session).map_err(|e| ApiError::Store(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|e| ApiError::Store(e.to_string()))?;
        Ok(())
    }

    /// Delete the persisted session if present.
    pub fn clear(&self) -> Result<(), ApiError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::Store(e.to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ExpClaims {
    exp: i64,
}

/// Read the expiry out of a token without verifying its signature.
/// The server stays the authority on validity; this only avoids
/// restoring a session that is already dead.
pub fn token_expires_at(token: &str) -> Option<i64> {
    let mut validation = jsonwebtoken::Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    let data = jsonwebtoken::decode::<ExpClaims>(
        token,
        &jsonwebtoken::DecodingKey::from_secret(&[]),
        &validation,
    )
    .ok()?;
    Some(data.claims.exp)
}

//! The favorites synchronizer.
//!
//! Keeps the local favorite set consistent with the server across
//! toggles. The model is pessimistic: the local set changes only after
//! the server has committed a mutation, so a failed call never leaves
//! anything to roll back.

use std::collections::HashSet;
use std::sync::Mutex;

use crate::api::{ApiClient, AuthSuccess, FavoriteRecord, UserInfo};
use crate::error::ApiError;
use crate::pool::{CatalogEntry, ContentItem};
use crate::session::{AuthSession, SessionContext};

// ── Toggle outcome ──

/// What a toggle did.
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    /// The item was not favorited; it is now.
    Added(FavoriteRecord),
    /// The item was favorited; it no longer is.
    Removed,
    /// A toggle for the same id is still pending. Nothing was sent.
    InFlight,
}

// ── In-flight guard ──

/// At most one favorite mutation per content id may be outstanding.
#[derive(Debug, Default)]
struct InflightGuard {
    pending: Mutex<HashSet<i64>>,
}

impl InflightGuard {
    /// Claim an id. Returns a token that releases the claim on drop,
    /// or `None` if a mutation for the id is already pending.
    fn try_begin(&self, tmdb_id: i64) -> Option<InflightToken<'_>> {
        let mut pending = match self.pending.lock() {
            Ok(p) => p,
            Err(e) => e.into_inner(),
        };
        if !pending.insert(tmdb_id) {
            return None;
        }
        Some(InflightToken {
            guard: self,
            tmdb_id,
        })
    }
}

struct InflightToken<'a> {
    guard: &'a InflightGuard,
    tmdb_id: i64,
}

impl Drop for InflightToken<'_> {
    fn drop(&mut self) {
        let mut pending = match self.guard.pending.lock() {
            Ok(p) => p,
            Err(e) => e.into_inner(),
        };
        pending.remove(&self.tmdb_id);
    }
}

// ── Synchronizer ──

/// Client-side favorites synchronizer over one [`ApiClient`].
///
/// All methods take `&self`. State sits behind a mutex held only for
/// local reads and writes, never across a network call.
#[derive(Debug)]
pub struct FavoriteSync {
    api: ApiClient,
    state: Mutex<SessionContext>,
    inflight: InflightGuard,
}

impl FavoriteSync {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Mutex::new(SessionContext::default()),
            inflight: InflightGuard::default(),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    // ── Session lifecycle ──

    /// Create an account and establish its session.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserInfo, ApiError> {
        let auth = self.api.register(username, email, password).await?;
        self.establish(auth).await
    }

    /// Log in and establish the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserInfo, ApiError> {
        let auth = self.api.login(username, password).await?;
        self.establish(auth).await
    }

    /// Adopt a previously persisted session and hydrate the favorite
    /// set from the server. A rejected token tears the session back
    /// down and surfaces [`ApiError::SessionExpired`].
    pub async fn restore(&self, session: AuthSession) -> Result<UserInfo, ApiError> {
        let user = session.user.clone();
        self.with_state(|s| {
            s.auth = Some(session);
            s.favorites.clear();
        })?;
        self.refresh().await?;
        Ok(user)
    }

    /// Drop the session and the favorite set. The content pool stays.
    pub fn logout(&self) {
        self.teardown();
    }

    pub fn has_session(&self) -> bool {
        self.state.lock().map(|s| s.auth.is_some()).unwrap_or(false)
    }

    /// The logged-in account, if any.
    pub fn current_user(&self) -> Option<UserInfo> {
        self.state
            .lock()
            .ok()
            .and_then(|s| s.auth.as_ref().map(|a| a.user.clone()))
    }

    /// Snapshot of the live session, for persistence.
    pub fn session(&self) -> Option<AuthSession> {
        self.state.lock().ok().and_then(|s| s.auth.clone())
    }

    // ── Favorites ──

    pub fn is_favorite(&self, tmdb_id: i64) -> bool {
        self.state
            .lock()
            .map(|s| s.favorites.contains(tmdb_id))
            .unwrap_or(false)
    }

    pub fn favorite_count(&self) -> usize {
        self.state.lock().map(|s| s.favorites.len()).unwrap_or(0)
    }

    /// Snapshot of the favorite records, order unspecified.
    pub fn favorites(&self) -> Vec<FavoriteRecord> {
        self.state
            .lock()
            .map(|s| s.favorites.records())
            .unwrap_or_default()
    }

    /// Re-fetch the favorite list and rebuild the local set. Returns
    /// the number of favorites.
    pub async fn refresh(&self) -> Result<usize, ApiError> {
        let token = self.token().ok_or(ApiError::AuthRequired)?;
        let records = self.intercept(self.api.list_favorites(&token).await)?;
        let count = records.len();
        self.with_state(|s| s.favorites.rebuild(records))?;
        Ok(count)
    }

    /// Toggle one item.
    ///
    /// The local set changes only after the server commits, and at
    /// most one toggle per id is in flight; a concurrent duplicate
    /// gets [`ToggleOutcome::InFlight`] without a network call.
    pub async fn toggle(&self, item: &ContentItem) -> Result<ToggleOutcome, ApiError> {
        let token = self.token().ok_or(ApiError::AuthRequired)?;

        let Some(_pending) = self.inflight.try_begin(item.tmdb_id) else {
            return Ok(ToggleOutcome::InFlight);
        };

        let existing = self.with_state(|s| s.favorites.record_id(item.tmdb_id))?;
        match existing {
            Some(record_id) => {
                // The record id comes from the last hydration. If the
                // record vanished server-side in between, the delete
                // still reports success and the outcome is the same.
                self.intercept(self.api.remove_favorite(&token, &record_id).await)?;
                self.with_state(|s| s.favorites.remove(item.tmdb_id))?;
                Ok(ToggleOutcome::Removed)
            }
            None => {
                let record =
                    self.intercept(self.api.add_favorite(&token, &item.to_add_request()).await)?;
                self.with_state(|s| s.favorites.insert(record.clone()))?;
                Ok(ToggleOutcome::Added(record))
            }
        }
    }

    /// Ask the server whether an item is favorited, bypassing the
    /// local set.
    pub async fn check_remote(&self, tmdb_id: i64) -> Result<bool, ApiError> {
        let token = self.token().ok_or(ApiError::AuthRequired)?;
        self.intercept(self.api.check_favorite(&token, tmdb_id).await)
    }

    // ── Content pool ──

    /// Merge a page of catalog results into the pool. Returns how many
    /// entries were new.
    pub fn merge_page(&self, entries: &[CatalogEntry]) -> Result<usize, ApiError> {
        self.with_state(|s| s.pool.merge_page(entries))
    }

    /// Pooled payload for an id, if the session has seen it.
    pub fn pooled(&self, tmdb_id: i64) -> Option<ContentItem> {
        self.state
            .lock()
            .ok()
            .and_then(|s| s.pool.get(tmdb_id).cloned())
    }

    pub fn pool_len(&self) -> usize {
        self.state.lock().map(|s| s.pool.len()).unwrap_or(0)
    }

    // ── Internals ──

    async fn establish(&self, auth: AuthSuccess) -> Result<UserInfo, ApiError> {
        self.restore(AuthSession {
            token: auth.token,
            user: auth.user,
        })
        .await
    }

    fn token(&self) -> Option<String> {
        self.state
            .lock()
            .ok()
            .and_then(|s| s.auth.as_ref().map(|a| a.token.clone()))
    }

    fn with_state<F, R>(&self, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&mut SessionContext) -> R,
    {
        let mut state = self
            .state
            .lock()
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        Ok(f(&mut state))
    }

    /// The uniform 401 rule: [`ApiError::SessionExpired`] from any call
    /// tears down local auth state before the error propagates.
    fn intercept<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(ApiError::SessionExpired) = &result {
            self.teardown();
        }
        result
    }

    /// Hard session teardown: auth and the favorite set are dropped.
    /// The content pool survives, it holds no user state.
    fn teardown(&self) {
        let _ = self.with_state(|s| {
            s.auth = None;
            s.favorites.clear();
        });
    }
}

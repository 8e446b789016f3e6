//! Typed HTTP driver for the cinescoped API.
//!
//! One method per server operation, mirroring the wire contract. The
//! bearer token is passed explicitly per call; session bookkeeping
//! lives in [`crate::sync`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ── Wire types ──

/// Public view of an account, as the server returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

/// Result of a successful register or login.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSuccess {
    pub token: String,
    pub user: UserInfo,
}

/// One persisted favorite, as the server returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub id: String,
    pub user_id: String,
    pub tmdb_id: i64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    pub media_type: String,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    pub created_at: String,
}

/// Payload for adding a favorite.
#[derive(Debug, Clone, Serialize)]
pub struct AddFavorite {
    pub tmdb_id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    pub media_type: String,
    pub vote_average: Option<f64>,
    pub release_date: Option<String>,
}

// ── Client ──

/// Thin HTTP client for one cinescoped instance.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the given base URL. A trailing slash is
    /// tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Auth ──

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSuccess, ApiError> {
        let body = serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        });
        let resp = self
            .http
            .post(self.url("/auth/register"))
            .json(&body)
            .send()
            .await?;
        let body = read_envelope(resp, false).await?;
        decode(body)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSuccess, ApiError> {
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });
        let resp = self
            .http
            .post(self.url("/auth/login"))
            .json(&body)
            .send()
            .await?;
        let body = read_envelope(resp, false).await?;
        decode(body)
    }

    /// Resolve the account behind a token.
    pub async fn me(&self, token: &str) -> Result<UserInfo, ApiError> {
        let resp = self
            .http
            .get(self.url("/auth/me"))
            .bearer_auth(token)
            .send()
            .await?;
        let body = read_envelope(resp, true).await?;
        field(&body, "user")
    }

    // ── Favorites ──

    pub async fn list_favorites(&self, token: &str) -> Result<Vec<FavoriteRecord>, ApiError> {
        let resp = self
            .http
            .get(self.url("/favorites"))
            .bearer_auth(token)
            .send()
            .await?;
        let body = read_envelope(resp, true).await?;
        field(&body, "data")
    }

    pub async fn add_favorite(
        &self,
        token: &str,
        req: &AddFavorite,
    ) -> Result<FavoriteRecord, ApiError> {
        let resp = self
            .http
            .post(self.url("/favorites"))
            .bearer_auth(token)
            .json(req)
            .send()
            .await?;
        let body = read_envelope(resp, true).await?;
        field(&body, "data")
    }

    /// Delete a favorite by its record id. The server treats unknown
    /// and foreign-owned ids as a no-op success.
    pub async fn remove_favorite(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(self.url(&format!("/favorites/{}", id)))
            .bearer_auth(token)
            .send()
            .await?;
        read_envelope(resp, true).await?;
        Ok(())
    }

    pub async fn check_favorite(&self, token: &str, tmdb_id: i64) -> Result<bool, ApiError> {
        let resp = self
            .http
            .get(self.url(&format!("/favorites/check/{}", tmdb_id)))
            .bearer_auth(token)
            .send()
            .await?;
        let body = read_envelope(resp, true).await?;
        field(&body, "isFavorite")
    }

    // ── System ──

    /// Probe the health endpoint.
    pub async fn health(&self) -> Result<(), ApiError> {
        let resp = self.http.get(self.url("/health")).send().await?;
        resp.error_for_status()?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Read a response envelope. On authenticated calls a 401 becomes
/// [`ApiError::SessionExpired`] before anything else; other error
/// statuses become [`ApiError::Server`] with the server's message.
async fn read_envelope(
    resp: reqwest::Response,
    authed: bool,
) -> Result<serde_json::Value, ApiError> {
    let status = resp.status();
    if authed && status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(ApiError::SessionExpired);
    }

    let body: serde_json::Value = resp
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;

    if !status.is_success() {
        let message = body["message"]
            .as_str()
            .unwrap_or("request failed")
            .to_string();
        return Err(ApiError::Server {
            status: status.as_u16(),
            message,
        });
    }
    Ok(body)
}

fn decode<T: DeserializeOwned>(body: serde_json::Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn field<T: DeserializeOwned>(body: &serde_json::Value, key: &str) -> Result<T, ApiError> {
    serde_json::from_value(body[key].clone())
        .map_err(|e| ApiError::Decode(format!("{}: {}", key, e)))
}

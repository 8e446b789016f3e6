use serde::{Deserialize, Serialize};

/// A registered account.
///
/// The full record (including the password hash) lives in the `users`
/// table's JSON `data` column. Only [`PublicUser`] ever crosses the API
/// boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (UUIDv4, no dashes).
    pub id: String,

    /// Login name. Unique, case-sensitive as stored.
    pub username: String,

    /// Email address. Unique.
    pub email: String,

    /// Argon2id hash in PHC string format. Write-only from the API's
    /// perspective.
    pub password_hash: String,

    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl User {
    /// The outward-facing projection (no password hash).
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            created_at: self.created_at.clone(),
        }
    }
}

/// The shape of a user in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

/// Request body for `POST /auth/register`.
///
/// All three fields are required; they are optional here so that the
/// service can answer a missing field with the 400 envelope instead of
/// a body-extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

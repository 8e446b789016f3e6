use serde::{Deserialize, Serialize};

/// JWT claims payload.
///
/// Sessions are stateless: there is no server-side record and no
/// revocation list. Expiry is the only thing that ends a session, and
/// clients drop the token on any 401.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user id.
    pub sub: String,

    /// Username at issuance time.
    pub username: String,

    /// Issued at (unix timestamp).
    pub iat: i64,

    /// Expiration (unix timestamp).
    pub exp: i64,
}

/// Request body for `POST /auth/login`.
///
/// Both fields are required; they are optional here so that the
/// service can answer a missing field with the 400 envelope instead of
/// a body-extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

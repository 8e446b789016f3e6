use serde::{Deserialize, Serialize};

/// The authenticated caller, resolved by the session gate from a
/// verified bearer token and injected into request extensions.
///
/// Handlers must take identity from here and never from ids supplied in
/// a request body, so one user can never act on another user's records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// User id (token subject).
    pub user_id: String,
    /// Username at token issuance time.
    pub username: String,
}

//! Client-side error taxonomy.

use thiserror::Error;

/// Errors surfaced by the API driver and the synchronizer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with an error envelope.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// A 401 on an authenticated call; the session is no longer valid.
    /// The synchronizer reacts by dropping local auth state before
    /// this propagates.
    #[error("session expired or rejected")]
    SessionExpired,

    /// An operation that needs a session was called without one.
    #[error("not logged in")]
    AuthRequired,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered 2xx but the body did not have the promised
    /// shape.
    #[error("malformed server response: {0}")]
    Decode(String),

    /// Reading or writing the persisted session failed.
    #[error("session store error: {0}")]
    Store(String),

    #[error("internal client error: {0}")]
    Internal(String),
}

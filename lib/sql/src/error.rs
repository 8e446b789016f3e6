use thiserror::Error;

#[derive(Error, Debug)]
pub enum SQLError {
    #[error("query error: {0}")]
    Query(String),

    #[error("execution error: {0}")]
    Execution(String),

    #[error("connection error: {0}")]
    Connection(String),
}

impl SQLError {
    /// Whether this error is a UNIQUE constraint violation.
    ///
    /// The services rely on table-level UNIQUE constraints (username,
    /// email, (user_id, tmdb_id)) and translate violations into
    /// conflict errors instead of pre-checking with a read.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            SQLError::Execution(msg) => msg.contains("UNIQUE constraint failed"),
            _ => false,
        }
    }
}

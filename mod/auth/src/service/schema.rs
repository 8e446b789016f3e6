use cinescope_sql::SQLStore;

use crate::service::AuthError;

/// Initialize the SQLite schema for the auth module.
///
/// The UNIQUE constraints on username and email are what registration
/// relies on for duplicate detection — there is no read-before-write.
pub fn init_schema(sql: &dyn SQLStore) -> Result<(), AuthError> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
    ];

    for stmt in statements {
        sql.exec(stmt, &[])
            .map_err(|e| AuthError::Storage(e.to_string()))?;
    }

    Ok(())
}

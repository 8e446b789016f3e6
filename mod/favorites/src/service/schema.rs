use cinescope_sql::SQLStore;

use crate::service::FavoritesError;

/// Initialize the SQLite schema for the favorites module.
///
/// UNIQUE(user_id, tmdb_id) is the duplicate-favorite guard; conflicts
/// are surfaced from the constraint, not pre-checked with a read. The
/// users FK requires the auth schema to exist first, which module
/// construction order in the server guarantees.
pub fn init_schema(sql: &dyn SQLStore) -> Result<(), FavoritesError> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS favorites (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            tmdb_id INTEGER NOT NULL,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE(user_id, tmdb_id),
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )",
        "CREATE INDEX IF NOT EXISTS idx_favorites_user ON favorites(user_id)",
    ];

    for stmt in statements {
        sql.exec(stmt, &[])
            .map_err(|e| FavoritesError::Storage(e.to_string()))?;
    }

    Ok(())
}

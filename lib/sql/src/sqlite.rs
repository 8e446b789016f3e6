use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use crate::error::SQLError;
use crate::traits::{Row, SQLStore, Value};

/// SqliteStore is a SQLStore implementation backed by rusqlite (bundled SQLite).
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a SQLite database at the given path.
    pub fn open(path: &Path) -> Result<Self, SQLError> {
        let conn = Connection::open(path)
            .map_err(|e| SQLError::Connection(e.to_string()))?;

        // WAL for concurrent reads; foreign_keys so the favorites→users
        // reference is actually enforced (off by default in SQLite).
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .map_err(|e| SQLError::Connection(e.to_string()))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite database (useful for tests).
    pub fn open_in_memory() -> Result<Self, SQLError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| SQLError::Connection(e.to_string()))?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")
            .map_err(|e| SQLError::Connection(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

/// Convert our Value enum to rusqlite's ToSql.
fn bind_params(params: &[Value]) -> Vec<Box<dyn rusqlite::types::ToSql + '_>> {
    params
        .iter()
        .map(|v| -> Box<dyn rusqlite::types::ToSql + '_> {
            match v {
                Value::Null => Box::new(rusqlite::types::Null),
                Value::Integer(i) => Box::new(*i),
                Value::Real(f) => Box::new(*f),
                Value::Text(s) => Box::new(s.as_str()),
            }
        })
        .collect()
}

impl SQLStore for SqliteStore {
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, SQLError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| SQLError::Query(e.to_string()))?;

        let bound = bind_params(params);
        let param_refs: Vec<&dyn rusqlite::types::ToSql> =
            bound.iter().map(|b| b.as_ref()).collect();

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| SQLError::Query(e.to_string()))?;

        let column_names: Vec<String> = stmt
            .column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rows = stmt
            .query_map(param_refs.as_slice(), |row| {
                let mut columns = Vec::new();
                for (i, name) in column_names.iter().enumerate() {
                    let val = row_value_at(row, i);
                    columns.push((name.clone(), val));
                }
                Ok(Row { columns })
            })
            .map_err(|e| SQLError::Query(e.to_string()))?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row.map_err(|e| SQLError::Query(e.to_string()))?);
        }
        Ok(result)
    }

    fn exec(&self, sql: &str, params: &[Value]) -> Result<u64, SQLError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| SQLError::Execution(e.to_string()))?;

        let bound = bind_params(params);
        let param_refs: Vec<&dyn rusqlite::types::ToSql> =
            bound.iter().map(|b| b.as_ref()).collect();

        let affected = conn
            .execute(sql, param_refs.as_slice())
            .map_err(|e| SQLError::Execution(e.to_string()))?;

        Ok(affected as u64)
    }
}

/// Extract a Value from a rusqlite row at a given column index.
fn row_value_at(row: &rusqlite::Row, idx: usize) -> Value {
    // Try integer first, then real, then text, then null.
    if let Ok(i) = row.get::<_, i64>(idx) {
        return Value::Integer(i);
    }
    if let Ok(f) = row.get::<_, f64>(idx) {
        return Value::Real(f);
    }
    if let Ok(s) = row.get::<_, String>(idx) {
        return Value::Text(s);
    }
    Value::Null
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_schema() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .exec(
                "CREATE TABLE owners (id TEXT PRIMARY KEY, name TEXT NOT NULL UNIQUE)",
                &[],
            )
            .unwrap();
        store
            .exec(
                "CREATE TABLE items (
                    id TEXT PRIMARY KEY,
                    owner_id TEXT NOT NULL REFERENCES owners(id) ON DELETE CASCADE,
                    ext_id INTEGER NOT NULL,
                    UNIQUE(owner_id, ext_id)
                )",
                &[],
            )
            .unwrap();
        store
    }

    #[test]
    fn test_query_and_exec_roundtrip() {
        let store = store_with_schema();
        let n = store
            .exec(
                "INSERT INTO owners (id, name) VALUES (?1, ?2)",
                &[Value::Text("u1".into()), Value::Text("alice".into())],
            )
            .unwrap();
        assert_eq!(n, 1);

        let rows = store
            .query("SELECT id, name FROM owners WHERE id = ?1", &[Value::Text("u1".into())])
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_str("name"), Some("alice"));

        store
            .exec(
                "INSERT INTO items (id, owner_id, ext_id) VALUES ('f1', 'u1', 603)",
                &[],
            )
            .unwrap();
        let rows = store
            .query(
                "SELECT id, ext_id FROM items WHERE owner_id = ?1",
                &[Value::Text("u1".into())],
            )
            .unwrap();
        assert_eq!(rows[0].get_i64("ext_id"), Some(603));
        // Typed accessors answer None on a type mismatch.
        assert_eq!(rows[0].get_i64("id"), None);
        assert_eq!(rows[0].get_str("ext_id"), None);
    }

    #[test]
    fn test_unique_violation_detected() {
        let store = store_with_schema();
        for _ in 0..2 {
            let r = store.exec(
                "INSERT INTO owners (id, name) VALUES (?1, ?2)",
                &[Value::Text(cheap_id()), Value::Text("bob".into())],
            );
            match r {
                Ok(n) => assert_eq!(n, 1),
                Err(e) => {
                    assert!(e.is_unique_violation(), "unexpected error: {e}");
                    return;
                }
            }
        }
        panic!("second insert with duplicate name should have failed");
    }

    #[test]
    fn test_composite_unique_and_scoped_delete() {
        let store = store_with_schema();
        store
            .exec(
                "INSERT INTO owners (id, name) VALUES ('u1', 'alice'), ('u2', 'bob')",
                &[],
            )
            .unwrap();
        store
            .exec(
                "INSERT INTO items (id, owner_id, ext_id) VALUES ('f1', 'u1', 603)",
                &[],
            )
            .unwrap();

        // Same ext_id under another owner is fine.
        store
            .exec(
                "INSERT INTO items (id, owner_id, ext_id) VALUES ('f2', 'u2', 603)",
                &[],
            )
            .unwrap();

        // Same (owner, ext_id) pair is not.
        let dup = store.exec(
            "INSERT INTO items (id, owner_id, ext_id) VALUES ('f3', 'u1', 603)",
            &[],
        );
        assert!(dup.unwrap_err().is_unique_violation());

        // Owner-scoped delete: u2 cannot delete u1's row.
        let n = store
            .exec(
                "DELETE FROM items WHERE id = ?1 AND owner_id = ?2",
                &[Value::Text("f1".into()), Value::Text("u2".into())],
            )
            .unwrap();
        assert_eq!(n, 0);

        let n = store
            .exec(
                "DELETE FROM items WHERE id = ?1 AND owner_id = ?2",
                &[Value::Text("f1".into()), Value::Text("u1".into())],
            )
            .unwrap();
        assert_eq!(n, 1);
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let store = store_with_schema();
        let r = store.exec(
            "INSERT INTO items (id, owner_id, ext_id) VALUES ('f1', 'nobody', 1)",
            &[],
        );
        assert!(r.is_err());
    }

    fn cheap_id() -> String {
        use std::sync::atomic::{AtomicU32, Ordering};
        static N: AtomicU32 = AtomicU32::new(0);
        format!("id{}", N.fetch_add(1, Ordering::Relaxed))
    }
}

use cinescope_core::{new_id, now_rfc3339};
use cinescope_sql::Value;

use crate::model::{AddFavoriteRequest, Favorite, MediaType};
use crate::service::{FavoritesError, FavoritesService};

impl FavoritesService {
    /// All favorites owned by a user.
    pub fn list(&self, user_id: &str) -> Result<Vec<Favorite>, FavoritesError> {
        let rows = self
            .sql
            .query(
                "SELECT data FROM favorites WHERE user_id = ?1 ORDER BY created_at DESC",
                &[Value::Text(user_id.to_string())],
            )
            .map_err(|e| {
                tracing::error!(error = %e, user_id, "favorite list failed");
                FavoritesError::Storage("Error fetching favorites".into())
            })?;

        let mut items = Vec::new();
        for row in &rows {
            let data = row
                .get_str("data")
                .ok_or_else(|| FavoritesError::Internal("missing data column".into()))?;
            let favorite: Favorite =
                serde_json::from_str(data).map_err(|e| FavoritesError::Internal(e.to_string()))?;
            items.push(favorite);
        }
        Ok(items)
    }

    /// Save a favorite for a user.
    ///
    /// tmdb_id, title, and media_type are required. Duplicate detection
    /// is the UNIQUE(user_id, tmdb_id) constraint, so a concurrent
    /// double-add loses cleanly instead of slipping past a read check.
    pub fn add(
        &self,
        user_id: &str,
        req: &AddFavoriteRequest,
    ) -> Result<Favorite, FavoritesError> {
        let tmdb_id = req.tmdb_id.unwrap_or(0);
        let title = req.title.as_deref().unwrap_or("");
        let media_raw = req.media_type.as_deref().unwrap_or("");
        if tmdb_id <= 0 || title.is_empty() || media_raw.is_empty() {
            return Err(FavoritesError::Validation("Missing required fields".into()));
        }
        let media_type = MediaType::parse(media_raw).ok_or_else(|| {
            FavoritesError::Validation("media_type must be 'movie' or 'tv'".into())
        })?;

        let favorite = Favorite {
            id: new_id(),
            user_id: user_id.to_string(),
            tmdb_id,
            title: title.to_string(),
            poster_path: req.poster_path.clone(),
            media_type,
            vote_average: req.vote_average,
            release_date: req.release_date.clone(),
            created_at: now_rfc3339(),
        };

        let json = serde_json::to_string(&favorite)
            .map_err(|e| FavoritesError::Internal(e.to_string()))?;

        self.sql
            .exec(
                "INSERT INTO favorites (id, user_id, tmdb_id, data, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                &[
                    Value::Text(favorite.id.clone()),
                    Value::Text(favorite.user_id.clone()),
                    Value::Integer(favorite.tmdb_id),
                    Value::Text(json),
                    Value::Text(favorite.created_at.clone()),
                ],
            )
            .map_err(|e| {
                if e.is_unique_violation() {
                    FavoritesError::Conflict("Already in favorites".into())
                } else {
                    tracing::error!(error = %e, user_id, tmdb_id, "favorite insert failed");
                    FavoritesError::Storage("Error adding favorite".into())
                }
            })?;

        Ok(favorite)
    }

    /// Delete a favorite by record id, scoped to its owner.
    ///
    /// Deleting a record that does not exist, or that belongs to
    /// someone else, is a no-op success: clients retry removes and race
    /// their own lookups, and neither case should surface as an error.
    pub fn remove(&self, user_id: &str, favorite_id: &str) -> Result<(), FavoritesError> {
        let affected = self
            .sql
            .exec(
                "DELETE FROM favorites WHERE id = ?1 AND user_id = ?2",
                &[
                    Value::Text(favorite_id.to_string()),
                    Value::Text(user_id.to_string()),
                ],
            )
            .map_err(|e| {
                tracing::error!(error = %e, user_id, favorite_id, "favorite delete failed");
                FavoritesError::Storage("Error removing favorite".into())
            })?;

        if affected == 0 {
            tracing::debug!(user_id, favorite_id, "remove matched no rows");
        }
        Ok(())
    }

    /// Whether a user has favorited a catalog item.
    ///
    /// Never fails: any lookup error is reported as false. Callers use
    /// this for UI state where a wrong "no" self-heals on the next
    /// listing, while an error would break the page.
    pub fn check(&self, user_id: &str, tmdb_id: i64) -> bool {
        let result = self.sql.query(
            "SELECT COUNT(*) AS n FROM favorites WHERE user_id = ?1 AND tmdb_id = ?2",
            &[
                Value::Text(user_id.to_string()),
                Value::Integer(tmdb_id),
            ],
        );

        match result {
            Ok(rows) => rows.first().and_then(|r| r.get_i64("n")).unwrap_or(0) > 0,
            Err(e) => {
                tracing::debug!(error = %e, user_id, tmdb_id, "favorite check failed, reporting false");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cinescope_sql::{SqliteStore, SQLStore};

    use crate::model::AddFavoriteRequest;
    use crate::service::{FavoritesError, FavoritesService};

    /// In-memory store with a minimal users table (the FK target) and
    /// two users, mirroring the server's auth-then-favorites init order.
    fn test_service() -> (Arc<SqliteStore>, Arc<FavoritesService>) {
        let sql = Arc::new(SqliteStore::open_in_memory().unwrap());
        sql.exec(
            "CREATE TABLE users (
                id TEXT PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL UNIQUE,
                data TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            &[],
        )
        .unwrap();
        sql.exec(
            "INSERT INTO users (id, username, email, data, created_at) VALUES
                ('u1', 'alice', 'a@x.com', '{}', '2024-01-01T00:00:00Z'),
                ('u2', 'bob', 'b@x.com', '{}', '2024-01-01T00:00:00Z')",
            &[],
        )
        .unwrap();
        let svc = FavoritesService::new(sql.clone()).unwrap();
        (sql, svc)
    }

    fn matrix() -> AddFavoriteRequest {
        AddFavoriteRequest {
            tmdb_id: Some(603),
            title: Some("The Matrix".into()),
            poster_path: Some("/matrix.jpg".into()),
            media_type: Some("movie".into()),
            vote_average: Some(8.2),
            release_date: Some("1999-03-30".into()),
        }
    }

    #[test]
    fn test_add_and_list() {
        let (_, svc) = test_service();

        let fav = svc.add("u1", &matrix()).unwrap();
        assert_eq!(fav.tmdb_id, 603);
        assert_eq!(fav.title, "The Matrix");
        assert!(!fav.id.is_empty());

        let listed = svc.list("u1").unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, fav.id);

        // Other users see nothing.
        assert!(svc.list("u2").unwrap().is_empty());
    }

    #[test]
    fn test_add_duplicate_conflicts() {
        let (_, svc) = test_service();
        svc.add("u1", &matrix()).unwrap();

        match svc.add("u1", &matrix()) {
            Err(FavoritesError::Conflict(msg)) => assert_eq!(msg, "Already in favorites"),
            other => panic!("expected conflict, got {:?}", other.map(|_| ())),
        }

        // Same item under a different user is fine.
        svc.add("u2", &matrix()).unwrap();
    }

    #[test]
    fn test_add_remove_add_roundtrip() {
        let (_, svc) = test_service();

        let fav = svc.add("u1", &matrix()).unwrap();
        svc.remove("u1", &fav.id).unwrap();
        assert!(svc.list("u1").unwrap().is_empty());

        // Slot is free again.
        svc.add("u1", &matrix()).unwrap();
    }

    #[test]
    fn test_add_missing_fields() {
        let (_, svc) = test_service();

        let cases = [
            AddFavoriteRequest::default(),
            AddFavoriteRequest {
                tmdb_id: Some(0),
                ..matrix()
            },
            AddFavoriteRequest {
                title: Some(String::new()),
                ..matrix()
            },
            AddFavoriteRequest {
                media_type: None,
                ..matrix()
            },
        ];
        for req in cases {
            match svc.add("u1", &req) {
                Err(FavoritesError::Validation(msg)) => {
                    assert_eq!(msg, "Missing required fields")
                }
                other => panic!("expected validation error, got {:?}", other.map(|_| ())),
            }
        }

        // Present but unknown media type is also a validation error.
        let bad_type = AddFavoriteRequest {
            media_type: Some("book".into()),
            ..matrix()
        };
        assert!(matches!(
            svc.add("u1", &bad_type),
            Err(FavoritesError::Validation(_))
        ));
    }

    #[test]
    fn test_remove_is_idempotent_and_owner_scoped() {
        let (_, svc) = test_service();
        let fav = svc.add("u1", &matrix()).unwrap();

        // Nonexistent id: no-op success.
        svc.remove("u1", "does-not-exist").unwrap();

        // Foreign-owned record: no-op success, record survives.
        svc.remove("u2", &fav.id).unwrap();
        assert_eq!(svc.list("u1").unwrap().len(), 1);

        // Owner removes it; a second remove is still a success.
        svc.remove("u1", &fav.id).unwrap();
        svc.remove("u1", &fav.id).unwrap();
        assert!(svc.list("u1").unwrap().is_empty());
    }

    #[test]
    fn test_check() {
        let (_, svc) = test_service();
        assert!(!svc.check("u1", 603));

        svc.add("u1", &matrix()).unwrap();
        assert!(svc.check("u1", 603));
        assert!(!svc.check("u2", 603));
        assert!(!svc.check("u1", 604));
    }

    #[test]
    fn test_check_swallows_lookup_errors() {
        let (sql, svc) = test_service();
        svc.add("u1", &matrix()).unwrap();
        assert!(svc.check("u1", 603));

        // Pull the table out from under it: still false, never an error.
        sql.exec("DROP TABLE favorites", &[]).unwrap();
        assert!(!svc.check("u1", 603));
    }
}

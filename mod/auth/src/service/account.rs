use cinescope_core::{new_id, now_rfc3339};
use cinescope_sql::Value;

use crate::model::{LoginRequest, RegisterRequest, User};
use crate::service::password::{hash_password, verify_password};
use crate::service::{AuthError, AuthService};

impl AuthService {
    /// Register a new account and issue its first token.
    ///
    /// Duplicate detection rides on the table's UNIQUE constraints;
    /// the raw constraint error never reaches the caller.
    pub fn register(&self, req: &RegisterRequest) -> Result<(User, String), AuthError> {
        let (username, email, password) = match (
            non_empty(req.username.as_deref()),
            non_empty(req.email.as_deref()),
            non_empty(req.password.as_deref()),
        ) {
            (Some(u), Some(e), Some(p)) => (u, e, p),
            _ => {
                return Err(AuthError::Validation(
                    "Please provide username, email, and password".into(),
                ))
            }
        };

        let user = User {
            id: new_id(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password)?,
            created_at: now_rfc3339(),
        };

        self.insert_record(
            "users",
            &user.id,
            &user,
            &[
                ("username", Value::Text(user.username.clone())),
                ("email", Value::Text(user.email.clone())),
                ("created_at", Value::Text(user.created_at.clone())),
            ],
        )
        .map_err(|e| match e {
            AuthError::Conflict(_) => {
                AuthError::Conflict("Username or email already exists".into())
            }
            AuthError::Storage(msg) => {
                tracing::error!(error = %msg, "user insert failed");
                AuthError::Storage("Error creating user".into())
            }
            other => other,
        })?;

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// Verify credentials and issue a token.
    ///
    /// Both fields are required. Past that check, unknown username and
    /// wrong password are indistinguishable to the caller; both answer
    /// "Invalid credentials".
    pub fn login(&self, req: &LoginRequest) -> Result<(User, String), AuthError> {
        let (username, password) = match (
            non_empty(req.username.as_deref()),
            non_empty(req.password.as_deref()),
        ) {
            (Some(u), Some(p)) => (u, p),
            _ => {
                return Err(AuthError::Validation(
                    "Please provide username and password".into(),
                ))
            }
        };

        let found = self.find_user_by_username(username).map_err(|e| match e {
            AuthError::Storage(msg) => {
                tracing::error!(error = %msg, "user lookup failed");
                AuthError::Storage("Error logging in".into())
            }
            other => other,
        })?;
        let user = match found {
            Some(u) => u,
            None => return Err(AuthError::Unauthorized("Invalid credentials".into())),
        };

        if !verify_password(password, &user.password_hash) {
            return Err(AuthError::Unauthorized("Invalid credentials".into()));
        }

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// Get a user by id.
    pub fn get_user(&self, id: &str) -> Result<User, AuthError> {
        self.get_record("users", id).map_err(|e| match e {
            AuthError::Storage(msg) => {
                tracing::error!(error = %msg, "user fetch failed");
                AuthError::Storage("Error fetching user".into())
            }
            other => other,
        })
    }

    /// Look up a user by username. Ok(None) when no such user exists.
    pub fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        let rows = self
            .sql
            .query(
                "SELECT data FROM users WHERE username = ?1",
                &[Value::Text(username.to_string())],
            )
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        let Some(row) = rows.first() else {
            return Ok(None);
        };
        let data = row
            .get_str("data")
            .ok_or_else(|| AuthError::Internal("missing data column".into()))?;
        let user = serde_json::from_str(data).map_err(|e| AuthError::Internal(e.to_string()))?;
        Ok(Some(user))
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    match s {
        Some(v) if !v.is_empty() => Some(v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cinescope_sql::{SQLStore, SqliteStore};

    use crate::model::{LoginRequest, RegisterRequest};
    use crate::service::{AuthConfig, AuthError, AuthService};

    fn test_service() -> Arc<AuthService> {
        let sql = Arc::new(SqliteStore::open_in_memory().unwrap());
        AuthService::new(sql, AuthConfig::default()).unwrap()
    }

    fn alice() -> RegisterRequest {
        RegisterRequest {
            username: Some("alice".into()),
            email: Some("a@x.com".into()),
            password: Some("pw12345".into()),
        }
    }

    #[test]
    fn test_register_then_login_same_user() {
        let svc = test_service();

        let (registered, reg_token) = svc.register(&alice()).unwrap();
        assert_eq!(registered.username, "alice");
        assert!(!reg_token.is_empty());

        let (logged_in, token) = svc
            .login(&LoginRequest {
                username: Some("alice".into()),
                password: Some("pw12345".into()),
            })
            .unwrap();
        assert_eq!(logged_in.id, registered.id);

        // The token resolves back to the same user.
        let claims = svc.verify_token(&token).unwrap();
        assert_eq!(claims.sub, registered.id);
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn test_register_missing_fields() {
        let svc = test_service();

        for req in [
            RegisterRequest::default(),
            RegisterRequest {
                email: None,
                ..alice()
            },
            RegisterRequest {
                password: Some(String::new()),
                ..alice()
            },
        ] {
            match svc.register(&req) {
                Err(AuthError::Validation(msg)) => {
                    assert_eq!(msg, "Please provide username, email, and password")
                }
                other => panic!("expected validation error, got {:?}", other.map(|_| ())),
            }
        }
    }

    #[test]
    fn test_register_duplicate_username() {
        let svc = test_service();
        svc.register(&alice()).unwrap();

        let dup = RegisterRequest {
            email: Some("other@x.com".into()),
            ..alice()
        };
        match svc.register(&dup) {
            Err(AuthError::Conflict(msg)) => {
                assert_eq!(msg, "Username or email already exists")
            }
            other => panic!("expected conflict, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_register_duplicate_email() {
        let svc = test_service();
        svc.register(&alice()).unwrap();

        let dup = RegisterRequest {
            username: Some("alice2".into()),
            ..alice()
        };
        assert!(matches!(svc.register(&dup), Err(AuthError::Conflict(_))));
    }

    #[test]
    fn test_login_missing_fields() {
        let svc = test_service();
        svc.register(&alice()).unwrap();

        for req in [
            LoginRequest::default(),
            LoginRequest {
                username: Some("alice".into()),
                password: None,
            },
            LoginRequest {
                username: Some(String::new()),
                password: Some("pw12345".into()),
            },
        ] {
            match svc.login(&req) {
                Err(AuthError::Validation(msg)) => {
                    assert_eq!(msg, "Please provide username and password")
                }
                other => panic!("expected validation error, got {:?}", other.map(|_| ())),
            }
        }
    }

    #[test]
    fn test_login_failures_are_indistinguishable() {
        let svc = test_service();
        svc.register(&alice()).unwrap();

        let wrong_password = svc.login(&LoginRequest {
            username: Some("alice".into()),
            password: Some("nope".into()),
        });
        let unknown_user = svc.login(&LoginRequest {
            username: Some("mallory".into()),
            password: Some("pw12345".into()),
        });

        for result in [wrong_password, unknown_user] {
            match result {
                Err(AuthError::Unauthorized(msg)) => assert_eq!(msg, "Invalid credentials"),
                other => panic!("expected unauthorized, got {:?}", other.map(|_| ())),
            }
        }
    }

    #[test]
    fn test_get_user() {
        let svc = test_service();
        let (user, _) = svc.register(&alice()).unwrap();

        let fetched = svc.get_user(&user.id).unwrap();
        assert_eq!(fetched.username, "alice");
        assert!(matches!(
            svc.get_user("missing"),
            Err(AuthError::NotFound(_))
        ));
    }

    #[test]
    fn test_store_failures_are_genericized() {
        let sql = Arc::new(SqliteStore::open_in_memory().unwrap());
        let svc = AuthService::new(sql.clone(), AuthConfig::default()).unwrap();
        let (user, _) = svc.register(&alice()).unwrap();

        // Pull the table out from under the service: the raw cause must
        // stay server-side.
        sql.exec("DROP TABLE users", &[]).unwrap();

        match svc.login(&LoginRequest {
            username: Some("alice".into()),
            password: Some("pw12345".into()),
        }) {
            Err(AuthError::Storage(msg)) => assert_eq!(msg, "Error logging in"),
            other => panic!("expected storage error, got {:?}", other.map(|_| ())),
        }

        match svc.get_user(&user.id) {
            Err(AuthError::Storage(msg)) => assert_eq!(msg, "Error fetching user"),
            other => panic!("expected storage error, got {:?}", other.map(|_| ())),
        }
    }
}

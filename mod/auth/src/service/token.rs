use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::model::{Claims, User};
use crate::service::{AuthError, AuthService};

impl AuthService {
    /// Issue a signed JWT for a user.
    ///
    /// Expiry is now + the configured TTL. The token is self-contained;
    /// nothing is written to storage.
    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let now = cinescope_core::now_unix();

        let claims = Claims {
            sub: user.id.clone(),
            username: user.username.clone(),
            iat: now,
            exp: now + self.config.token_ttl,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("JWT encode failed: {}", e)))
    }

    /// Verify and decode a JWT.
    ///
    /// A bad signature and an elapsed expiry are the same failure from
    /// the caller's point of view: Unauthorized.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::default();
        validation.validate_exp = true;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| AuthError::Unauthorized(format!("invalid token: {}", e)))?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cinescope_sql::SqliteStore;

    use crate::model::User;
    use crate::service::{AuthConfig, AuthService};

    fn test_service(config: AuthConfig) -> Arc<AuthService> {
        let sql = Arc::new(SqliteStore::open_in_memory().unwrap());
        AuthService::new(sql, config).unwrap()
    }

    fn test_user() -> User {
        User {
            id: cinescope_core::new_id(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "unused".to_string(),
            created_at: cinescope_core::now_rfc3339(),
        }
    }

    #[test]
    fn test_issue_and_verify_token() {
        let svc = test_service(AuthConfig::default());
        let user = test_user();

        let token = svc.issue_token(&user).unwrap();
        assert!(!token.is_empty());

        let claims = svc.verify_token(&token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_invalid_token() {
        let svc = test_service(AuthConfig::default());
        assert!(svc.verify_token("this.is.not.a.valid.jwt").is_err());
        assert!(svc.verify_token("").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // A negative TTL puts exp in the past, beyond the default 60s
        // validation leeway.
        let svc = test_service(AuthConfig {
            token_ttl: -120,
            ..AuthConfig::default()
        });
        let token = svc.issue_token(&test_user()).unwrap();
        assert!(svc.verify_token(&token).is_err());
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let issuer = test_service(AuthConfig {
            jwt_secret: "secret-a".to_string(),
            ..AuthConfig::default()
        });
        let verifier = test_service(AuthConfig {
            jwt_secret: "secret-b".to_string(),
            ..AuthConfig::default()
        });

        let token = issuer.issue_token(&test_user()).unwrap();
        assert!(issuer.verify_token(&token).is_ok());
        assert!(verifier.verify_token(&token).is_err());
    }
}

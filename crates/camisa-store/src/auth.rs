//! Admin credentials and sessions.

use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// Admin session lifetime.
pub const SESSION_DURATION_DAYS: i64 = 7;

/// Opaque session token handed to the admin client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap an existing token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Generate a new random token.
    pub fn generate() -> Self {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
        use rand::Rng;

        let bytes: [u8; 24] = rand::thread_rng().gen();
        Self(format!("adm_{}", URL_SAFE_NO_PAD.encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A signed-in admin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminSession {
    pub token: SessionToken,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    /// Start a session for `email` at `now`.
    pub fn start(email: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            token: SessionToken::generate(),
            email: email.into(),
            created_at: now,
            expires_at: now + Duration::days(SESSION_DURATION_DAYS),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Argon2 password hashing with default parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a password into a PHC string.
    pub fn hash(&self, password: &str) -> Result<String, StoreError> {
        use rand::RngCore;

        let mut salt_bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut salt_bytes);
        let salt =
            SaltString::encode_b64(&salt_bytes).map_err(|e| StoreError::Hashing(e.to_string()))?;

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| StoreError::Hashing(e.to_string()))
    }

    /// Check a password against a PHC string.
    pub fn verify(&self, password: &str, phc: &str) -> Result<bool, StoreError> {
        let parsed = PasswordHash::new(phc).map_err(|e| StoreError::Hashing(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("Secreta123").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(hasher.verify("Secreta123", &hash).unwrap());
        assert!(!hasher.verify("otra", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash() {
        let hasher = PasswordHasher::new();
        assert!(hasher.verify("x", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_tokens_are_unique() {
        let a = SessionToken::generate();
        let b = SessionToken::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("adm_"));
    }

    #[test]
    fn test_session_expiry() {
        let now = Utc::now();
        let session = AdminSession::start("admin@camisa.mx", now);
        assert!(!session.is_expired_at(now));
        assert!(session.is_expired_at(now + Duration::days(SESSION_DURATION_DAYS)));
    }
}

//! Application Configuration
//!
//! Configuration for the Account application layer.

use std::fmt;
use std::time::Duration;

use platform::password::DEFAULT_MIN_ENTROPY_BITS;

use crate::domain::value_object::role::Role;

/// Account application configuration
#[derive(Clone)]
pub struct AccountConfig {
    /// HS256 key shared by access and refresh tokens
    pub signing_key: Vec<u8>,
    /// Access token lifetime (15 minutes)
    pub access_token_ttl: Duration,
    /// Refresh token lifetime (10 hours)
    pub refresh_token_ttl: Duration,
    /// Minimum password entropy in bits
    pub min_password_entropy: f64,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Role assigned at signup
    pub default_role: Role,
}

impl AccountConfig {
    pub fn new(signing_key: impl Into<Vec<u8>>) -> Self {
        Self {
            signing_key: signing_key.into(),
            access_token_ttl: Duration::from_secs(15 * 60),
            refresh_token_ttl: Duration::from_secs(10 * 3600),
            min_password_entropy: DEFAULT_MIN_ENTROPY_BITS,
            password_pepper: None,
            default_role: Role::User,
        }
    }

    /// Config with a random signing key (for development and tests)
    pub fn development() -> Self {
        Self::new(platform::crypto::random_bytes(32))
    }

    pub fn with_pepper(mut self, pepper: impl Into<Vec<u8>>) -> Self {
        self.password_pepper = Some(pepper.into());
        self
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountConfig")
            .field("signing_key", &"[REDACTED]")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("min_password_entropy", &self.min_password_entropy)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("default_role", &self.default_role)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AccountConfig::new(b"key".to_vec());
        assert_eq!(config.access_token_ttl, Duration::from_secs(900));
        assert_eq!(config.refresh_token_ttl, Duration::from_secs(36_000));
        assert_eq!(config.min_password_entropy, 50.0);
        assert_eq!(config.default_role, Role::User);
        assert!(config.pepper().is_none());
    }

    #[test]
    fn test_development_keys_differ() {
        let a = AccountConfig::development();
        let b = AccountConfig::development();
        assert_eq!(a.signing_key.len(), 32);
        assert_ne!(a.signing_key, b.signing_key);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AccountConfig::new(b"super-secret".to_vec()).with_pepper(b"pepper".to_vec());
        let out = format!("{config:?}");
        assert!(!out.contains("super-secret"));
        assert!(out.contains("password_pepper: Some(\"[REDACTED]\")"));
    }
}

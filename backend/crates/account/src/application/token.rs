//! Token Issuer
//!
//! HS256 JWT access/refresh pairs. Both tokens carry the same claim set and
//! are told apart by `typ`; `jti` makes every issued token unique, so a
//! rotated refresh token can never be re-minted by accident.
//!
//! Refresh tokens are server-tracked: [`TokenIssuer::issue_pair`] stores the
//! new refresh token as the account's only valid one, and fails as a whole
//! when that write fails.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::id::AccountId;
use serde::{Deserialize, Serialize};

use crate::application::config::AccountConfig;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::role::Role;
use crate::error::{AccountError, AccountResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account ID
    pub id: String,
    pub role: Role,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Unique token ID
    pub jti: String,
    pub typ: TokenType,
}

impl Claims {
    pub fn new(id: &AccountId, role: Role, typ: TokenType, ttl: Duration) -> Self {
        let now = Utc::now().timestamp();
        Self {
            id: id.to_string(),
            role,
            exp: now + ttl.as_secs() as i64,
            iat: now,
            jti: uuid::Uuid::new_v4().to_string(),
            typ,
        }
    }

    /// The `id` claim as a typed ID; a malformed value is an invalid token
    pub fn account_id(&self) -> AccountResult<AccountId> {
        self.id.parse().map_err(|_| AccountError::InvalidToken)
    }
}

/// Access Token + Refresh Token
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// Signs and verifies tokens with the configured key
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    pub fn new(config: &AccountConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(&config.signing_key),
            decoding_key: DecodingKey::from_secret(&config.signing_key),
            validation,
            access_ttl: config.access_token_ttl,
            refresh_ttl: config.refresh_token_ttl,
        }
    }

    pub fn encode(&self, claims: &Claims) -> AccountResult<String> {
        Ok(encode(
            &Header::new(Algorithm::HS256),
            claims,
            &self.encoding_key,
        )?)
    }

    /// Sign a fresh access/refresh pair
    pub fn sign_pair(&self, id: &AccountId, role: Role) -> AccountResult<TokenPair> {
        let access = Claims::new(id, role, TokenType::Access, self.access_ttl);
        let refresh = Claims::new(id, role, TokenType::Refresh, self.refresh_ttl);

        Ok(TokenPair {
            access_token: self.encode(&access)?,
            refresh_token: self.encode(&refresh)?,
        })
    }

    /// Check signature, structure and expiry
    ///
    /// Every failure is [`AccountError::InvalidToken`].
    pub fn verify(&self, token: &str) -> AccountResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token verification failed");
                AccountError::InvalidToken
            })
    }
}

/// Mints token pairs and rotates the stored refresh token
pub struct TokenIssuer<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    codec: Arc<TokenCodec>,
}

impl<R> TokenIssuer<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, codec: Arc<TokenCodec>) -> Self {
        Self { repo, codec }
    }

    /// Sign a pair, then persist its refresh token as the only valid one
    pub async fn issue_pair(&self, id: &AccountId, role: Role) -> AccountResult<TokenPair> {
        let pair = self.codec.sign_pair(id, role)?;
        self.repo.refresh_token(id, &pair.refresh_token).await?;

        tracing::debug!(
            account_id = %id,
            refresh = %platform::crypto::fingerprint(&pair.refresh_token),
            "Token pair issued"
        );

        Ok(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new(&AccountConfig::development())
    }

    #[test]
    fn test_verify_roundtrip() {
        let codec = codec();
        let id = AccountId::new();
        let pair = codec.sign_pair(&id, Role::Admin).unwrap();

        let access = codec.verify(&pair.access_token).unwrap();
        assert_eq!(access.account_id().unwrap(), id);
        assert_eq!(access.role, Role::Admin);
        assert_eq!(access.typ, TokenType::Access);
        assert_eq!(access.exp - access.iat, 15 * 60);

        let refresh = codec.verify(&pair.refresh_token).unwrap();
        assert_eq!(refresh.typ, TokenType::Refresh);
        assert_eq!(refresh.exp - refresh.iat, 10 * 3600);
    }

    #[test]
    fn test_pairs_are_unique() {
        let codec = codec();
        let id = AccountId::new();
        let a = codec.sign_pair(&id, Role::User).unwrap();
        let b = codec.sign_pair(&id, Role::User).unwrap();
        assert_ne!(a.refresh_token, b.refresh_token);
        assert_ne!(a.access_token, b.access_token);
    }

    #[test]
    fn test_expired_token_fails() {
        let codec = codec();
        let mut claims = Claims::new(&AccountId::new(), Role::User, TokenType::Access, Duration::ZERO);
        claims.exp -= 60;
        claims.iat -= 120;
        let token = codec.encode(&claims).unwrap();
        assert!(matches!(codec.verify(&token), Err(AccountError::InvalidToken)));
    }

    #[test]
    fn test_foreign_key_fails() {
        let token = codec().sign_pair(&AccountId::new(), Role::User).unwrap();
        assert!(matches!(
            codec().verify(&token.access_token),
            Err(AccountError::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage_fails() {
        let codec = codec();
        assert!(matches!(codec.verify(""), Err(AccountError::InvalidToken)));
        assert!(matches!(codec.verify("a.b.c"), Err(AccountError::InvalidToken)));
    }

    #[test]
    fn test_malformed_id_claim() {
        let codec = codec();
        let mut claims = Claims::new(&AccountId::new(), Role::User, TokenType::Access, Duration::from_secs(60));
        claims.id = "not-an-id".to_string();
        let token = codec.encode(&claims).unwrap();
        let verified = codec.verify(&token).unwrap();
        assert!(matches!(verified.account_id(), Err(AccountError::InvalidToken)));
    }

    #[test]
    fn test_debug_hides_tokens() {
        let pair = codec().sign_pair(&AccountId::new(), Role::User).unwrap();
        let out = format!("{pair:?}");
        assert!(!out.contains(&pair.access_token));
    }
}

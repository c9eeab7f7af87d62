//! Refresh Use Case
//!
//! Exchanges the account's current refresh token for a new pair. The
//! presented token must equal the stored one and must itself verify as a
//! refresh token for the same account; the old token dies on success.

use std::sync::Arc;

use kernel::id::AccountId;
use platform::crypto::{constant_time_eq, fingerprint};

use crate::application::token::{TokenCodec, TokenIssuer, TokenPair, TokenType};
use crate::domain::repository::AccountRepository;
use crate::error::{AccountError, AccountResult};

/// Refresh input
pub struct RefreshInput {
    pub id: String,
    pub refresh_token: String,
}

/// Refresh use case
pub struct RefreshUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    codec: Arc<TokenCodec>,
}

impl<R> RefreshUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, codec: Arc<TokenCodec>) -> Self {
        Self { repo, codec }
    }

    pub async fn execute(&self, input: RefreshInput) -> AccountResult<TokenPair> {
        // An id that cannot parse names no account
        let id: AccountId = input.id.parse().map_err(|_| AccountError::NotFound)?;

        let account = self
            .repo
            .get_by_id(&id)
            .await?
            .ok_or(AccountError::NotFound)?;

        let presented = input.refresh_token.as_str();
        let matches_stored = account
            .refresh_token
            .as_deref()
            .is_some_and(|stored| constant_time_eq(stored.as_bytes(), presented.as_bytes()));

        if !matches_stored {
            tracing::warn!(
                account_id = %id,
                presented = %fingerprint(presented),
                "Refresh with a token that is not the current one"
            );
            return Err(AccountError::InvalidToken);
        }

        let claims = self.codec.verify(presented)?;
        if claims.typ != TokenType::Refresh || claims.account_id()? != id {
            return Err(AccountError::InvalidToken);
        }

        let tokens = TokenIssuer::new(self.repo.clone(), self.codec.clone())
            .issue_pair(&account.id, account.role)
            .await?;

        tracing::info!(account_id = %account.id, "Session refreshed");

        Ok(tokens)
    }
}

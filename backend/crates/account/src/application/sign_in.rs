//! Sign In Use Case
//!
//! Verifies login and password, then rotates the session by issuing a new
//! token pair.

use std::sync::Arc;

use platform::password::{ClearTextPassword, HashedPassword};

use crate::application::config::AccountConfig;
use crate::application::token::{TokenCodec, TokenIssuer, TokenPair};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::login::Login;
use crate::error::{AccountError, AccountResult};

/// Sign in input
pub struct SignInInput {
    pub login: String,
    pub password: String,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    codec: Arc<TokenCodec>,
    config: Arc<AccountConfig>,
}

impl<R> SignInUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, codec: Arc<TokenCodec>, config: Arc<AccountConfig>) -> Self {
        Self {
            repo,
            codec,
            config,
        }
    }

    /// Unknown login and wrong password both yield
    /// [`AccountError::InvalidCredentials`], after the same hashing work.
    pub async fn execute(&self, input: SignInInput) -> AccountResult<TokenPair> {
        let password = ClearTextPassword::for_verification(input.password);

        let account = match Login::new(&input.login) {
            Ok(login) => self.repo.get_by_login(&login).await?,
            Err(_) => None,
        };

        let Some(account) = account else {
            HashedPassword::verify_dummy(&password, self.config.pepper());
            return Err(AccountError::InvalidCredentials);
        };

        if !account
            .password_hash
            .verify(&password, self.config.pepper())
        {
            return Err(AccountError::InvalidCredentials);
        }

        let tokens = TokenIssuer::new(self.repo.clone(), self.codec.clone())
            .issue_pair(&account.id, account.role)
            .await?;

        tracing::info!(account_id = %account.id, "Account signed in");

        Ok(tokens)
    }
}

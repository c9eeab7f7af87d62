//! Sign Up Use Case
//!
//! Creates a new account and issues its first token pair.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AccountConfig;
use crate::application::token::{TokenCodec, TokenPair};
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    email::Email,
    login::Login,
    profile::{Age, PersonName},
};
use crate::error::AccountResult;

/// Sign up input
pub struct SignUpInput {
    pub login: String,
    pub email: String,
    pub password: String,
    pub name: String,
    pub age: i32,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub account: Account,
    pub tokens: TokenPair,
}

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    codec: Arc<TokenCodec>,
    config: Arc<AccountConfig>,
}

impl<R> SignUpUseCase<R>
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

    pub async fn execute(&self, input: SignUpInput) -> AccountResult<SignUpOutput> {
        let login = Login::new(&input.login)?;
        let email = Email::new(&input.email)?;
        let name = PersonName::new(&input.name)?;
        let age = Age::new(input.age)?;

        let password = ClearTextPassword::new(input.password, self.config.min_password_entropy)?;
        let password_hash = password.hash(self.config.pepper())?;

        let mut account = Account::new(login, email, name, age, password_hash)
            .with_role(self.config.default_role);

        // The first refresh token goes in with the row: one write, nothing to undo
        let tokens = self.codec.sign_pair(&account.id, account.role)?;
        account.refresh_token = Some(tokens.refresh_token.clone());

        // Uniqueness is the store's call; there is no exists-then-insert
        self.repo.create(&account).await?;

        tracing::info!(
            account_id = %account.id,
            login = %account.login,
            "Account signed up"
        );

        Ok(SignUpOutput { account, tokens })
    }
}

//! Get Account Use Case
//!
//! Administrative reads of any live account, by ID or by login. The role
//! check runs before the store is touched.

use std::sync::Arc;

use kernel::id::AccountId;

use crate::application::principal::Principal;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::login::Login;
use crate::error::{AccountError, AccountResult};

/// Get account use case
pub struct GetAccountUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> GetAccountUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn by_id(&self, principal: &Principal, id: &str) -> AccountResult<Account> {
        principal.require_privileged()?;

        let id: AccountId = id
            .parse()
            .map_err(|e: kernel::id::IdParseError| AccountError::InvalidArgument(e.to_string()))?;

        self.repo
            .get_by_id(&id)
            .await?
            .ok_or(AccountError::NotFound)
    }

    pub async fn by_login(&self, principal: &Principal, login: &str) -> AccountResult<Account> {
        principal.require_privileged()?;

        // A login that could never have been registered is simply absent
        let Ok(login) = Login::new(login) else {
            return Err(AccountError::NotFound);
        };

        self.repo
            .get_by_login(&login)
            .await?
            .ok_or(AccountError::NotFound)
    }
}

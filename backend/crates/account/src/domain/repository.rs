//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.
//!
//! Every lookup and mutation ignores deleted accounts. Mutations touch a
//! single live row and report [`AccountError::NotFound`] when none matched.
//!
//! [`AccountError::NotFound`]: crate::error::AccountError::NotFound

use kernel::id::AccountId;

use crate::domain::entity::account::{Account, AccountPatch};
use crate::domain::value_object::login::Login;
use crate::error::AccountResult;

/// Account store
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Insert a new account; a live account with the same login yields
    /// `DuplicateLogin`
    async fn create(&self, account: &Account) -> AccountResult<()>;

    /// Find a live account by login
    async fn get_by_login(&self, login: &Login) -> AccountResult<Option<Account>>;

    /// Find a live account by ID
    async fn get_by_id(&self, id: &AccountId) -> AccountResult<Option<Account>>;

    /// Apply the present fields of `patch`
    async fn update(&self, id: &AccountId, patch: &AccountPatch) -> AccountResult<()>;

    /// Replace the stored refresh token
    async fn refresh_token(&self, id: &AccountId, token: &str) -> AccountResult<()>;

    /// Soft delete and clear the stored refresh token
    async fn delete(&self, id: &AccountId) -> AccountResult<()>;

    /// Check that the store is reachable
    async fn ping(&self) -> AccountResult<()>;
}

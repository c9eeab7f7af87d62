//! Delete Account Use Case
//!
//! Soft-deletes the caller's own account. The stored refresh token is
//! cleared in the same statement, so the session cannot be refreshed.

use std::sync::Arc;

use crate::application::principal::Principal;
use crate::domain::repository::AccountRepository;
use crate::error::AccountResult;

/// Delete account use case
pub struct DeleteAccountUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteAccountUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// A second delete is `NotFound`
    pub async fn execute(&self, principal: &Principal) -> AccountResult<()> {
        self.repo.delete(&principal.id).await?;

        tracing::info!(account_id = %principal.id, "Account deleted");

        Ok(())
    }
}

//! Update Profile Use Case
//!
//! Applies a partial profile update to the caller's own account. The target
//! is always the authenticated principal; it is never read from the body.

use std::sync::Arc;

use crate::application::principal::Principal;
use crate::domain::entity::account::AccountPatch;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    email::Email,
    profile::{Age, PersonName},
};
use crate::error::{AccountError, AccountResult};

/// Update input; absent fields are left unchanged
#[derive(Debug, Default)]
pub struct UpdateProfileInput {
    pub email: Option<String>,
    pub name: Option<String>,
    pub age: Option<i32>,
}

/// Update profile use case
pub struct UpdateProfileUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateProfileUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        principal: &Principal,
        input: UpdateProfileInput,
    ) -> AccountResult<()> {
        let patch = AccountPatch {
            email: input.email.map(Email::new).transpose()?,
            name: input.name.map(PersonName::new).transpose()?,
            age: input.age.map(Age::new).transpose()?,
        };

        if patch.is_empty() {
            return Err(AccountError::InvalidArgument(
                "at least one of email, name or age is required".to_string(),
            ));
        }

        self.repo.update(&principal.id, &patch).await?;

        tracing::info!(account_id = %principal.id, "Profile updated");

        Ok(())
    }
}

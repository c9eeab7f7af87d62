//! In-Memory Repository Implementation
//!
//! Same contract as the PostgreSQL store; used by tests and local runs
//! without a database. Each operation holds the lock for its whole
//! read-modify-write, which stands in for single-statement atomicity.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::AccountId;
use tokio::sync::RwLock;

use crate::domain::entity::account::{Account, AccountPatch};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::login::Login;
use crate::error::{AccountError, AccountResult};

#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows, deleted ones included
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: &Account) -> AccountResult<()> {
        let mut accounts = self.accounts.write().await;

        let login_taken = accounts
            .values()
            .any(|a| !a.is_deleted() && a.login == account.login);
        if login_taken {
            return Err(AccountError::DuplicateLogin);
        }
        if accounts.contains_key(&account.id) {
            return Err(AccountError::Internal(format!(
                "Duplicate account id {}",
                account.id
            )));
        }

        accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn get_by_login(&self, login: &Login) -> AccountResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| !a.is_deleted() && &a.login == login)
            .cloned())
    }

    async fn get_by_id(&self, id: &AccountId) -> AccountResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(id).filter(|a| !a.is_deleted()).cloned())
    }

    async fn update(&self, id: &AccountId, patch: &AccountPatch) -> AccountResult<()> {
        let mut accounts = self.accounts.write().await;
        let account = live_mut(&mut accounts, id)?;
        account.apply(patch);
        Ok(())
    }

    async fn refresh_token(&self, id: &AccountId, token: &str) -> AccountResult<()> {
        let mut accounts = self.accounts.write().await;
        let account = live_mut(&mut accounts, id)?;
        account.refresh_token = Some(token.to_string());
        account.updated_at = chrono::Utc::now();
        Ok(())
    }

    async fn delete(&self, id: &AccountId) -> AccountResult<()> {
        let mut accounts = self.accounts.write().await;
        let account = live_mut(&mut accounts, id)?;
        account.mark_deleted();
        Ok(())
    }

    async fn ping(&self) -> AccountResult<()> {
        Ok(())
    }
}

fn live_mut<'a>(
    accounts: &'a mut HashMap<AccountId, Account>,
    id: &AccountId,
) -> AccountResult<&'a mut Account> {
    accounts
        .get_mut(id)
        .filter(|a| !a.is_deleted())
        .ok_or(AccountError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{email::Email, profile::Age, profile::PersonName};
    use platform::password::ClearTextPassword;

    fn account(login: &str) -> Account {
        let hash = ClearTextPassword::for_verification("Tr0ub4dor&3".to_string())
            .hash(None)
            .unwrap();
        Account::new(
            Login::new(login).unwrap(),
            Email::new("a@x.com").unwrap(),
            PersonName::new("Alice").unwrap(),
            Age::new(30).unwrap(),
            hash,
        )
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let repo = InMemoryAccountRepository::new();
        let alice = account("alice");
        repo.create(&alice).await.unwrap();

        let by_id = repo.get_by_id(&alice.id).await.unwrap().unwrap();
        assert_eq!(by_id.login.as_str(), "alice");
        let by_login = repo.get_by_login(&alice.login).await.unwrap().unwrap();
        assert_eq!(by_login.id, alice.id);
    }

    #[tokio::test]
    async fn test_duplicate_login_rejected() {
        let repo = InMemoryAccountRepository::new();
        repo.create(&account("alice")).await.unwrap();
        let err = repo.create(&account("alice")).await.unwrap_err();
        assert!(matches!(err, AccountError::DuplicateLogin));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_deleted_account_is_invisible() {
        let repo = InMemoryAccountRepository::new();
        let alice = account("alice");
        repo.create(&alice).await.unwrap();
        repo.refresh_token(&alice.id, "t1").await.unwrap();

        repo.delete(&alice.id).await.unwrap();

        assert!(repo.get_by_id(&alice.id).await.unwrap().is_none());
        assert!(repo.get_by_login(&alice.login).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(&alice.id).await,
            Err(AccountError::NotFound)
        ));
        assert!(matches!(
            repo.refresh_token(&alice.id, "t2").await,
            Err(AccountError::NotFound)
        ));
        assert!(matches!(
            repo.update(&alice.id, &AccountPatch::default()).await,
            Err(AccountError::NotFound)
        ));

        // The login is free again once its holder is deleted
        repo.create(&account("alice")).await.unwrap();
    }

    #[tokio::test]
    async fn test_refresh_token_overwrites() {
        let repo = InMemoryAccountRepository::new();
        let alice = account("alice");
        repo.create(&alice).await.unwrap();

        repo.refresh_token(&alice.id, "first").await.unwrap();
        repo.refresh_token(&alice.id, "second").await.unwrap();

        let stored = repo.get_by_id(&alice.id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_unknown_id_not_found() {
        let repo = InMemoryAccountRepository::new();
        let id = AccountId::new();
        assert!(repo.get_by_id(&id).await.unwrap().is_none());
        assert!(matches!(
            repo.refresh_token(&id, "t").await,
            Err(AccountError::NotFound)
        ));
    }
}

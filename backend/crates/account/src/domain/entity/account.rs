//! Account Entity
//!
//! One record per user: identity, credentials, current refresh token and
//! profile. Stores never return deleted accounts.

use chrono::{DateTime, Utc};
use kernel::id::AccountId;
use platform::password::HashedPassword;
use std::fmt;

use crate::domain::value_object::{
    account_state::AccountState, email::Email, login::Login, profile::Age, profile::PersonName,
    role::Role,
};

#[derive(Clone)]
pub struct Account {
    /// Server-generated, immutable
    pub id: AccountId,
    /// Unique among live accounts, immutable
    pub login: Login,
    pub email: Email,
    pub name: PersonName,
    pub age: Age,
    pub password_hash: HashedPassword,
    /// The only refresh token currently accepted for this account
    pub refresh_token: Option<String>,
    pub role: Role,
    pub state: AccountState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// New active account with the default role and no session
    pub fn new(
        login: Login,
        email: Email,
        name: PersonName,
        age: Age,
        password_hash: HashedPassword,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: AccountId::new(),
            login,
            email,
            name,
            age,
            password_hash,
            refresh_token: None,
            role: Role::default(),
            state: AccountState::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn is_deleted(&self) -> bool {
        self.state.is_deleted()
    }

    /// Apply the present fields of `patch`
    pub fn apply(&mut self, patch: &AccountPatch) {
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        self.updated_at = Utc::now();
    }

    /// Soft delete; also drops the live refresh token
    pub fn mark_deleted(&mut self) {
        self.state = AccountState::Deleted;
        self.refresh_token = None;
        self.updated_at = Utc::now();
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("login", &self.login)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("age", &self.age)
            .field("password_hash", &self.password_hash)
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("role", &self.role)
            .field("state", &self.state)
            .finish()
    }
}

/// Partial profile update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountPatch {
    pub email: Option<Email>,
    pub name: Option<PersonName>,
    pub age: Option<Age>,
}

impl AccountPatch {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none() && self.age.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::ClearTextPassword;

    fn sample() -> Account {
        let hash = ClearTextPassword::for_verification("Tr0ub4dor&3".to_string())
            .hash(None)
            .unwrap();
        Account::new(
            Login::new("alice").unwrap(),
            Email::new("a@x.com").unwrap(),
            PersonName::new("Alice").unwrap(),
            Age::new(30).unwrap(),
            hash,
        )
    }

    #[test]
    fn test_new_account_defaults() {
        let account = sample();
        assert_eq!(account.role, Role::User);
        assert_eq!(account.state, AccountState::Active);
        assert!(account.refresh_token.is_none());
    }

    #[test]
    fn test_apply_patch_only_touches_present_fields() {
        let mut account = sample();
        let patch = AccountPatch {
            age: Some(Age::new(31).unwrap()),
            ..Default::default()
        };
        account.apply(&patch);
        assert_eq!(account.age.value(), 31);
        assert_eq!(account.email.as_str(), "a@x.com");
        assert_eq!(account.name.as_str(), "Alice");
    }

    #[test]
    fn test_mark_deleted_clears_token() {
        let mut account = sample();
        account.refresh_token = Some("token".to_string());
        account.mark_deleted();
        assert!(account.is_deleted());
        assert!(account.refresh_token.is_none());
    }

    #[test]
    fn test_debug_hides_token() {
        let mut account = sample();
        account.refresh_token = Some("secret.refresh.token".to_string());
        let out = format!("{account:?}");
        assert!(!out.contains("secret.refresh.token"));
        assert!(!out.contains("$argon2id$"));
    }

    #[test]
    fn test_empty_patch() {
        assert!(AccountPatch::default().is_empty());
        let patch = AccountPatch {
            name: Some(PersonName::new("Bob").unwrap()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}

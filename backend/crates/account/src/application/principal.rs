//! Principal
//!
//! The verified identity behind a request, built from access-token claims.

use kernel::id::AccountId;

use crate::application::token::{Claims, TokenType};
use crate::domain::value_object::role::Role;
use crate::error::{AccountError, AccountResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub id: AccountId,
    pub role: Role,
}

impl Principal {
    /// Only access tokens authenticate requests
    pub fn from_claims(claims: &Claims) -> AccountResult<Self> {
        if claims.typ != TokenType::Access {
            return Err(AccountError::InvalidToken);
        }
        Ok(Self {
            id: claims.account_id()?,
            role: claims.role,
        })
    }

    pub fn require_privileged(&self) -> AccountResult<()> {
        if self.role.is_privileged() {
            Ok(())
        } else {
            Err(AccountError::AccessDenied)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_from_access_claims() {
        let id = AccountId::new();
        let claims = Claims::new(&id, Role::User, TokenType::Access, Duration::from_secs(60));
        let principal = Principal::from_claims(&claims).unwrap();
        assert_eq!(principal.id, id);
        assert_eq!(principal.role, Role::User);
    }

    #[test]
    fn test_refresh_claims_rejected() {
        let claims = Claims::new(&AccountId::new(), Role::Admin, TokenType::Refresh, Duration::from_secs(60));
        assert!(matches!(
            Principal::from_claims(&claims),
            Err(AccountError::InvalidToken)
        ));
    }

    #[test]
    fn test_require_privileged() {
        let user = Principal { id: AccountId::new(), role: Role::User };
        let admin = Principal { id: AccountId::new(), role: Role::Admin };
        assert!(matches!(user.require_privileged(), Err(AccountError::AccessDenied)));
        assert!(admin.require_privileged().is_ok());
    }
}

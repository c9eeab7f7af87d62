//! Account State
//!
//! `Active` → `Deleted` is the only transition, and it is terminal.
//! Storage keeps the state as the `deleted` flag.

use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountState {
    #[default]
    #[display("active")]
    Active,
    #[display("deleted")]
    Deleted,
}

impl AccountState {
    #[inline]
    pub const fn from_deleted_flag(deleted: bool) -> Self {
        if deleted {
            AccountState::Deleted
        } else {
            AccountState::Active
        }
    }

    #[inline]
    pub const fn is_deleted(&self) -> bool {
        matches!(self, AccountState::Deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_mapping() {
        assert_eq!(AccountState::from_deleted_flag(false), AccountState::Active);
        assert!(AccountState::from_deleted_flag(true).is_deleted());
        assert_eq!(AccountState::default().to_string(), "active");
    }
}

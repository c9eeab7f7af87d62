use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Account role, stored as a row of the `roles` table
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    #[display("user")]
    User,
    #[display("admin")]
    Admin,
}

impl Role {
    /// Value of `roles.name` and of the `role` claim
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// May read other accounts
    #[inline]
    pub const fn is_privileged(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

//! Login Value Object
//!
//! The login is the account's unique, immutable handle. It is what clients
//! present at sign-in and what administrators search by.
//!
//! ## Rules
//! - NFKC normalization → trim → lowercase, in that order
//! - ASCII only: a-z, 0-9, `_`, `.`, `-`
//! - 3 to 32 characters after normalization
//! - Starts and ends with a letter, digit or `_`
//! - No consecutive dots

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

pub const LOGIN_MIN_LENGTH: usize = 3;
pub const LOGIN_MAX_LENGTH: usize = 32;

const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-'];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("Login cannot be empty")]
    Empty,

    #[error("Login is too short ({length} chars, minimum {min})")]
    TooShort { length: usize, min: usize },

    #[error("Login is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },

    #[error("Invalid character '{ch}' in login. Only a-z, 0-9, _, ., - are allowed")]
    InvalidCharacter { ch: char },

    #[error("Login must start and end with a-z, 0-9 or _")]
    InvalidBoundary,

    #[error("Login cannot contain consecutive dots (..)")]
    ConsecutiveDots,
}

/// Validated, canonical (lowercase) login
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Login(String);

impl Login {
    pub fn new(input: impl AsRef<str>) -> Result<Self, LoginError> {
        let canonical = Self::normalize(input.as_ref());
        Self::validate(&canonical)?;
        Ok(Self(canonical))
    }

    /// NFKC, trimmed, lowercased
    fn normalize(input: &str) -> String {
        input.nfkc().collect::<String>().trim().to_lowercase()
    }

    /// Rebuild from a stored value (already validated at signup)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(canonical: &str) -> Result<(), LoginError> {
        let (Some(first), Some(last)) = (canonical.chars().next(), canonical.chars().next_back())
        else {
            return Err(LoginError::Empty);
        };

        let length = canonical.chars().count();
        if length < LOGIN_MIN_LENGTH {
            return Err(LoginError::TooShort {
                length,
                min: LOGIN_MIN_LENGTH,
            });
        }
        if length > LOGIN_MAX_LENGTH {
            return Err(LoginError::TooLong {
                length,
                max: LOGIN_MAX_LENGTH,
            });
        }

        if let Some(ch) = canonical.chars().find(|&c| !Self::is_valid_char(c)) {
            return Err(LoginError::InvalidCharacter { ch });
        }

        if !Self::is_valid_boundary(first) || !Self::is_valid_boundary(last) {
            return Err(LoginError::InvalidBoundary);
        }

        if canonical.contains("..") {
            return Err(LoginError::ConsecutiveDots);
        }

        Ok(())
    }

    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || ALLOWED_SPECIAL_CHARS.contains(&c)
    }

    #[inline]
    fn is_valid_boundary(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
    }
}

impl fmt::Debug for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Login").field(&self.0).finish()
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Login {
    type Error = LoginError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Login> for String {
    fn from(login: Login) -> Self {
        login.0
    }
}

impl AsRef<str> for Login {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

//! Profile Value Objects
//!
//! The mutable part of an account: display name and age.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

pub const NAME_MAX_LENGTH: usize = 100;
pub const AGE_MAX: i32 = 150;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name must be at most {NAME_MAX_LENGTH} characters")]
    NameTooLong,

    #[error("Name contains control characters")]
    NameControlCharacter,

    #[error("Age must be between 0 and {AGE_MAX} (got {0})")]
    AgeOutOfRange(i32),
}

/// Display name, NFKC-normalized and trimmed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, ProfileError> {
        let name = input.as_ref().nfkc().collect::<String>().trim().to_string();

        if name.is_empty() {
            return Err(ProfileError::EmptyName);
        }
        if name.chars().count() > NAME_MAX_LENGTH {
            return Err(ProfileError::NameTooLong);
        }
        if name.chars().any(char::is_control) {
            return Err(ProfileError::NameControlCharacter);
        }

        Ok(Self(name))
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PersonName {
    type Error = ProfileError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PersonName> for String {
    fn from(name: PersonName) -> Self {
        name.0
    }
}

/// Age in whole years
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Age(i32);

impl Age {
    pub fn new(years: i32) -> Result<Self, ProfileError> {
        if !(0..=AGE_MAX).contains(&years) {
            return Err(ProfileError::AgeOutOfRange(years));
        }
        Ok(Self(years))
    }

    pub fn from_db(years: i32) -> Self {
        Self(years)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Age {
    type Error = ProfileError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Age> for i32 {
    fn from(age: Age) -> Self {
        age.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_name() {
        assert_eq!(PersonName::new("  Alice ").unwrap().as_str(), "Alice");
        assert_eq!(PersonName::new("").unwrap_err(), ProfileError::EmptyName);
        assert_eq!(
            PersonName::new("x".repeat(NAME_MAX_LENGTH + 1)).unwrap_err(),
            ProfileError::NameTooLong
        );
        assert_eq!(
            PersonName::new("Al\u{0}ice").unwrap_err(),
            ProfileError::NameControlCharacter
        );
    }

    #[test]
    fn test_age_range() {
        assert_eq!(Age::new(30).unwrap().value(), 30);
        assert!(Age::new(0).is_ok());
        assert!(Age::new(AGE_MAX).is_ok());
        assert_eq!(Age::new(-1).unwrap_err(), ProfileError::AgeOutOfRange(-1));
        assert!(Age::new(AGE_MAX + 1).is_err());
    }
}

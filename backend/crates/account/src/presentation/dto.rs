//! API DTOs (Data Transfer Objects)
//!
//! Requests that carry passwords or tokens do not implement `Debug`.

use serde::{Deserialize, Serialize};

use crate::application::TokenPair;
use crate::domain::entity::account::Account;

// ============================================================================
// Sign Up
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub login: String,
    pub email: String,
    pub password: String,
    pub name: String,
    pub age: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserResponse,
}

// ============================================================================
// Login / Refresh
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    /// Account ID
    pub id: String,
    pub refresh_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

// ============================================================================
// Profile
// ============================================================================

/// Absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub age: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Public view of an account; no credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub login: String,
    pub email: String,
    pub name: String,
    pub age: i32,
    pub role: String,
}

impl From<&Account> for UserResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            login: account.login.to_string(),
            email: account.email.to_string(),
            name: account.name.to_string(),
            age: account.age.value(),
            role: account.role.code().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEnvelope {
    pub user: UserResponse,
}

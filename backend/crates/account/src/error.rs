//! Account Error Types
//!
//! Account-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::{PasswordHashError, PasswordPolicyError};
use thiserror::Error;

use crate::domain::value_object::{EmailError, LoginError, ProfileError};

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

/// Account-specific error variants
#[derive(Debug, Error)]
pub enum AccountError {
    /// Password rejected by the strength policy
    #[error("Weak password: {0}")]
    WeakPassword(#[from] PasswordPolicyError),

    /// A live account already uses this login
    #[error("Login is already taken")]
    DuplicateLogin,

    /// Unknown login or wrong password (deliberately indistinguishable)
    #[error("Invalid login or password")]
    InvalidCredentials,

    /// Account absent or deleted
    #[error("Account not found")]
    NotFound,

    /// Token failed verification, expired, or is not the stored one
    #[error("Invalid or expired token")]
    InvalidToken,

    /// No credentials presented
    #[error("Authentication required")]
    Unauthenticated,

    /// Malformed input or metadata
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Authenticated but not allowed
    #[error("Access denied")]
    AccessDenied,

    /// Database error
    #[error("Database error: {0}")]
    Persistence(#[from] sqlx::Error),

    /// Internal error (signing, corrupted row)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::WeakPassword(_) | AccountError::InvalidArgument(_) => {
                ErrorKind::BadRequest
            }
            AccountError::DuplicateLogin => ErrorKind::Conflict,
            AccountError::InvalidCredentials
            | AccountError::InvalidToken
            | AccountError::Unauthenticated => ErrorKind::Unauthorized,
            AccountError::AccessDenied => ErrorKind::Forbidden,
            AccountError::NotFound => ErrorKind::NotFound,
            AccountError::Persistence(_) | AccountError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Server errors are rendered opaque; their detail only reaches the log.
    pub fn to_app_error(&self) -> AppError {
        let kind = self.kind();
        if kind.is_server_error() {
            return AppError::new(kind, "Internal server error");
        }

        let err = AppError::new(kind, self.to_string());
        match self {
            AccountError::InvalidToken | AccountError::Unauthenticated => {
                err.with_action("Sign in again to obtain a new token")
            }
            AccountError::WeakPassword(_) => {
                err.with_action("Use a longer password mixing letters, digits and symbols")
            }
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AccountError::Persistence(e) => {
                tracing::error!(error = %e, "Account database error");
            }
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            AccountError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AccountError::InvalidToken => {
                tracing::warn!("Invalid token presented");
            }
            AccountError::AccessDenied => {
                tracing::warn!("Access denied for non-privileged principal");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        err.to_app_error()
    }
}

impl From<LoginError> for AccountError {
    fn from(err: LoginError) -> Self {
        AccountError::InvalidArgument(err.to_string())
    }
}

impl From<EmailError> for AccountError {
    fn from(err: EmailError) -> Self {
        AccountError::InvalidArgument(err.to_string())
    }
}

impl From<ProfileError> for AccountError {
    fn from(err: ProfileError) -> Self {
        AccountError::InvalidArgument(err.to_string())
    }
}

impl From<PasswordHashError> for AccountError {
    fn from(err: PasswordHashError) -> Self {
        AccountError::Internal(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AccountError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AccountError::Internal(format!("token signing failed: {err}"))
    }
}

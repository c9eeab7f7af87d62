//! Application Error
//!
//! [`AppError`] is what leaves the service: a kind, a client-safe message,
//! an optional hint, and (for logs only) the underlying cause. Crate-local
//! error enums convert into it at the HTTP boundary.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

type Message = Cow<'static, str>;
type Source = Box<dyn Error + Send + Sync + 'static>;

/// Unified error rendered to clients
///
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::Unauthorized, "Invalid or expired token")
///     .with_action("Please sign in again");
/// assert_eq!(err.status_code(), 401);
/// ```
#[derive(Debug)]
pub struct AppError {
    kind: ErrorKind,
    message: Message,
    action: Option<Message>,
    source: Option<Source>,
}

pub type AppResult<T> = Result<T, AppError>;

macro_rules! shorthand {
    ($($name:ident => $kind:ident),* $(,)?) => {
        $(
            #[inline]
            pub fn $name(message: impl Into<Message>) -> Self {
                Self::new(ErrorKind::$kind, message)
            }
        )*
    };
}

impl AppError {
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Message>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
            source: None,
        }
    }

    shorthand! {
        bad_request => BadRequest,
        forbidden => Forbidden,
        not_found => NotFound,
        conflict => Conflict,
        internal => InternalServerError,
        service_unavailable => ServiceUnavailable,
    }

    /// Hint telling the client what to do next
    #[inline]
    pub fn with_action(mut self, action: impl Into<Message>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Underlying cause; reachable through [`Error::source`], never rendered
    #[inline]
    pub fn with_source(mut self, source: impl Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.status_code(), self.kind, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorthands_pick_their_kind() {
        assert_eq!(AppError::bad_request("x").kind(), ErrorKind::BadRequest);
        assert_eq!(AppError::forbidden("x").kind(), ErrorKind::Forbidden);
        assert_eq!(AppError::not_found("x").kind(), ErrorKind::NotFound);
        assert_eq!(AppError::conflict("x").kind(), ErrorKind::Conflict);
        assert_eq!(AppError::internal("x").status_code(), 500);
        assert_eq!(AppError::service_unavailable("x").status_code(), 503);
    }

    #[test]
    fn test_source_is_kept_but_not_displayed() {
        let io_err = std::io::Error::other("connection reset by peer");
        let err = AppError::internal("Internal server error").with_source(io_err);
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "500 Internal Server Error: Internal server error");
    }

    #[test]
    fn test_action_is_separate_from_message() {
        let err = AppError::new(ErrorKind::Unauthorized, "Invalid or expired token")
            .with_action("Please sign in again");
        assert_eq!(err.message(), "Invalid or expired token");
        assert_eq!(err.action(), Some("Please sign in again"));
        assert!(!err.to_string().contains("sign in"));
    }
}

//! Error Kind
//!
//! [`ErrorKind`] is the closed set of failure classes the service reports.
//! Each class owns exactly one HTTP status line.

use serde::Serialize;

/// Failure class, serialized as `SCREAMING_SNAKE_CASE`
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Conflict.status_code(), 409);
/// assert_eq!(ErrorKind::Conflict.as_str(), "Conflict");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Malformed input, including a malformed authorization header
    BadRequest,
    /// Missing, invalid or expired credentials
    Unauthorized,
    /// Authenticated, but the role does not allow it
    Forbidden,
    /// Absent or soft-deleted
    NotFound,
    RequestTimeout,
    /// Unique key already taken
    Conflict,
    InternalServerError,
    /// The database cannot be reached
    ServiceUnavailable,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 8] = [
        ErrorKind::BadRequest,
        ErrorKind::Unauthorized,
        ErrorKind::Forbidden,
        ErrorKind::NotFound,
        ErrorKind::RequestTimeout,
        ErrorKind::Conflict,
        ErrorKind::InternalServerError,
        ErrorKind::ServiceUnavailable,
    ];

    const fn status_line(self) -> (u16, &'static str) {
        match self {
            ErrorKind::BadRequest => (400, "Bad Request"),
            ErrorKind::Unauthorized => (401, "Unauthorized"),
            ErrorKind::Forbidden => (403, "Forbidden"),
            ErrorKind::NotFound => (404, "Not Found"),
            ErrorKind::RequestTimeout => (408, "Request Timeout"),
            ErrorKind::Conflict => (409, "Conflict"),
            ErrorKind::InternalServerError => (500, "Internal Server Error"),
            ErrorKind::ServiceUnavailable => (503, "Service Unavailable"),
        }
    }

    #[inline]
    pub const fn status_code(self) -> u16 {
        self.status_line().0
    }

    /// Reason phrase; used as the problem document `title`
    #[inline]
    pub const fn as_str(self) -> &'static str {
        self.status_line().1
    }

    /// 5xx: detail is withheld from clients and the failure is logged at `error`
    #[inline]
    pub const fn is_server_error(self) -> bool {
        self.status_code() >= 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

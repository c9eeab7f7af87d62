//! Account (Identity) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository trait
//! - `application/` - Use cases, token issuing, configuration
//! - `infra/` - PostgreSQL and in-memory stores
//! - `presentation/` - HTTP handlers, DTOs, bearer gate, router
//!
//! ## Features
//! - Signup / login with login + password
//! - HS256 JWT access tokens (15 min) and server-tracked refresh tokens (10 h)
//! - Refresh-token rotation: issuing a pair invalidates the previous one
//! - Profile update and soft delete of the caller's own account
//! - Admin-only lookups by ID and by login
//!
//! ## Security Model
//! - Passwords hashed with Argon2id after a measured-entropy policy check
//! - Unknown login and wrong password are indistinguishable, in body and timing
//! - Only access tokens authenticate requests; refresh tokens only refresh

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AccountConfig;
pub use error::{AccountError, AccountResult};
pub use infra::{memory::InMemoryAccountRepository, postgres::PgAccountRepository};
pub use presentation::router::{account_router, app_router, health_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

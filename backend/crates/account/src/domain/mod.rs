//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{Account, AccountPatch};
pub use repository::{AccountRepository, LocalAccountRepository};
pub use value_object::{AccountState, Age, Email, Login, PersonName, Role};

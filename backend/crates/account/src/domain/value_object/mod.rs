//! Value Object Module

pub mod account_state;
pub mod email;
pub mod login;
pub mod profile;
pub mod role;

pub use account_state::AccountState;
pub use email::{Email, EmailError};
pub use login::{Login, LoginError};
pub use profile::{Age, PersonName, ProfileError};
pub use role::Role;

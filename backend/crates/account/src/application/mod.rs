//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod delete_account;
pub mod get_account;
pub mod principal;
pub mod refresh;
pub mod sign_in;
pub mod sign_up;
pub mod token;
pub mod update_profile;

// Re-exports
pub use config::AccountConfig;
pub use delete_account::DeleteAccountUseCase;
pub use get_account::GetAccountUseCase;
pub use principal::Principal;
pub use refresh::{RefreshInput, RefreshUseCase};
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use token::{Claims, TokenCodec, TokenIssuer, TokenPair, TokenType};
pub use update_profile::{UpdateProfileInput, UpdateProfileUseCase};

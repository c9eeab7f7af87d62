//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random secrets, SHA-256 fingerprints, constant-time compare)
//! - Password policy and hashing (measured entropy, Argon2id)

pub mod crypto;
pub mod password;

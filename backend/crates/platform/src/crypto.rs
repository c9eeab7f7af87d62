//! Token-adjacent cryptographic helpers
//!
//! Key material for development signing keys, log-safe token tags, and
//! comparison of stored secrets.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

/// Bytes kept from the digest by [`fingerprint`]
const FINGERPRINT_BYTES: usize = 8;

/// `len` bytes from the OS CSPRNG
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Short, non-reversible tag for a token, safe to put in logs
///
/// Base64 of the first eight bytes of SHA-256(token): 11 characters.
pub fn fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    URL_SAFE_NO_PAD.encode(&digest[..FINGERPRINT_BYTES])
}

/// Equality whose running time depends only on the lengths
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes() {
        let a = random_bytes(32);
        let b = random_bytes(32);
        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
        assert!(random_bytes(0).is_empty());
    }

    #[test]
    fn test_fingerprint_known_value() {
        // sha256("") = e3b0c442 98fc1c14 ...
        let expected = hex::decode("e3b0c44298fc1c14").unwrap();
        assert_eq!(fingerprint(""), URL_SAFE_NO_PAD.encode(expected));
    }

    #[test]
    fn test_fingerprint_is_stable_and_short() {
        let a = fingerprint("header.payload.signature");
        assert_eq!(a, fingerprint("header.payload.signature"));
        assert_ne!(a, fingerprint("header.payload.signaturf"));
        assert_eq!(a.len(), 11);
        assert!(!a.contains("payload"));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"refresh-token", b"refresh-token"));
        assert!(!constant_time_eq(b"refresh-token", b"refresh-tokem"));
        assert!(!constant_time_eq(b"refresh-token", b"refresh-toke"));
        assert!(constant_time_eq(b"", b""));
    }
}

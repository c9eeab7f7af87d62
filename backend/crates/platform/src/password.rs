//! Password Hashing and Verification
//!
//! - Strength policy: structural rules (NIST SP 800-63B lengths, no control
//!   characters, no well-known patterns) plus a measured entropy floor
//! - Argon2id hashing with a random salt; the PHC output embeds algorithm,
//!   parameters and salt
//! - Constant-time verification that never errors on mismatch
//! - Zeroization of clear text on drop, optional application pepper

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length in code points (NIST: SHALL be at least 8)
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length in code points (NIST: SHOULD permit at least 64)
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Default entropy floor in bits
pub const DEFAULT_MIN_ENTROPY_BITS: f64 = 50.0;

/// Symbols commonly used as letter substitutions
const REPLACE_CHARS: &str = "!@$&*";

/// Word separators
const SEPARATOR_CHARS: &str = "_-., ";

/// Remaining printable ASCII symbols
const OTHER_SPECIAL_CHARS: &str = "\"#%'()+/:;<=>?[\\]^{|}~`";

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    #[error("Password is too common or follows a predictable pattern")]
    CommonPattern,

    #[error("Password is too weak ({actual:.1} bits of entropy, {required:.0} required)")]
    InsufficientEntropy { required: f64, actual: f64 },
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password, erased from memory on drop
///
/// Not `Clone`; `Debug` output is redacted.
///
/// ```rust
/// use platform::password::{ClearTextPassword, DEFAULT_MIN_ENTROPY_BITS};
///
/// let password = ClearTextPassword::new("Tr0ub4dor&3".to_string(), DEFAULT_MIN_ENTROPY_BITS)?;
/// let hashed = password.hash(None)?;
/// assert!(hashed.verify(&password, None));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Validate a new password against the full policy
    ///
    /// Unicode is NFKC-normalized first; lengths count code points.
    /// `min_entropy_bits` is compared against [`estimate_entropy`].
    pub fn new(raw: String, min_entropy_bits: f64) -> Result<Self, PasswordPolicyError> {
        let password = Self::for_verification(raw);
        let normalized = password.0.as_str();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        // Space, tab and newline are allowed
        if normalized
            .chars()
            .any(|ch| ch.is_control() && ch != ' ' && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        if is_common_pattern(normalized) {
            return Err(PasswordPolicyError::CommonPattern);
        }

        let entropy = estimate_entropy(normalized);
        if entropy < min_entropy_bits {
            return Err(PasswordPolicyError::InsufficientEntropy {
                required: min_entropy_bits,
                actual: entropy,
            });
        }

        Ok(password)
    }

    /// Normalize without policy checks
    ///
    /// For passwords presented at login: the policy applied when the hash was
    /// created, not now.
    pub fn for_verification(raw: String) -> Self {
        let normalized: String = raw.nfkc().collect();
        let mut raw = raw;
        raw.zeroize();
        Self(normalized)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Argon2id hash (OWASP parameters: m=19 MiB, t=2, p=1)
    ///
    /// `pepper` is an optional application-wide secret appended to the input.
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let mut input = self.peppered(pepper);
        let salt = SaltString::generate(&mut OsRng);

        let result = Argon2::default()
            .hash_password(&input, &salt)
            .map(|hash| HashedPassword {
                hash: hash.to_string(),
            })
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()));

        input.zeroize();
        result
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Vec<u8> {
        let mut bytes = self.as_bytes().to_vec();
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hash used to burn the same Argon2 work when no account matched
static DUMMY_HASH: LazyLock<Option<HashedPassword>> = LazyLock::new(|| {
    ClearTextPassword::for_verification("dummy-password-for-timing".to_string())
        .hash(None)
        .ok()
});

/// Argon2id hash in PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Parse a stored PHC string
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// Argon2 compares in constant time. Mismatch and unparsable hashes both
    /// return `false`.
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&self.hash) else {
            return false;
        };

        let mut input = password.peppered(pepper);
        let ok = Argon2::default()
            .verify_password(&input, &parsed_hash)
            .is_ok();
        input.zeroize();
        ok
    }

    /// Spend one verification worth of work and return `false`
    ///
    /// Called when the login is unknown so the response time does not reveal
    /// whether the account exists.
    pub fn verify_dummy(password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        if let Some(dummy) = DUMMY_HASH.as_ref() {
            let _ = dummy.verify(password, pepper);
        }
        false
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Strength estimation
// ============================================================================

/// Estimated entropy in bits: `log2(pool) * effective_length`
///
/// The pool is the sum of the character classes present (26 lower, 26 upper,
/// 10 digits, 5 substitution symbols, 5 separators, 23 other symbols) plus one
/// per distinct character outside those classes. The effective length drops
/// every character past the second of a run that repeats a character or
/// walks a letter/digit sequence ("aaaa", "abcd", "4321").
pub fn estimate_entropy(password: &str) -> f64 {
    let pool = character_pool(password);
    if pool <= 1 {
        return 0.0;
    }
    (pool as f64).log2() * effective_length(password) as f64
}

fn character_pool(password: &str) -> usize {
    let (mut lower, mut upper, mut digit) = (false, false, false);
    let (mut replace, mut separator, mut other_special) = (false, false, false);
    let mut others: HashSet<char> = HashSet::new();

    for ch in password.chars() {
        match ch {
            'a'..='z' => lower = true,
            'A'..='Z' => upper = true,
            '0'..='9' => digit = true,
            c if REPLACE_CHARS.contains(c) => replace = true,
            c if SEPARATOR_CHARS.contains(c) => separator = true,
            c if OTHER_SPECIAL_CHARS.contains(c) => other_special = true,
            c => {
                others.insert(c);
            }
        }
    }

    let mut pool = others.len();
    for (present, size) in [
        (lower, 26),
        (upper, 26),
        (digit, 10),
        (replace, REPLACE_CHARS.len()),
        (separator, SEPARATOR_CHARS.len()),
        (other_special, OTHER_SPECIAL_CHARS.len()),
    ] {
        if present {
            pool += size;
        }
    }
    pool
}

fn effective_length(password: &str) -> usize {
    let chars: Vec<char> = password.chars().collect();
    let mut length = 0;
    let mut run = 0usize;
    let mut step: Option<i64> = None;

    for (i, &ch) in chars.iter().enumerate() {
        if i == 0 {
            run = 1;
        } else {
            let prev = chars[i - 1];
            let delta = ch as i64 - prev as i64;
            let continues = delta == 0 || (delta.abs() == 1 && same_class(prev, ch));

            if continues && (run == 1 || step == Some(delta)) {
                run += 1;
            } else if continues {
                // A new run starting at `prev`
                run = 2;
            } else {
                run = 1;
            }
            step = continues.then_some(delta);
        }

        if run <= 2 {
            length += 1;
        }
    }
    length
}

fn same_class(a: char, b: char) -> bool {
    (a.is_ascii_lowercase() && b.is_ascii_lowercase())
        || (a.is_ascii_uppercase() && b.is_ascii_uppercase())
        || (a.is_ascii_digit() && b.is_ascii_digit())
}

/// Well-known weak passwords and keyboard walks
fn is_common_pattern(password: &str) -> bool {
    let lower = password.to_lowercase();

    // All same character ("aaaaaaaa")
    let mut chars = lower.chars();
    if let Some(first) = chars.next() {
        if chars.all(|c| c == first) {
            return true;
        }
    }

    if is_sequential_numbers(&lower) {
        return true;
    }

    const KEYBOARD_PATTERNS: &[&str] = &[
        "qwerty",
        "qwertyuiop",
        "asdfgh",
        "asdfghjkl",
        "zxcvbn",
        "qazwsx",
        "1qaz2wsx",
    ];
    if KEYBOARD_PATTERNS.iter().any(|p| lower.contains(p)) {
        return true;
    }

    const COMMON_PASSWORDS: &[&str] = &[
        "password",
        "password1",
        "password123",
        "12345678",
        "123456789",
        "1234567890",
        "abcdefgh",
        "letmein",
        "welcome",
        "admin123",
        "iloveyou",
        "sunshine",
        "princess",
        "football",
        "monkey",
        "shadow",
        "master",
        "dragon",
        "baseball",
        "michael",
        "trustno1",
    ];
    COMMON_PASSWORDS.contains(&lower.as_str())
}

/// Digits only, ascending or descending by one ("12345678", "9876")
fn is_sequential_numbers(s: &str) -> bool {
    let digits: Vec<u32> = s.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() < 4 || digits.len() != s.chars().count() {
        return false;
    }

    let is_ascending = digits
        .windows(2)
        .all(|w| w[1] == w[0] + 1 || (w[0] == 9 && w[1] == 0));
    let is_descending = digits
        .windows(2)
        .all(|w| w[0] == w[1] + 1 || (w[0] == 0 && w[1] == 9));

    is_ascending || is_descending
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(raw: &str) -> Result<ClearTextPassword, PasswordPolicyError> {
        ClearTextPassword::new(raw.to_string(), DEFAULT_MIN_ENTROPY_BITS)
    }

    #[test]
    fn test_password_too_short() {
        assert!(matches!(
            policy("Sh0rt!"),
            Err(PasswordPolicyError::TooShort { min: 8, actual: 6 })
        ));
    }

    #[test]
    fn test_password_too_long() {
        let long_password = "aB3$".repeat(MAX_PASSWORD_LENGTH / 4 + 1);
        assert!(matches!(
            policy(&long_password),
            Err(PasswordPolicyError::TooLong { .. })
        ));
    }

    #[test]
    fn test_password_whitespace_only() {
        assert_eq!(
            policy("          ").unwrap_err(),
            PasswordPolicyError::EmptyOrWhitespace
        );
        assert_eq!(policy("").unwrap_err(), PasswordPolicyError::EmptyOrWhitespace);
    }

    #[test]
    fn test_password_control_character() {
        assert_eq!(
            policy("Tr0ub4dor\u{7}&3").unwrap_err(),
            PasswordPolicyError::InvalidCharacter
        );
    }

    #[test]
    fn test_password_common_pattern() {
        assert_eq!(policy("password123").unwrap_err(), PasswordPolicyError::CommonPattern);
        assert_eq!(policy("qwertyuiop").unwrap_err(), PasswordPolicyError::CommonPattern);
        assert_eq!(policy("12345678").unwrap_err(), PasswordPolicyError::CommonPattern);
    }

    #[test]
    fn test_password_low_entropy() {
        // 8 lowercase letters: log2(26) * 8 ~= 37.6 bits
        let err = policy("sunnyday").unwrap_err();
        match err {
            PasswordPolicyError::InsufficientEntropy { required, actual } => {
                assert_eq!(required, DEFAULT_MIN_ENTROPY_BITS);
                assert!(actual > 37.0 && actual < 38.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_valid_passwords() {
        assert!(policy("Tr0ub4dor&3").is_ok());
        assert!(policy("MySecure#Pass2024!").is_ok());
        assert!(policy("correct horse battery staple").is_ok());
    }

    #[test]
    fn test_entropy_threshold_is_configurable() {
        assert!(ClearTextPassword::new("sunnyday".to_string(), 30.0).is_ok());
        assert!(ClearTextPassword::new("Tr0ub4dor&3".to_string(), 80.0).is_err());
    }

    #[test]
    fn test_estimate_entropy_pool() {
        assert_eq!(character_pool("abc"), 26);
        assert_eq!(character_pool("aB"), 52);
        assert_eq!(character_pool("aB3"), 62);
        assert_eq!(character_pool("aB3&"), 67);
        assert_eq!(character_pool("aB3&_"), 72);
        assert_eq!(character_pool("aB3&_#"), 72 + OTHER_SPECIAL_CHARS.len());
        // Characters outside every class count individually
        assert_eq!(character_pool("ééà"), 2);
    }

    #[test]
    fn test_effective_length_discounts_runs() {
        assert_eq!(effective_length("abXY"), 4);
        assert_eq!(effective_length("aaaa"), 2);
        assert_eq!(effective_length("abcdef"), 2);
        assert_eq!(effective_length("9876"), 2);
        assert_eq!(effective_length("ab12"), 4);
        assert_eq!(effective_length("Tr0ub4dor&3"), 11);
        assert_eq!(estimate_entropy(""), 0.0);
        assert_eq!(estimate_entropy("aaaaaaaaaaaa"), estimate_entropy("aa"));
    }

    #[test]
    fn test_hash_and_verify() {
        let password = policy("Tr0ub4dor&3").unwrap();
        let hashed = password.hash(None).unwrap();

        assert!(hashed.as_phc_string().starts_with("$argon2id$"));
        assert!(hashed.verify(&password, None));

        let wrong = ClearTextPassword::for_verification("Tr0ub4dor&4".to_string());
        assert!(!hashed.verify(&wrong, None));
    }

    #[test]
    fn test_hashes_are_salted() {
        let password = policy("Tr0ub4dor&3").unwrap();
        let a = password.hash(None).unwrap();
        let b = password.hash(None).unwrap();
        assert_ne!(a.as_phc_string(), b.as_phc_string());
    }

    #[test]
    fn test_hash_with_pepper() {
        let password = policy("Tr0ub4dor&3").unwrap();
        let pepper = b"service_pepper";
        let hashed = password.hash(Some(pepper)).unwrap();

        assert!(hashed.verify(&password, Some(pepper)));
        assert!(!hashed.verify(&password, None));
        assert!(!hashed.verify(&password, Some(b"wrong_pepper")));
    }

    #[test]
    fn test_verify_normalizes_input() {
        // U+FB01 (ligature fi) normalizes to "fi" under NFKC
        let password = policy("Pro\u{FB01}le#Secure2024").unwrap();
        let hashed = password.hash(None).unwrap();
        let presented = ClearTextPassword::for_verification("Profile#Secure2024".to_string());
        assert!(hashed.verify(&presented, None));
    }

    #[test]
    fn test_verify_dummy_is_always_false() {
        let password = ClearTextPassword::for_verification("anything at all".to_string());
        assert!(!HashedPassword::verify_dummy(&password, None));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let password = policy("Tr0ub4dor&3").unwrap();
        let hashed = password.hash(None).unwrap();

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&password, None));
    }

    #[test]
    fn test_invalid_phc_string() {
        assert!(HashedPassword::from_phc_string("not_a_valid_hash").is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::for_verification("secret-value".to_string());
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret-value"));
    }
}

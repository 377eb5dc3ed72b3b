//! Password hashing and verification
//!
//! Scheme: SHA-256 over plaintext + base64 salt + server-side pepper. The
//! stored record is `base64(salt):base64(digest)` with a fresh 16-byte salt
//! per hash. Verification is total: malformed records yield `false`, never an
//! error.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::{rngs::OsRng, RngCore};
use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};

use crate::config::AppConfig;

const SALT_SIZE: usize = 16;

/// Salted, peppered one-way password hasher
pub struct PasswordHasher {
    pepper: String,
}

impl PasswordHasher {
    pub fn new(pepper: impl Into<String>) -> Self {
        Self {
            pepper: pepper.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.security.pepper.expose_secret().clone())
    }

    /// Hash a password into a `salt:digest` record
    pub fn hash(&self, password: &str) -> String {
        let mut salt = [0u8; SALT_SIZE];
        OsRng.fill_bytes(&mut salt);
        let salt_b64 = BASE64.encode(salt);

        let digest = self.compute_digest(password, &salt_b64);

        format!("{}:{}", salt_b64, BASE64.encode(digest))
    }

    /// Verify a password against a stored record
    ///
    /// Fails closed: a record that does not split into exactly two base64
    /// segments is treated as a mismatch.
    pub fn verify(&self, password: &str, record: &str) -> bool {
        let mut parts = record.split(':');
        let (salt_b64, digest_b64) = match (parts.next(), parts.next(), parts.next()) {
            (Some(salt), Some(digest), None) => (salt, digest),
            _ => return false,
        };

        if BASE64.decode(salt_b64).is_err() {
            return false;
        }
        let stored_digest = match BASE64.decode(digest_b64) {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };

        let computed = self.compute_digest(password, salt_b64);

        constant_time_eq(&computed, &stored_digest)
    }

    // The salt enters the digest in its base64 form, matching the way the
    // record stores it.
    fn compute_digest(&self, password: &str, salt_b64: &str) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        hasher.update(salt_b64.as_bytes());
        hasher.update(self.pepper.as_bytes());
        hasher.finalize().into()
    }
}

/// Non-short-circuiting byte comparison to resist timing attacks
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_hasher() -> PasswordHasher {
        PasswordHasher::new("unit_test_pepper_value")
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = test_hasher();
        let record = hasher.hash("TestPassword123!");

        assert!(hasher.verify("TestPassword123!", &record));
        assert!(!hasher.verify("WrongPassword123!", &record));
    }

    #[test]
    fn test_record_format() {
        let hasher = test_hasher();
        let record = hasher.hash("secret");

        let parts: Vec<&str> = record.split(':').collect();
        assert_eq!(parts.len(), 2);
        assert_eq!(BASE64.decode(parts[0]).unwrap().len(), SALT_SIZE);
        assert_eq!(BASE64.decode(parts[1]).unwrap().len(), 32);
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = test_hasher();
        let record1 = hasher.hash("same-password");
        let record2 = hasher.hash("same-password");

        assert_ne!(record1, record2);
        assert!(hasher.verify("same-password", &record1));
        assert!(hasher.verify("same-password", &record2));
    }

    #[test]
    fn test_verify_malformed_records() {
        let hasher = test_hasher();

        assert!(!hasher.verify("password", ""));
        assert!(!hasher.verify("password", "no-separator"));
        assert!(!hasher.verify("password", "a:b:c"));
        assert!(!hasher.verify("password", "!!!not-base64!!!:AAAA"));
        assert!(!hasher.verify("password", "AAAA:!!!not-base64!!!"));
    }

    #[test]
    fn test_pepper_affects_digest() {
        let record = PasswordHasher::new("pepper-one").hash("password");
        assert!(!PasswordHasher::new("pepper-two").verify("password", &record));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }
}

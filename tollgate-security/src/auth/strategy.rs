//! Credential Verification
//!
//! The salted hash strategy stores `PBKDF2-HMAC-SHA512(credential, salt)` and
//! checks a presented credential by recomputing it with the stored salt.

use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha512;

/// Iteration count used when none is configured
pub const DEFAULT_HASH_ITERATIONS: u32 = 10_000;

const HASH_LENGTH: usize = 20;
const SALT_LENGTH: usize = 16;

/// Opaque verification material kept next to a user
pub trait AuthenticationData: Clone + Send + Sync + 'static {}

/// Verifies a presented credential against stored [`AuthenticationData`]
pub trait AuthenticationStrategy<A: AuthenticationData>: Send + Sync {
    fn authenticate(&self, credential: &str, data: &A) -> bool;
}

/// Hash and the salt it was computed with, both hex encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaltedHashAuthenticationData {
    pub hash: String,
    pub salt: String,
}

impl AuthenticationData for SaltedHashAuthenticationData {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaltedHashAuthenticationStrategy {
    iterations: u32,
}

impl Default for SaltedHashAuthenticationStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_ITERATIONS)
    }
}

impl SaltedHashAuthenticationStrategy {
    /// Zero iterations are raised to one
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Fresh random salt, 16 bytes from the OS generator as hex
    pub fn generate_salt(&self) -> String {
        let mut bytes = [0u8; SALT_LENGTH];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Deterministic digest of `credential` under `salt`: 40 upper-case hex characters
    pub fn generate_hash(&self, credential: &str, salt: &str) -> String {
        let mut digest = [0u8; HASH_LENGTH];
        pbkdf2_hmac::<Sha512>(
            credential.as_bytes(),
            salt.as_bytes(),
            self.iterations,
            &mut digest,
        );
        hex::encode_upper(digest)
    }

    /// Salt and hash for a credential being set or changed
    pub fn new_authentication_data(&self, credential: &str) -> SaltedHashAuthenticationData {
        let salt = self.generate_salt();
        let hash = self.generate_hash(credential, &salt);
        SaltedHashAuthenticationData { hash, salt }
    }
}

impl AuthenticationStrategy<SaltedHashAuthenticationData> for SaltedHashAuthenticationStrategy {
    fn authenticate(&self, credential: &str, data: &SaltedHashAuthenticationData) -> bool {
        let computed = self.generate_hash(credential, &data.salt);
        constant_time_eq(computed.as_bytes(), data.hash.as_bytes())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy() -> SaltedHashAuthenticationStrategy {
        // Low iteration count keeps the tests fast
        SaltedHashAuthenticationStrategy::new(10)
    }

    #[test]
    fn test_hash_is_deterministic() {
        let strategy = strategy();
        let first = strategy.generate_hash("secret", "salt-a");
        let second = strategy.generate_hash("secret", "salt-a");

        assert_eq!(first, second);
        assert_eq!(first.len(), 40);
        assert!(first
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }

    #[test]
    fn test_hash_depends_on_salt() {
        let strategy = strategy();
        assert_ne!(
            strategy.generate_hash("secret", "salt-a"),
            strategy.generate_hash("secret", "salt-b")
        );
    }

    #[test]
    fn test_hash_depends_on_iterations() {
        assert_ne!(
            SaltedHashAuthenticationStrategy::new(10).generate_hash("secret", "salt"),
            SaltedHashAuthenticationStrategy::new(11).generate_hash("secret", "salt")
        );
    }

    #[test]
    fn test_salts_are_fresh() {
        let strategy = strategy();
        let a = strategy.generate_salt();
        let b = strategy.generate_salt();

        assert_eq!(a.len(), SALT_LENGTH * 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_authenticate_matching_credential() {
        let strategy = strategy();
        let data = strategy.new_authentication_data("correct horse");

        assert!(strategy.authenticate("correct horse", &data));
        assert!(!strategy.authenticate("correct horse ", &data));
        assert!(!strategy.authenticate("", &data));
    }

    #[test]
    fn test_authenticate_rejects_tampered_data() {
        let strategy = strategy();
        let mut data = strategy.new_authentication_data("pw");
        data.salt = strategy.generate_salt();
        assert!(!strategy.authenticate("pw", &data));

        let data = SaltedHashAuthenticationData {
            hash: "ABC".to_string(),
            salt: "00".to_string(),
        };
        assert!(!strategy.authenticate("pw", &data));
    }

    #[test]
    fn test_zero_iterations_are_raised() {
        assert_eq!(SaltedHashAuthenticationStrategy::new(0).iterations(), 1);
        assert_eq!(
            SaltedHashAuthenticationStrategy::default().iterations(),
            DEFAULT_HASH_ITERATIONS
        );
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
    }
}

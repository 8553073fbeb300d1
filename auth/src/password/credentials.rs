use std::fmt;

use hmac::Hmac;
use hmac::Mac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha512;

use super::errors::PasswordError;

type HmacSha512 = Hmac<Sha512>;

/// Salt length in bytes (one SHA-512 block).
pub const SALT_LENGTH: usize = 128;

/// Stored half of a credential: the password MAC and the salt it was keyed with.
#[derive(Clone, PartialEq, Eq)]
pub struct SaltedHash {
    pub hash: Vec<u8>,
    pub salt: Vec<u8>,
}

impl fmt::Debug for SaltedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaltedHash")
            .field("hash", &format_args!("[{} bytes]", self.hash.len()))
            .field("salt", &format_args!("[{} bytes]", self.salt.len()))
            .finish()
    }
}

/// Salted password hashing and verification.
///
/// The hash is HMAC-SHA-512 of the UTF-8 password, keyed by a fresh random salt.
/// Holds no state: every call builds and drops its own MAC context.
#[derive(Debug, Clone, Copy)]
pub struct CredentialManager;

impl CredentialManager {
    /// Create a new credential manager.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password under a newly generated salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password (any length, including empty)
    ///
    /// # Returns
    /// The 64-byte hash together with the 128-byte salt used to key it
    ///
    /// # Errors
    /// * `HashingFailed` - The OS random source could not produce a salt
    pub fn hash_and_salt(&self, password: &str) -> Result<SaltedHash, PasswordError> {
        let mut salt = vec![0u8; SALT_LENGTH];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| PasswordError::HashingFailed(format!("Entropy source failed: {}", e)))?;

        let mut mac = keyed_mac(&salt)?;
        mac.update(password.as_bytes());
        let hash = mac.finalize().into_bytes().to_vec();

        Ok(SaltedHash { hash, salt })
    }

    /// Verify a plaintext password against a stored hash and salt.
    ///
    /// The comparison runs in constant time over the MAC length. A stored hash of
    /// the wrong length is a mismatch, not an error.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to check
    /// * `stored_hash` - Hash recorded at registration
    /// * `stored_salt` - Salt recorded at registration
    ///
    /// # Returns
    /// True iff the recomputed hash equals `stored_hash` byte for byte
    ///
    /// # Errors
    /// * `InvalidArgument` - Stored hash or salt is empty
    pub fn verify(
        &self,
        password: &str,
        stored_hash: &[u8],
        stored_salt: &[u8],
    ) -> Result<bool, PasswordError> {
        if stored_salt.is_empty() {
            return Err(PasswordError::InvalidArgument(
                "stored salt is empty".to_string(),
            ));
        }
        if stored_hash.is_empty() {
            return Err(PasswordError::InvalidArgument(
                "stored hash is empty".to_string(),
            ));
        }

        let mut mac = keyed_mac(stored_salt)?;
        mac.update(password.as_bytes());

        // verify_slice rejects length mismatches up front and otherwise
        // compares with subtle::ConstantTimeEq.
        Ok(mac.verify_slice(stored_hash).is_ok())
    }
}

impl Default for CredentialManager {
    fn default() -> Self {
        Self::new()
    }
}

fn keyed_mac(salt: &[u8]) -> Result<HmacSha512, PasswordError> {
    HmacSha512::new_from_slice(salt).map_err(|e| PasswordError::HashingFailed(e.to_string()))
}

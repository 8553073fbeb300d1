use std::fmt;

use super::errors::JwtError;

/// Symmetric secret used to sign and verify tokens.
///
/// Loaded once at startup and shared read-only. Construction fails for secrets
/// shorter than the HS512 output size, so a misconfigured key stops the process
/// before any request is served.
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Minimum secret length in bytes (512 bits).
    pub const MIN_LENGTH: usize = 64;

    /// Validate raw secret bytes.
    ///
    /// # Errors
    /// * `InvalidKey` - Secret is empty or shorter than `MIN_LENGTH`
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, JwtError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(JwtError::InvalidKey("signing key is not set".to_string()));
        }
        if secret.len() < Self::MIN_LENGTH {
            return Err(JwtError::InvalidKey(format!(
                "signing key must be at least {} bytes, got {}",
                Self::MIN_LENGTH,
                secret.len()
            )));
        }
        Ok(Self(secret))
    }

    /// Validate a secret taken from configuration (UTF-8 bytes of the string).
    pub fn from_secret(secret: &str) -> Result<Self, JwtError> {
        Self::new(secret.as_bytes())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey([REDACTED])")
    }
}

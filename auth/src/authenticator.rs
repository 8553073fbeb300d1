use crate::identity::Identity;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::SigningKey;
use crate::jwt::TokenIssuer;
use crate::password::CredentialManager;
use crate::password::PasswordError;
use crate::password::SaltedHash;

/// Authentication coordinator combining password verification and token issuance.
///
/// The two halves are independent: credentials are keyed by per-user salts,
/// tokens by the process-wide signing key.
pub struct Authenticator {
    credential_manager: CredentialManager,
    token_issuer: TokenIssuer,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed bearer token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `signing_key` - Validated key for token signing
    pub fn new(signing_key: &SigningKey) -> Self {
        Self {
            credential_manager: CredentialManager::new(),
            token_issuer: TokenIssuer::new(signing_key),
        }
    }

    /// Hash a password under a fresh salt for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<SaltedHash, PasswordError> {
        self.credential_manager.hash_and_salt(password)
    }

    /// Verify credentials and mint a token for `identity`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Hash recorded at registration
    /// * `stored_salt` - Salt recorded at registration
    /// * `identity` - Principal the token will assert
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash or salt is malformed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &[u8],
        stored_salt: &[u8],
        identity: &Identity,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self
            .credential_manager
            .verify(password, stored_hash, stored_salt)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_issuer.create_token(identity)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Mint a token without password verification.
    ///
    /// Used right after registration, where the password was just hashed.
    pub fn generate_token(&self, identity: &Identity) -> Result<String, JwtError> {
        self.token_issuer.create_token(identity)
    }

    /// Validate and decode a token issued by this authenticator.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.token_issuer.decode(token)
    }
}

use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::claims::Claims;
use super::errors::JwtError;
use super::key::SigningKey;
use crate::identity::Identity;

/// Lifetime of every issued token.
pub const TOKEN_LIFETIME_DAYS: i64 = 7;

/// Signs and verifies bearer tokens with HS512 (HMAC with SHA-512).
///
/// Holds only the encoding and decoding keys derived from one `SigningKey`;
/// safe to share across threads without locking.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenIssuer {
    /// Create a token issuer from a validated signing key.
    ///
    /// # Arguments
    /// * `key` - Process-wide signing key loaded from configuration
    pub fn new(key: &SigningKey) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            algorithm: Algorithm::HS512,
        }
    }

    /// Mint a token asserting `identity`, expiring seven days from now.
    ///
    /// # Returns
    /// Compact serialization `header.payload.signature`, each part base64url
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn create_token(&self, identity: &Identity) -> Result<String, JwtError> {
        let claims = Claims::for_identity(identity, Duration::days(TOKEN_LIFETIME_DAYS));
        let token = self.encode(&claims)?;

        tracing::debug!(subject = %identity.username, "Token issued");

        Ok(token)
    }

    /// Encode claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode a token, verifying its signature and expiry.
    ///
    /// Tokens must carry `exp` and `sub`.
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` is in the past
    /// * `InvalidToken` - Signature does not match this key
    /// * `MissingClaim` - `exp` or `sub` is absent
    /// * `DecodingFailed` - Token is malformed
    pub fn decode<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data =
            decode::<T>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::InvalidSignature => {
                    JwtError::InvalidToken("signature mismatch".to_string())
                }
                ErrorKind::MissingRequiredClaim(claim) => JwtError::MissingClaim(claim.clone()),
                _ => JwtError::DecodingFailed(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}

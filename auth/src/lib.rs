//! Authentication core
//!
//! Provides the credential and token primitives used by the account service:
//! - Salted password hashing (HMAC-SHA-512 keyed by a random per-user salt)
//! - Bearer token issuance and validation (HS512 JWT, seven-day lifetime)
//! - Authentication coordination
//!
//! Both halves are stateless and can be shared across threads behind an `Arc`.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::CredentialManager;
//!
//! let manager = CredentialManager::new();
//! let stored = manager.hash_and_salt("my_password").unwrap();
//! let is_valid = manager.verify("my_password", &stored.hash, &stored.salt).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Claims, Identity, SigningKey, TokenIssuer};
//!
//! let key = SigningKey::from_secret(
//!     "secret-key-at-least-sixty-four-bytes-long-because-hs512-needs-it!",
//! ).unwrap();
//! let issuer = TokenIssuer::new(&key);
//! let token = issuer.create_token(&Identity::new("alice")).unwrap();
//! let decoded: Claims = issuer.decode(&token).unwrap();
//! assert_eq!(decoded.sub.as_deref(), Some("alice"));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Identity, SigningKey};
//!
//! let key = SigningKey::from_secret(
//!     "secret-key-at-least-sixty-four-bytes-long-because-hs512-needs-it!",
//! ).unwrap();
//! let auth = Authenticator::new(&key);
//!
//! // Register: hash and salt password
//! let stored = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth
//!     .authenticate("password123", &stored.hash, &stored.salt, &Identity::new("alice"))
//!     .unwrap();
//!
//! // Validate token
//! let decoded = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.identity(), Some(Identity::new("alice")));
//! ```

pub mod authenticator;
pub mod identity;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use identity::Identity;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::SigningKey;
pub use jwt::TokenIssuer;
pub use password::CredentialManager;
pub use password::PasswordError;
pub use password::SaltedHash;

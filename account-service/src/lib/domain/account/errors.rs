use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username is empty")]
    Empty,

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all account operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Validation errors: request rejected, nothing stored
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Username is taken: {0}")]
    UsernameTaken(String),

    // Authentication errors
    #[error("Unknown username: {0}")]
    UnknownUsername(String),

    #[error("Invalid password")]
    InvalidPassword,

    // Internal errors
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl AccountError {
    /// True for failures the caller caused by presenting bad credentials.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            AccountError::UnknownUsername(_) | AccountError::InvalidPassword
        )
    }
}

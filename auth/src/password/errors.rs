use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

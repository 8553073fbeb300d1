pub mod credentials;
pub mod errors;

pub use credentials::CredentialManager;
pub use credentials::SaltedHash;
pub use credentials::SALT_LENGTH;
pub use errors::PasswordError;

pub mod claims;
pub mod errors;
pub mod issuer;
pub mod key;

pub use claims::Claims;
pub use errors::JwtError;
pub use issuer::TokenIssuer;
pub use issuer::TOKEN_LIFETIME_DAYS;
pub use key::SigningKey;

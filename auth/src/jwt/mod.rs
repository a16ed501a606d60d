pub mod claims;
pub mod codec;
pub mod errors;
pub mod secret;

pub use claims::expiry;
pub use claims::AccessClaims;
pub use claims::ACCESS_TOKEN_ISSUER;
pub use codec::issue_access_token;
pub use codec::validate_access_token;
pub use codec::TokenCodec;
pub use errors::SecretError;
pub use errors::TokenError;
pub use secret::SigningSecret;

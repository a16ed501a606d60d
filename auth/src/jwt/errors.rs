use thiserror::Error;

/// Error type for access token operations.
///
/// Every validation failure has its own variant so callers can log the cause,
/// while HTTP layers are expected to collapse them into a single 401.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token issuer is invalid: {found:?}")]
    InvalidIssuer { found: Option<String> },

    #[error("Token subject is not a valid user id: {0}")]
    InvalidSubject(String),

    #[error("Missing required claim: {0}")]
    MissingClaim(String),
}

impl TokenError {
    /// True for every failure produced while validating a presented token.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, TokenError::EncodingFailed(_))
    }
}

/// Error type for signing secret construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("Signing secret must not be empty")]
    Empty,
}

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::TokenError;

/// Issuer stamped into, and required of, every access token.
pub const ACCESS_TOKEN_ISSUER: &str = "chirpy-access";

/// Registered claims carried by an access token.
///
/// All fields are optional on the wire so that a token lacking one is reported
/// as the matching claim failure rather than a decoding failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Subject (user identifier, hyphenated UUID)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl AccessClaims {
    /// Claims for `subject`, issued at `issued_at` and valid for `ttl`.
    ///
    /// # Errors
    /// * `EncodingFailed` - `issued_at + ttl` is outside the representable range
    pub fn new(
        subject: Uuid,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let expires_at = expiry(issued_at, ttl)?;

        Ok(Self {
            iss: Some(ACCESS_TOKEN_ISSUER.to_string()),
            sub: Some(subject.to_string()),
            iat: Some(issued_at.timestamp()),
            exp: Some(expires_at.timestamp()),
        })
    }

    /// Check the issuer against [`ACCESS_TOKEN_ISSUER`].
    pub fn check_issuer(&self) -> Result<(), TokenError> {
        match self.iss.as_deref() {
            Some(ACCESS_TOKEN_ISSUER) => Ok(()),
            _ => Err(TokenError::InvalidIssuer {
                found: self.iss.clone(),
            }),
        }
    }

    /// Parse the subject as a user identifier.
    pub fn subject(&self) -> Result<Uuid, TokenError> {
        let sub = self
            .sub
            .as_deref()
            .ok_or_else(|| TokenError::InvalidSubject("subject claim is missing".to_string()))?;

        Uuid::parse_str(sub).map_err(|e| TokenError::InvalidSubject(e.to_string()))
    }
}

/// Instant `ttl` after `issued_at`.
///
/// # Errors
/// * `EncodingFailed` - The sum overflows the calendar range
pub fn expiry(issued_at: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>, TokenError> {
    issued_at.checked_add_signed(ttl).ok_or_else(|| {
        TokenError::EncodingFailed(format!(
            "token lifetime of {}s is out of range",
            ttl.num_seconds()
        ))
    })
}

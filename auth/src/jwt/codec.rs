use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::Error as JsonWebTokenError;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::AccessClaims;
use super::errors::TokenError;
use super::secret::SigningSecret;

/// Access token codec.
///
/// Issues and validates HS256-signed JWTs binding a user id to the
/// `chirpy-access` issuer and an expiry. Holds no state beyond the keys derived
/// from the signing secret, so one instance can be shared across requests.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Create a codec keyed by `secret`.
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issue an access token for `subject`, valid for `ttl` from now.
    ///
    /// # Returns
    /// Compact serialization (`header.payload.signature`)
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn issue(&self, subject: Uuid, ttl: Duration) -> Result<String, TokenError> {
        self.issue_at(subject, Utc::now(), ttl)
    }

    /// Issue an access token with an explicit issue time.
    pub fn issue_at(
        &self,
        subject: Uuid,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        self.encode(&AccessClaims::new(subject, issued_at, ttl)?)
    }

    /// Sign arbitrary access claims.
    pub fn encode(&self, claims: &AccessClaims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify signature and expiry, returning the raw claims.
    ///
    /// Issuer and subject are not checked here; see [`TokenCodec::validate`].
    ///
    /// # Errors
    /// * `Malformed` - Not a compact JWT, or header/payload undecodable
    /// * `InvalidSignature` - Signed with a different secret
    /// * `Expired` - `exp` is in the past
    /// * `MissingClaim` - `exp` is absent
    pub fn decode(&self, token: &str) -> Result<AccessClaims, TokenError> {
        decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(map_decode_error)
    }

    /// Validate a presented token and return the user id it names.
    ///
    /// # Errors
    /// Any `TokenError` other than `EncodingFailed`
    pub fn validate(&self, token: &str) -> Result<Uuid, TokenError> {
        let claims = self.decode(token)?;
        claims.check_issuer()?;
        claims.subject()
    }
}

fn map_decode_error(error: JsonWebTokenError) -> TokenError {
    match error.kind() {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::MissingRequiredClaim(claim) => TokenError::MissingClaim(claim.clone()),
        _ => TokenError::Malformed(error.to_string()),
    }
}

/// Issue a token for `subject` signed with `secret`.
pub fn issue_access_token(
    subject: Uuid,
    secret: &SigningSecret,
    ttl: Duration,
) -> Result<String, TokenError> {
    TokenCodec::new(secret).issue(subject, ttl)
}

/// Validate `token` against `secret` and return its subject.
pub fn validate_access_token(token: &str, secret: &SigningSecret) -> Result<Uuid, TokenError> {
    TokenCodec::new(secret).validate(token)
}

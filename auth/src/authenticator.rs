use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

use crate::bearer::extract_bearer_token;
use crate::bearer::BearerError;
use crate::jwt::expiry;
use crate::jwt::SigningSecret;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Lifetime of an access token unless overridden.
pub const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: i64 = 60 * 60;

/// Authentication coordinator combining password verification, bearer
/// extraction and access token handling.
///
/// Carries no mutable state; share it behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    access_token_ttl: Duration,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,

    /// Instant after which `access_token` is rejected
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Bearer error: {0}")]
    Bearer(#[from] BearerError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl AuthenticationError {
    /// Short, stable label for logs. Never includes credential material.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthenticationError::InvalidCredentials => "invalid_credentials",
            AuthenticationError::Password(PasswordError::Mismatch) => "password_mismatch",
            AuthenticationError::Password(PasswordError::HashingFailed(_)) => "hashing_failed",
            AuthenticationError::Bearer(BearerError::MissingHeader) => "missing_header",
            AuthenticationError::Bearer(BearerError::MalformedHeader { .. }) => "malformed_header",
            AuthenticationError::Bearer(BearerError::UnsupportedScheme) => "unsupported_scheme",
            AuthenticationError::Token(TokenError::EncodingFailed(_)) => "token_encoding_failed",
            AuthenticationError::Token(TokenError::Malformed(_)) => "token_malformed",
            AuthenticationError::Token(TokenError::InvalidSignature) => "token_signature",
            AuthenticationError::Token(TokenError::Expired) => "token_expired",
            AuthenticationError::Token(TokenError::InvalidIssuer { .. }) => "token_issuer",
            AuthenticationError::Token(TokenError::InvalidSubject(_)) => "token_subject",
            AuthenticationError::Token(TokenError::MissingClaim(_)) => "token_missing_claim",
        }
    }

    /// True when the caller should be answered with "unauthorized".
    pub fn is_unauthorized(&self) -> bool {
        match self {
            AuthenticationError::InvalidCredentials
            | AuthenticationError::Password(PasswordError::Mismatch)
            | AuthenticationError::Bearer(_) => true,
            AuthenticationError::Token(e) => e.is_rejection(),
            AuthenticationError::Password(PasswordError::HashingFailed(_)) => false,
        }
    }
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Key used to sign and verify access tokens
    ///
    /// # Returns
    /// Authenticator issuing one-hour access tokens
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(secret),
            access_token_ttl: Duration::seconds(DEFAULT_ACCESS_TOKEN_TTL_SECONDS),
        }
    }

    /// Override the lifetime of issued access tokens.
    pub fn with_access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = ttl;
        self
    }

    /// Override the password hasher (e.g. a cheaper bcrypt cost).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    pub fn password_hasher(&self) -> &PasswordHasher {
        &self.password_hasher
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Password rejected by the hash primitive
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - User the token will name
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match the stored hash
    /// * `Token` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: Uuid,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        self.password_hasher
            .verify(password, stored_hash)
            .map_err(|_| AuthenticationError::InvalidCredentials)?;

        let issued_at = Utc::now();
        let expires_at = expiry(issued_at, self.access_token_ttl)?;
        let access_token = self
            .token_codec
            .issue_at(subject, issued_at, self.access_token_ttl)?;

        Ok(AuthenticationResult {
            access_token,
            expires_at,
        })
    }

    /// Issue an access token without password verification.
    pub fn generate_token(&self, subject: Uuid) -> Result<String, TokenError> {
        self.token_codec.issue(subject, self.access_token_ttl)
    }

    /// Validate an access token and return the user it names.
    pub fn validate_token(&self, token: &str) -> Result<Uuid, TokenError> {
        self.token_codec.validate(token)
    }

    /// Resolve an `Authorization` header value to a user id.
    ///
    /// # Arguments
    /// * `header_value` - Raw header text (`""` when the header is absent)
    ///
    /// # Errors
    /// * `Bearer` - Header missing or not `Bearer <token>`
    /// * `Token` - Token rejected
    pub fn authorize(&self, header_value: &str) -> Result<Uuid, AuthenticationError> {
        let token = extract_bearer_token(header_value)?;
        Ok(self.token_codec.validate(token)?)
    }
}

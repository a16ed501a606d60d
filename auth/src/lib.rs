//! Authentication core for the chirpy service.
//!
//! Provides the pieces request handlers need to register, log in and
//! authorize users:
//! - Password hashing (bcrypt)
//! - Bearer token extraction from `Authorization` headers
//! - Access token (HS256 JWT) issuance and validation
//! - Authentication coordination
//!
//! Nothing here touches storage. User lookup and persistence stay with the
//! service that embeds this crate.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_cost(4);
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! assert!(hasher.verify("not_my_password", &hash).is_err());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{issue_access_token, validate_access_token, SigningSecret};
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let secret = SigningSecret::new("secret").unwrap();
//! let user_id = Uuid::new_v4();
//! let token = issue_access_token(user_id, &secret, Duration::hours(1)).unwrap();
//! assert_eq!(validate_access_token(&token, &secret).unwrap(), user_id);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, PasswordHasher, SigningSecret};
//! use uuid::Uuid;
//!
//! let secret = SigningSecret::new("secret").unwrap();
//! let auth = Authenticator::new(&secret).with_password_hasher(PasswordHasher::with_cost(4));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let user_id = Uuid::new_v4();
//! let result = auth.authenticate("password123", &hash, user_id).unwrap();
//!
//! // Authenticated request: resolve the Authorization header
//! let header = format!("Bearer {}", result.access_token);
//! assert_eq!(auth.authorize(&header).unwrap(), user_id);
//! ```

pub mod authenticator;
pub mod bearer;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use bearer::extract_bearer_token;
pub use bearer::BearerError;
pub use jwt::issue_access_token;
pub use jwt::validate_access_token;
pub use jwt::AccessClaims;
pub use jwt::SecretError;
pub use jwt::SigningSecret;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;

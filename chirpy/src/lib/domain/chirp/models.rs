use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::chirp::errors::ChirpBodyError;
use crate::domain::chirp::errors::ChirpIdError;
use crate::domain::user::models::UserId;

/// Words replaced by [`clean_body`]. Compared against the lowercased word.
pub const PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

/// Replacement for a profane word.
pub const CENSOR_MASK: &str = "****";

/// A posted chirp.
#[derive(Debug, Clone)]
pub struct Chirp {
    pub id: ChirpId,
    pub body: ChirpBody,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chirp unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChirpId(pub Uuid);

impl ChirpId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a chirp ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ChirpIdError> {
        Uuid::parse_str(s)
            .map(ChirpId)
            .map_err(|e| ChirpIdError::InvalidFormat(e.to_string()))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ChirpId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChirpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Chirp text, length-checked and already passed through the profanity filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChirpBody(String);

impl ChirpBody {
    /// Maximum body length, in bytes of the raw input.
    pub const MAX_LENGTH: usize = 140;

    /// Validate raw input and clean it.
    ///
    /// # Errors
    /// * `Empty` - Body has no non-whitespace content
    /// * `TooLong` - Raw body exceeds 140 bytes
    pub fn new(body: &str) -> Result<Self, ChirpBodyError> {
        if body.len() > Self::MAX_LENGTH {
            return Err(ChirpBodyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: body.len(),
            });
        }

        let cleaned = clean_body(body);
        if cleaned.is_empty() {
            return Err(ChirpBodyError::Empty);
        }

        Ok(Self(cleaned))
    }

    /// Rehydrate a body read back from storage, skipping validation.
    pub fn from_stored(body: String) -> Self {
        Self(body)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChirpBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Mask profane words.
///
/// Splits on whitespace, replaces each word whose lowercase form is in
/// [`PROFANE_WORDS`] with [`CENSOR_MASK`], and rejoins with single spaces.
/// Punctuation stays attached to its word, so `Sharbert!` is left alone.
pub fn clean_body(body: &str) -> String {
    body.split_whitespace()
        .map(|word| {
            if PROFANE_WORDS.contains(&word.to_lowercase().as_str()) {
                CENSOR_MASK
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Command to create a new chirp with domain types
#[derive(Debug)]
pub struct CreateChirpCommand {
    pub body: ChirpBody,
    pub user_id: UserId,
}

impl CreateChirpCommand {
    pub fn new(body: ChirpBody, user_id: UserId) -> Self {
        Self { body, user_id }
    }
}

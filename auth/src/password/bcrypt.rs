use super::errors::PasswordError;

/// Work factor used when no explicit cost is given.
pub const DEFAULT_COST: u32 = 10;

/// Longest password (in bytes) bcrypt can digest without truncation.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Password hashing implementation.
///
/// Provides adaptive, salted password hashing (internally uses bcrypt).
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a new password hasher with the default work factor.
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Create a password hasher with an explicit bcrypt cost.
    ///
    /// Costs outside bcrypt's accepted range (4..=31) are reported by `hash`.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Work factor this hasher applies to new hashes.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password.
    ///
    /// Each call draws a fresh random salt, so hashing the same password twice
    /// yields two different strings.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Modular crypt string (`$2b$<cost>$<salt><digest>`)
    ///
    /// # Errors
    /// * `HashingFailed` - Password exceeds 72 bytes or bcrypt rejected the input
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordError::HashingFailed(format!(
                "password is {} bytes, maximum is {}",
                password.len(),
                MAX_PASSWORD_BYTES
            )));
        }

        bcrypt::hash(password, self.cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a candidate password against a stored hash.
    ///
    /// A malformed stored hash is reported exactly like a wrong password.
    ///
    /// # Errors
    /// * `Mismatch` - Candidate does not match, or the stored hash is unusable
    pub fn verify(&self, candidate: &str, stored_hash: &str) -> Result<(), PasswordError> {
        if candidate.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordError::Mismatch);
        }

        match bcrypt::verify(candidate, stored_hash) {
            Ok(true) => Ok(()),
            Ok(false) | Err(_) => Err(PasswordError::Mismatch),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

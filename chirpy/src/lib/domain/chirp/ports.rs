use async_trait::async_trait;

use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::Chirp;
use crate::domain::chirp::models::ChirpId;
use crate::domain::chirp::models::CreateChirpCommand;

/// Port for chirp domain service operations.
#[async_trait]
pub trait ChirpServicePort: Send + Sync + 'static {
    /// Post a chirp on behalf of an authenticated user.
    ///
    /// # Errors
    /// * `AuthorNotFound` - Author no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn create_chirp(&self, command: CreateChirpCommand) -> Result<Chirp, ChirpError>;

    /// All chirps, oldest first.
    async fn list_chirps(&self) -> Result<Vec<Chirp>, ChirpError>;

    /// Retrieve chirp by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    async fn get_chirp(&self, id: &ChirpId) -> Result<Chirp, ChirpError>;
}

/// Persistence operations for chirps.
#[async_trait]
pub trait ChirpRepository: Send + Sync + 'static {
    /// Persist new chirp to storage.
    ///
    /// # Errors
    /// * `AuthorNotFound` - `user_id` does not reference an existing user
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError>;

    /// Retrieve all chirps ordered by `created_at` ascending.
    async fn list_all(&self) -> Result<Vec<Chirp>, ChirpError>;

    /// Retrieve chirp by identifier.
    ///
    /// # Returns
    /// Optional chirp (None if not found)
    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError>;
}

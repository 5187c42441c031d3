use async_trait::async_trait;

use crate::domain::profile::errors::ProfileError;
use crate::domain::profile::models::Profile;
use crate::domain::profile::models::ProfileId;
use crate::domain::profile::models::ProfileUpdate;

/// Persistence operations for account profiles.
#[async_trait]
pub trait ProfileStore: Send + Sync + 'static {
    /// Retrieve a profile by identifier.
    ///
    /// # Returns
    /// Optional profile (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, ProfileError>;

    /// Persist a new profile.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, profile: Profile) -> Result<Profile, ProfileError>;

    /// Apply a partial update to an existing profile.
    ///
    /// # Errors
    /// * `NotFound` - Profile does not exist
    /// * `DatabaseError` - Store operation failed
    async fn update(&self, id: &ProfileId, update: ProfileUpdate) -> Result<Profile, ProfileError>;

    /// Remove a profile. Used as the compensating write when registration
    /// fails after the profile was created.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn remove(&self, id: &ProfileId) -> Result<(), ProfileError>;
}

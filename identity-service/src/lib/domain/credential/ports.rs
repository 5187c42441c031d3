use async_trait::async_trait;

use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::models::Credential;
use crate::domain::credential::models::EmailAddress;

/// Persistence operations for login credentials.
///
/// The store enforces global email uniqueness.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve a credential by email address.
    ///
    /// # Returns
    /// Optional credential (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_email(&self, email: &EmailAddress)
        -> Result<Option<Credential>, CredentialError>;

    /// Persist a new credential.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, credential: Credential) -> Result<Credential, CredentialError>;
}

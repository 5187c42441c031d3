use async_trait::async_trait;

use crate::domain::profile::models::ProfileId;
use crate::domain::session::errors::SessionError;
use crate::domain::session::models::Session;
use crate::domain::session::models::SessionFilter;
use crate::domain::session::models::SessionId;

/// Persistence operations for sessions.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Retrieve a session by identifier.
    ///
    /// # Returns
    /// Optional session (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, SessionError>;

    /// Retrieve the first session matching the filter.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_one(&self, filter: &SessionFilter) -> Result<Option<Session>, SessionError>;

    /// Persist a new session.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, session: Session) -> Result<(), SessionError>;

    /// Remove a session unconditionally.
    ///
    /// # Returns
    /// True if a session was deleted, false if none existed
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn remove(&self, id: &SessionId) -> Result<bool, SessionError>;

    /// Remove a session only if it still carries the given stored hash.
    ///
    /// This is the conditional write used by reuse detection: the delete is
    /// a no-op when a concurrent request already replaced or removed the
    /// session, which avoids a lost update between the hash comparison and
    /// the revocation.
    ///
    /// # Returns
    /// True if a session was deleted, false if none matched
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn remove_matching(
        &self,
        id: &SessionId,
        refresh_token_hash: &str,
    ) -> Result<bool, SessionError>;

    /// Remove every session owned by an account (global sign-out).
    ///
    /// # Returns
    /// Number of sessions deleted
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn remove_all_for_account(&self, account_id: &ProfileId) -> Result<u64, SessionError>;
}

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::profile::models::ProfileId;
use crate::domain::profile::models::ProfileUpdate;
use crate::domain::session::models::Session;

/// One write inside a unit of work.
///
/// The unit of work is expressed as data rather than a closure so the
/// coordinator stays implementable both by a database adapter (one real
/// transaction per write set) and by in-memory fakes.
#[derive(Debug, Clone)]
pub enum StoreWrite {
    /// Insert a new session record
    CreateSession(Session),
    /// Apply a partial profile update
    UpdateProfile { id: ProfileId, update: ProfileUpdate },
}

/// Error from a failed unit of work.
///
/// The coordinator performs no error translation beyond carrying the
/// underlying store failure; every write made before the failure is
/// discarded.
#[derive(Debug, Clone, Error)]
pub enum TransactionError {
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Executes a unit of work atomically across the stores it touches.
///
/// Either every write in the set is durably committed or none are. A
/// transport disconnect mid-operation must not interrupt a running unit:
/// implementations commit or roll back, never leave a partial state.
#[async_trait]
pub trait TransactionCoordinator: Send + Sync + 'static {
    /// Apply the write set atomically.
    ///
    /// # Errors
    /// * `ProfileNotFound` - An `UpdateProfile` write targeted a missing row
    /// * `DatabaseError` - Store operation failed; nothing was committed
    async fn run(&self, writes: Vec<StoreWrite>) -> Result<(), TransactionError>;
}

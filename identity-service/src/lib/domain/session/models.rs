use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::profile::models::ProfileId;
use crate::domain::session::errors::SessionIdError;

/// Server-side session record.
///
/// Binds a refresh-token hash to an account and an expiry, which is what
/// makes issued refresh tokens revocable. `refresh_token_hash` is the
/// Argon2id hash of the refresh token issued at creation; a presented token
/// that fails to verify against it signals reuse or theft.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub account_id: ProfileId,
    pub refresh_token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session has passed its expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

/// Session unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a session ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, SessionIdError> {
        Uuid::parse_str(s)
            .map(SessionId)
            .map_err(|e| SessionIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lookup filter for sessions.
///
/// Logout scopes the lookup to both the session and the owning account, so
/// one account cannot terminate another account's session.
#[derive(Debug, Clone, Default)]
pub struct SessionFilter {
    pub id: Option<SessionId>,
    pub account_id: Option<ProfileId>,
}

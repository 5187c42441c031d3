use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Token payload carried by both access and refresh tokens.
///
/// Binds the token to an account (`sub`), its email, and the server-side
/// session it belongs to (`sid`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject: account identifier
    pub sub: String,

    /// Account email at issuance time
    pub email: String,

    /// Session identifier
    pub sid: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    /// Create claims valid from now for the given duration.
    pub fn new(
        account_id: impl Into<String>,
        email: impl Into<String>,
        session_id: impl Into<String>,
        validity: Duration,
    ) -> Self {
        let now = Utc::now();

        Self {
            sub: account_id.into(),
            email: email.into(),
            sid: session_id.into(),
            iat: now.timestamp(),
            exp: (now + validity).timestamp(),
        }
    }

    /// Expiration instant, if the `exp` timestamp is representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::LoginResponse;
use crate::domain::auth::models::RefreshedTokens;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::profile::models::ProfileId;
use crate::domain::session::models::SessionId;

/// Port for the session lifecycle operations exposed to the HTTP boundary.
///
/// Routes, status codes, and cookie semantics belong to the caller; this
/// port only returns success payloads or typed failures.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials, open a session, and issue both tokens.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, wrong password, or inactive
    ///   account (indistinguishable by design)
    /// * `Storage` - Store or coordinator failure
    async fn login(&self, command: LoginCommand) -> Result<LoginResponse, AuthError>;

    /// Create a profile and its credential as one logical unit.
    ///
    /// # Errors
    /// * `EmailAlreadyInUse` - Email collision (case-insensitive)
    /// * `Storage` - Store failure; a profile created before the failure is
    ///   rolled back by a compensating delete
    async fn register(&self, command: RegisterCommand) -> Result<(), AuthError>;

    /// Exchange a valid refresh token for a new access token.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Missing, malformed, expired, or
    ///   hash-mismatched token; the mismatch branch revokes the session
    ///   before failing
    /// * `Storage` - Store failure
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedTokens, AuthError>;

    /// Terminate a session owned by the given account.
    ///
    /// # Errors
    /// * `SessionNotFound` - No session with this id belongs to the account
    /// * `Storage` - Store failure
    async fn logout(&self, session_id: &SessionId, account_id: &ProfileId)
        -> Result<(), AuthError>;

    /// Terminate every session owned by an account (global sign-out).
    ///
    /// # Returns
    /// Number of sessions terminated
    ///
    /// # Errors
    /// * `Storage` - Store failure
    async fn logout_all(&self, account_id: &ProfileId) -> Result<u64, AuthError>;
}

/// Injectable delay imposed before every invalid-credential response.
///
/// Kept behind a port so tests can assert the invocation without waiting on
/// real wall-clock time.
#[async_trait]
pub trait FailureDelay: Send + Sync + 'static {
    async fn delay(&self);
}

use thiserror::Error;

use crate::domain::credential::errors::CredentialError;
use crate::domain::profile::errors::ProfileError;
use crate::domain::session::errors::SessionError;
use crate::domain::transaction::TransactionError;

/// Top-level error for session lifecycle operations.
///
/// The first four variants are deterministic business outcomes returned to
/// the caller as-is. `Storage` covers every unexpected store or coordinator
/// fault; its cause is logged with context but callers surface it as an
/// opaque internal failure.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Wrong email/password or inactive account. Deliberately generic so the
    /// response cannot be used to enumerate accounts.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, expired, or hash-mismatched refresh token.
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Email already in use")]
    EmailAlreadyInUse,

    #[error("Session not found")]
    SessionNotFound,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<CredentialError> for AuthError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::EmailAlreadyExists(_) => AuthError::EmailAlreadyInUse,
            other => AuthError::Storage(other.to_string()),
        }
    }
}

impl From<ProfileError> for AuthError {
    fn from(err: ProfileError) -> Self {
        AuthError::Storage(err.to_string())
    }
}

impl From<SessionError> for AuthError {
    fn from(err: SessionError) -> Self {
        AuthError::Storage(err.to_string())
    }
}

impl From<TransactionError> for AuthError {
    fn from(err: TransactionError) -> Self {
        AuthError::Storage(err.to_string())
    }
}

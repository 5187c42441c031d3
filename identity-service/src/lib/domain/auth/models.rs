use chrono::DateTime;
use chrono::Utc;

use crate::domain::credential::models::EmailAddress;
use crate::domain::profile::models::AccountStatus;
use crate::domain::session::models::SessionId;

/// Command to authenticate an account and open a session.
///
/// The email is taken raw: an unparseable email is handled as an
/// invalid-credential outcome, not as a validation error, so the response
/// shape never reveals whether an address could exist.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
    pub ip_address: String,
    pub user_agent: String,
}

/// Command to register a new account.
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    /// Defaults to Active when unspecified
    pub status: Option<AccountStatus>,
}

/// Successful login payload: both tokens plus session metadata.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub session: SessionHandle,
}

/// Caller-visible session metadata.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    pub id: SessionId,
    pub expires_at: DateTime<Utc>,
}

/// Successful refresh payload.
///
/// Carries only a new access token: the refresh token is not rotated in
/// this design and remains valid until its own expiry or logout.
#[derive(Debug, Clone)]
pub struct RefreshedTokens {
    pub access_token: String,
}

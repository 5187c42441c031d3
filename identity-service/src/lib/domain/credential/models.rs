use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::credential::errors::EmailError;
use crate::domain::profile::models::ProfileId;

/// Login credential record.
///
/// One per account (1:1 with the account profile). The stored password is
/// always a PHC-format Argon2id hash, never the plaintext.
#[derive(Debug, Clone)]
pub struct Credential {
    pub id: CredentialId,
    pub account_id: ProfileId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Credential {
    /// Create a new credential for an account.
    pub fn new(account_id: ProfileId, email: EmailAddress, password_hash: String) -> Self {
        Self {
            id: CredentialId::new(),
            account_id,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Credential unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CredentialId(pub Uuid);

impl CredentialId {
    /// Generate a new random credential ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CredentialId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates format using an RFC 5322 compliant parser and normalizes to
/// lowercase. Email uniqueness is case-insensitive, so normalization happens
/// here once instead of at every comparison site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated, lowercased email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_lowercase();

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

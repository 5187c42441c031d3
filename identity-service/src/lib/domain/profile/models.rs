use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::profile::errors::AccountStatusError;
use crate::domain::profile::errors::ProfileIdError;

/// Account profile aggregate.
///
/// Owns the account's identity data and login statistics. Referenced by id
/// from the credential record and from sessions.
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: ProfileId,
    pub first_name: String,
    pub last_name: String,
    pub status: AccountStatus,
    pub login_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Create a new profile with a fresh id and zero logins.
    pub fn new(first_name: String, last_name: String, status: AccountStatus) -> Self {
        Self {
            id: ProfileId::new(),
            first_name,
            last_name,
            status,
            login_count: 0,
            created_at: Utc::now(),
        }
    }

    /// Whether the account is allowed to log in.
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

/// Profile unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProfileId(pub Uuid);

impl ProfileId {
    /// Generate a new random profile ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a profile ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ProfileIdError> {
        Uuid::parse_str(s)
            .map(ProfileId)
            .map_err(|e| ProfileIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ProfileId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Account status gating login eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl AccountStatus {
    /// Stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Inactive => "INACTIVE",
        }
    }

    /// Parse a status from its stored representation.
    ///
    /// # Errors
    /// * `Unknown` - Not one of the known statuses
    pub fn from_str(s: &str) -> Result<Self, AccountStatusError> {
        match s {
            "ACTIVE" => Ok(AccountStatus::Active),
            "INACTIVE" => Ok(AccountStatus::Inactive),
            other => Err(AccountStatusError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partial update of a profile.
///
/// Only provided fields are changed.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub status: Option<AccountStatus>,
    pub login_count: Option<i64>,
}

impl ProfileUpdate {
    /// Update that only bumps the login counter to the given value.
    pub fn login_count(count: i64) -> Self {
        Self {
            login_count: Some(count),
            ..Self::default()
        }
    }
}

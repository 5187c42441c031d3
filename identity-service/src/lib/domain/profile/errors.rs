use thiserror::Error;

/// Error for ProfileId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfileIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for AccountStatus parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountStatusError {
    #[error("Unknown account status: {0}")]
    Unknown(String),
}

/// Error for profile store operations
#[derive(Debug, Clone, Error)]
pub enum ProfileError {
    #[error("Invalid profile ID: {0}")]
    InvalidProfileId(#[from] ProfileIdError),

    #[error("Invalid account status: {0}")]
    InvalidStatus(#[from] AccountStatusError),

    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

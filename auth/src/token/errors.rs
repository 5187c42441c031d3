use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures stay distinct (bad signature, expired, malformed)
/// so callers can log the difference even when they collapse all three into
/// one externally visible outcome.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}

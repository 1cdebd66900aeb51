use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid signing key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is invalid")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,
}

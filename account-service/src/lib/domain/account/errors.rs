use auth::PasswordError;
use thiserror::Error;

use crate::domain::errors::StorageError;
use crate::domain::otp::errors::OtpError;

/// Error for AccountId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for credential lifecycle operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid account ID: {0}")]
    InvalidAccountId(#[from] AccountIdError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    // Credential errors, surfaced to the caller as client errors
    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Password does not match")]
    Mismatch,

    #[error("Email already registered: {0}")]
    AlreadyExists(String),

    #[error("Requested email is already the current email")]
    NoOp,

    // One-time code errors (absent and expired are indistinguishable)
    #[error("One-time code error: {0}")]
    Otp(#[from] OtpError),

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(PasswordError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

use thiserror::Error;

use crate::domain::errors::StorageError;

/// Error for one-time code operations.
///
/// `NotFound` covers "never issued", "expired", and "already redeemed"
/// alike; the caller's only remedy is to request a new code.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OtpError {
    #[error("Code not found or expired")]
    NotFound,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

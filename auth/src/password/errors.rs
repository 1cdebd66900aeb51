use thiserror::Error;

/// Error type for password operations.
///
/// A wrong password is a distinct `Mismatch` variant, not a sentinel error
/// value to compare against and not a boolean.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),

    #[error("Password does not match")]
    Mismatch,
}

use async_trait::async_trait;
use chrono::Duration;

use crate::domain::errors::StorageError;

/// Ephemeral key-value storage for one-time codes.
#[async_trait]
pub trait CodeStore: Send + Sync + 'static {
    /// Store `code -> value` for `ttl`. An existing entry under the same
    /// code is overwritten (a code collision re-binds the code).
    ///
    /// # Errors
    /// * `StorageError` - Store operation failed
    async fn put(&self, code: &str, value: &str, ttl: Duration) -> Result<(), StorageError>;

    /// Atomically look up and invalidate a code.
    ///
    /// # Returns
    /// The bound value, or `None` if the code is absent, expired, or was
    /// already taken. A second `take` of the same code always sees `None`.
    ///
    /// # Errors
    /// * `StorageError` - Store operation failed
    async fn take(&self, code: &str) -> Result<Option<String>, StorageError>;
}

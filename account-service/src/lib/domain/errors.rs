use thiserror::Error;

/// Failure from one of the external stores (document store or ephemeral
/// key-value store). Propagated as an internal error with no automatic
/// retry; the triggering operation is considered failed, not partially
/// applied beyond whatever the store itself guarantees atomically.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Storage error: {0}")]
pub struct StorageError(pub String);

//! Content store errors

use thiserror::Error;

use crate::document::DocumentError;
use crate::storage::StorageError;

/// Errors returned by `ContentStore` operations
///
/// Unknown ids on update/delete are not errors; those calls report `false`.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The operation would break a store invariant
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Required post fields are missing
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A post would point at a category that does not exist
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// The document could not be written
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The document could not be encoded
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

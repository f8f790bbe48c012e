//! Storage errors
//!
//! I/O failures are classified so the CLI can tell the user what to fix.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a storage backend
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Cannot create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Permission denied for '{path}'")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No space left to save '{path}'")]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot read document '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write document '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Key is empty or would escape the data directory
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    /// The finished temp file could not replace the document
    #[error("Could not move '{from}' into place at '{to}': {source}")]
    AtomicWriteFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    /// Classify a failed write
    pub fn on_write(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path,
                source: error,
            },
            _ if is_disk_full(&error) => StorageError::DiskFull {
                path,
                source: error,
            },
            _ => StorageError::WriteError {
                path,
                source: error,
            },
        }
    }

    /// Classify a failed read
    pub fn on_read(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path,
                source: error,
            },
            _ => StorageError::ReadError {
                path,
                source: error,
            },
        }
    }

    /// What the user can do about it, if anything
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            StorageError::DiskFull { .. } => Some("Free up disk space and run the command again."),
            StorageError::PermissionDenied { .. } | StorageError::CreateDirectory { .. } => Some(
                "Check permissions on data_dir, or move it with `khoborkuri config set`.",
            ),
            StorageError::InvalidKey(_) => {
                Some("storage_key may only contain letters, digits, '-', '_' and '.'.")
            }
            _ => None,
        }
    }
}

fn is_disk_full(error: &io::Error) -> bool {
    let msg = error.to_string().to_lowercase();
    ["no space left", "disk full", "quota exceeded", "not enough space"]
        .iter()
        .any(|needle| msg.contains(needle))
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_permission_denied() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = StorageError::on_write(io_err, PathBuf::from("/srv/news/khoborkuri_data.json"));

        assert!(matches!(err, StorageError::PermissionDenied { .. }));
        assert!(err.hint().unwrap().contains("data_dir"));
        assert!(err.to_string().contains("khoborkuri_data.json"));
    }

    #[test]
    fn test_write_disk_full() {
        let io_err = io::Error::new(io::ErrorKind::Other, "No space left on device");
        let err = StorageError::on_write(io_err, PathBuf::from("/full/disk"));

        assert!(matches!(err, StorageError::DiskFull { .. }));
        assert!(err.hint().is_some());
    }

    #[test]
    fn test_other_failures_have_no_hint() {
        let err = StorageError::on_write(
            io::Error::new(io::ErrorKind::Other, "boom"),
            PathBuf::from("/data/x.json"),
        );
        assert!(matches!(err, StorageError::WriteError { .. }));
        assert!(err.hint().is_none());

        let err = StorageError::on_read(
            io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
            PathBuf::from("/data/x.json"),
        );
        assert!(matches!(err, StorageError::ReadError { .. }));
    }

    #[test]
    fn test_invalid_key() {
        let err = StorageError::InvalidKey("../etc".to_string());
        assert!(err.to_string().contains("../etc"));
        assert!(err.hint().is_some());
    }
}

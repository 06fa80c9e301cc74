//! Storage error types for the Timecapsule stores.
//!
//! This module defines structured error types for store operations,
//! separating unreadable data from failed writes so callers can tell the
//! operator and the submitter different things.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or persisting capsule state.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// Persisted data exists but is not a valid serialized sequence.
    #[error("Corrupt data in {}", path.display())]
    CorruptData {
        /// The file that could not be parsed
        path: PathBuf,
        /// The underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Writing the store back to disk failed.
    #[error("Failed to persist {}", path.display())]
    Persistence {
        /// The file that could not be written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Reading an existing store file failed.
    #[error("Failed to read {}", path.display())]
    Unreadable {
        /// The file that could not be read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Serialization failed.
    #[error("Serialization failed")]
    SerializationFailed {
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// The store refused the write without touching any file.
    #[error("Store unavailable: {reason}")]
    Unavailable {
        /// Description of why the store is unavailable
        reason: String,
    },
}

impl StoreError {
    /// Check if this error indicates unreadable persisted data.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::CorruptData { .. })
    }

    /// Check if this error indicates a failed write.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            StoreError::Persistence { .. }
                | StoreError::SerializationFailed { .. }
                | StoreError::Unavailable { .. }
        )
    }

    /// Check if this error is related to file I/O.
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            StoreError::Persistence { .. } | StoreError::Unreadable { .. }
        )
    }

    /// Get the file path if this error is about a specific file.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            StoreError::CorruptData { path, .. }
            | StoreError::Persistence { path, .. }
            | StoreError::Unreadable { path, .. } => Some(path),
            _ => None,
        }
    }
}

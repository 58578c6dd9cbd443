//! Error types for sitemap generation.

use sitemap_storage::StorageError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for generator operations.
pub type SitemapResult<T> = Result<T, SitemapError>;

/// The filesystem step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOperation {
    /// Creating the output directory.
    Prepare,
    /// Creating an output file.
    Create,
    /// Appending markup to an output file.
    Write,
    /// Flushing or syncing an output file.
    Flush,
    /// Renaming an output file during reconciliation.
    Rename,
}

impl fmt::Display for IoOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Prepare => "prepare",
            Self::Create => "create",
            Self::Write => "write",
            Self::Flush => "flush",
            Self::Rename => "rename",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while generating sitemaps.
///
/// Once any of these is returned the session is unusable; callers should
/// drop the generator.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// The options can never produce a valid sitemap.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the problem.
        message: String,
    },

    /// A single URL node does not fit even in an empty file.
    #[error("URL node of {node_len} bytes cannot fit in a file limited to {limit} bytes")]
    Capacity {
        /// Serialized length of the node.
        node_len: usize,
        /// The configured per-file byte budget.
        limit: u64,
    },

    /// A filesystem operation failed.
    #[error("{operation} failed for {}: {source}", .file.display())]
    Io {
        /// The step that failed.
        operation: IoOperation,
        /// The file (or directory) involved.
        file: PathBuf,
        /// The underlying storage error.
        #[source]
        source: StorageError,
    },

    /// The API was called out of lifecycle order.
    #[error("invalid state: {message}")]
    State {
        /// Description of the misuse.
        message: String,
    },
}

impl SitemapError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a lifecycle state error.
    pub fn state(message: impl Into<String>) -> Self {
        Self::State {
            message: message.into(),
        }
    }

    /// Creates an I/O error with operation and file context.
    pub fn io(operation: IoOperation, file: impl Into<PathBuf>, source: StorageError) -> Self {
        Self::Io {
            operation,
            file: file.into(),
            source,
        }
    }

    /// Returns true for configuration and capacity errors.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::Capacity { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn io_error_names_operation_and_file() {
        let err = SitemapError::io(
            IoOperation::Rename,
            "/tmp/out/b.xml",
            StorageError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
        );
        let text = err.to_string();
        assert!(text.starts_with("rename failed for /tmp/out/b.xml"));
        assert!(text.contains("denied"));
        assert!(!err.is_config());
    }

    #[test]
    fn capacity_counts_as_config() {
        let err = SitemapError::Capacity {
            node_len: 40,
            limit: 120,
        };
        assert!(err.is_config());
        assert_eq!(
            err.to_string(),
            "URL node of 40 bytes cannot fit in a file limited to 120 bytes"
        );
    }
}

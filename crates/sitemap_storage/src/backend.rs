//! Storage backend trait definitions.

use crate::error::StorageResult;
use std::path::PathBuf;

/// An append-only byte sink for a single output file.
///
/// Backends are **opaque byte stores**. They do not understand sitemap
/// markup; the generator owns all format interpretation and size accounting.
///
/// # Invariants
///
/// - `append` returns the offset where data was written
/// - `size` equals the sum of all appended lengths
/// - after `sync` returns, all appended data is durable
pub trait StorageBackend: Send + Sync {
    /// Appends data to the end of the output.
    ///
    /// Returns the offset where the data was written.
    ///
    /// # Errors
    ///
    /// Returns an error if an I/O error occurs.
    fn append(&mut self, data: &[u8]) -> StorageResult<u64>;

    /// Pushes buffered writes to the OS.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush operation fails.
    fn flush(&mut self) -> StorageResult<()>;

    /// Returns the number of bytes appended so far.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be determined.
    fn size(&self) -> StorageResult<u64>;

    /// Flushes and syncs all data and metadata to durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync operation fails.
    fn sync(&mut self) -> StorageResult<()>;
}

/// A flat namespace of named outputs.
///
/// The generator creates outputs by name, appends to them through the
/// returned [`StorageBackend`], and renames them once the final file count
/// is known.
///
/// # Implementors
///
/// - [`super::DirStore`] - Files in an OS directory
/// - [`super::InMemoryStore`] - For testing
pub trait OutputStore: Send {
    /// Makes the namespace ready for use (e.g. creates the directory).
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace cannot be created.
    fn prepare(&mut self) -> StorageResult<()>;

    /// Creates (or truncates) the output called `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be created.
    fn create(&mut self, name: &str) -> StorageResult<Box<dyn StorageBackend>>;

    /// Renames output `from` to `to`, replacing `to` if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::NotFound`] if `from` does not exist,
    /// or an I/O error if the rename fails.
    fn rename(&mut self, from: &str, to: &str) -> StorageResult<()>;

    /// Returns where `name` lives, for diagnostics.
    fn locate(&self, name: &str) -> PathBuf;
}

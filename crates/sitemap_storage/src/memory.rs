//! In-memory outputs for testing.

use crate::backend::{OutputStore, StorageBackend};
use crate::error::{StorageError, StorageResult};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

type SharedBuffer = Arc<RwLock<Vec<u8>>>;

/// An in-memory storage backend.
///
/// The buffer is shared with the [`InMemoryStore`] that created it, so
/// bytes appended through the backend are visible through the store.
///
/// # Example
///
/// ```rust
/// use sitemap_storage::{StorageBackend, InMemoryBackend};
///
/// let mut backend = InMemoryBackend::new();
/// let offset = backend.append(b"test data").unwrap();
/// assert_eq!(offset, 0);
/// assert_eq!(backend.size().unwrap(), 9);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    data: SharedBuffer,
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn shared(data: SharedBuffer) -> Self {
        Self { data }
    }

    /// Returns a copy of all data in the backend.
    #[must_use]
    pub fn data(&self) -> Vec<u8> {
        self.data.read().clone()
    }
}

impl StorageBackend for InMemoryBackend {
    fn append(&mut self, new_data: &[u8]) -> StorageResult<u64> {
        let mut data = self.data.write();
        let offset = data.len() as u64;
        data.extend_from_slice(new_data);
        Ok(offset)
    }

    fn flush(&mut self) -> StorageResult<()> {
        // Nothing is buffered
        Ok(())
    }

    fn size(&self) -> StorageResult<u64> {
        Ok(self.data.read().len() as u64)
    }

    fn sync(&mut self) -> StorageResult<()> {
        Ok(())
    }
}

/// An in-memory [`OutputStore`].
///
/// Cloning the store yields a handle onto the same namespace, which lets a
/// test hand one clone to the generator and inspect outputs through another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    files: Arc<RwLock<BTreeMap<String, SharedBuffer>>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all output names in lexical order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.files.read().keys().cloned().collect()
    }

    /// Returns true if an output called `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.files.read().contains_key(name)
    }

    /// Returns a copy of the named output, if present.
    #[must_use]
    pub fn contents(&self, name: &str) -> Option<Vec<u8>> {
        self.files.read().get(name).map(|buf| buf.read().clone())
    }

    /// Returns the named output as UTF-8 text, if present.
    #[must_use]
    pub fn contents_string(&self, name: &str) -> Option<String> {
        self.contents(name)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl OutputStore for InMemoryStore {
    fn prepare(&mut self) -> StorageResult<()> {
        Ok(())
    }

    fn create(&mut self, name: &str) -> StorageResult<Box<dyn StorageBackend>> {
        let buffer = SharedBuffer::default();
        self.files
            .write()
            .insert(name.to_string(), Arc::clone(&buffer));
        Ok(Box::new(InMemoryBackend::shared(buffer)))
    }

    fn rename(&mut self, from: &str, to: &str) -> StorageResult<()> {
        let mut files = self.files.write();
        let buffer = files
            .remove(from)
            .ok_or_else(|| StorageError::NotFound(from.to_string()))?;
        files.insert(to.to_string(), buffer);
        Ok(())
    }

    fn locate(&self, name: &str) -> PathBuf {
        PathBuf::from(format!("memory://{name}"))
    }
}

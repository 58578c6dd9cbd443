//! File-based outputs in an OS directory.

use crate::backend::{OutputStore, StorageBackend};
use crate::error::{StorageError, StorageResult};
use parking_lot::RwLock;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A buffered, append-only file backend.
///
/// # Durability
///
/// - `flush()` pushes buffered bytes to the OS
/// - `sync()` flushes and calls `File::sync_all()` to ensure data is on disk
///
/// # Example
///
/// ```no_run
/// use sitemap_storage::{StorageBackend, FileBackend};
/// use std::path::Path;
///
/// let mut backend = FileBackend::create(Path::new("sitemap.xml")).unwrap();
/// backend.append(b"<urlset>").unwrap();
/// backend.sync().unwrap();
/// ```
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    writer: RwLock<BufWriter<File>>,
    size: RwLock<u64>,
}

impl FileBackend {
    /// Creates a new file at `path`, truncating any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create(path: &Path) -> StorageResult<Self> {
        let file = File::create(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: RwLock::new(BufWriter::new(file)),
            size: RwLock::new(0),
        })
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FileBackend {
    fn append(&mut self, data: &[u8]) -> StorageResult<u64> {
        let mut writer = self.writer.write();
        let mut size = self.size.write();

        let offset = *size;
        if data.is_empty() {
            return Ok(offset);
        }

        writer.write_all(data)?;
        *size += data.len() as u64;

        Ok(offset)
    }

    fn flush(&mut self) -> StorageResult<()> {
        self.writer.write().flush()?;
        Ok(())
    }

    fn size(&self) -> StorageResult<u64> {
        Ok(*self.size.read())
    }

    fn sync(&mut self) -> StorageResult<()> {
        let mut writer = self.writer.write();
        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(())
    }
}

/// An [`OutputStore`] backed by a directory on disk.
///
/// Output names map directly to file names under the root directory.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Creates a store rooted at `root`. No I/O is performed.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Syncs the root directory so renames are durable.
    #[cfg(unix)]
    fn sync_directory(&self) -> StorageResult<()> {
        let dir = File::open(&self.root)?;
        dir.sync_all()?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn sync_directory(&self) -> StorageResult<()> {
        // NTFS journals metadata; directory handles cannot be fsynced
        Ok(())
    }
}

impl OutputStore for DirStore {
    fn prepare(&mut self) -> StorageResult<()> {
        if !self.root.exists() {
            debug!(dir = %self.root.display(), "creating output directory");
            fs::create_dir_all(&self.root)?;
        }

        if !self.root.is_dir() {
            return Err(StorageError::NotADirectory(self.root.clone()));
        }

        Ok(())
    }

    fn create(&mut self, name: &str) -> StorageResult<Box<dyn StorageBackend>> {
        let backend = FileBackend::create(&self.root.join(name))?;
        Ok(Box::new(backend))
    }

    fn rename(&mut self, from: &str, to: &str) -> StorageResult<()> {
        fs::rename(self.root.join(from), self.root.join(to)).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                StorageError::NotFound(from.to_string())
            } else {
                StorageError::Io(e)
            }
        })?;
        self.sync_directory()?;
        Ok(())
    }

    fn locate(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_create_new() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.xml");

        let backend = FileBackend::create(&path).unwrap();
        assert_eq!(backend.size().unwrap(), 0);
        assert!(path.exists());
    }

    #[test]
    fn file_create_truncates_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.xml");
        fs::write(&path, b"stale contents").unwrap();

        let mut backend = FileBackend::create(&path).unwrap();
        backend.append(b"new").unwrap();
        backend.sync().unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn file_append_tracks_offsets() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.xml");

        let mut backend = FileBackend::create(&path).unwrap();

        assert_eq!(backend.append(b"hello").unwrap(), 0);
        assert_eq!(backend.append(b" world").unwrap(), 5);
        assert_eq!(backend.size().unwrap(), 11);

        backend.sync().unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"hello world");
    }

    #[test]
    fn file_empty_append() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.xml");

        let mut backend = FileBackend::create(&path).unwrap();
        backend.append(b"x").unwrap();

        let offset = backend.append(b"").unwrap();
        assert_eq!(offset, 1);
        assert_eq!(backend.size().unwrap(), 1);
    }

    #[test]
    fn file_flush_makes_data_visible() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.xml");

        let mut backend = FileBackend::create(&path).unwrap();
        backend.append(b"data").unwrap();
        backend.flush().unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"data");
        assert_eq!(backend.path(), path);
    }

    #[test]
    fn dir_prepare_creates_directory() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("nested").join("out");

        let mut store = DirStore::new(&root);
        assert!(!root.exists());

        store.prepare().unwrap();
        assert!(root.is_dir());

        // Idempotent
        store.prepare().unwrap();
    }

    #[test]
    fn dir_prepare_rejects_file_root() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("plain-file");
        fs::write(&root, b"").unwrap();

        let mut store = DirStore::new(&root);
        let result = store.prepare();
        assert!(matches!(result, Err(StorageError::NotADirectory(_))));
    }

    #[test]
    fn dir_create_and_rename() {
        let temp = tempdir().unwrap();
        let mut store = DirStore::new(temp.path());
        store.prepare().unwrap();

        let mut backend = store.create("a.xml").unwrap();
        backend.append(b"contents").unwrap();
        backend.sync().unwrap();
        drop(backend);

        assert!(store.locate("a.xml").exists());
        store.rename("a.xml", "a-1.xml").unwrap();

        assert!(!store.locate("a.xml").exists());
        assert_eq!(fs::read(store.locate("a-1.xml")).unwrap(), b"contents");
    }

    #[test]
    fn dir_rename_missing_fails() {
        let temp = tempdir().unwrap();
        let mut store = DirStore::new(temp.path());

        let result = store.rename("missing.xml", "other.xml");
        assert!(matches!(result, Err(StorageError::NotFound(name)) if name == "missing.xml"));
    }

    #[test]
    fn dir_locate_joins_root() {
        let store = DirStore::new("/srv/sitemaps");
        assert_eq!(store.locate("a.xml"), PathBuf::from("/srv/sitemaps/a.xml"));
        assert_eq!(store.root(), Path::new("/srv/sitemaps"));
    }
}

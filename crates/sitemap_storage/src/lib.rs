//! # Sitemap Storage
//!
//! Output store abstraction for the sitemap generator.
//!
//! Backends are **opaque byte sinks** - they do not interpret the markup
//! they store. Stores are flat namespaces of named outputs that support
//! creation and rename, which is all the generator needs to roll over and
//! reconcile file names at close.
//!
//! ## Available Stores
//!
//! - [`DirStore`] / [`FileBackend`] - Files in an OS directory
//! - [`InMemoryStore`] / [`InMemoryBackend`] - For testing
//!
//! ## Example
//!
//! ```rust
//! use sitemap_storage::{InMemoryStore, OutputStore};
//!
//! let mut store = InMemoryStore::new();
//! let mut backend = store.create("sitemap.xml").unwrap();
//! backend.append(b"<urlset></urlset>").unwrap();
//! store.rename("sitemap.xml", "sitemap-1.xml").unwrap();
//! assert_eq!(store.names(), vec!["sitemap-1.xml".to_string()]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::{OutputStore, StorageBackend};
pub use error::{StorageError, StorageResult};
pub use file::{DirStore, FileBackend};
pub use memory::{InMemoryBackend, InMemoryStore};

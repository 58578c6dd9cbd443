//! # Sitemap Core
//!
//! Generates XML sitemap files from a stream of URL records while keeping
//! every file under both an entry-count limit and a byte-size limit.
//!
//! This crate provides:
//! - [`Generator`], the open/add/close session that rolls over files
//! - [`Options`] and its validation
//! - [`Url`] records and their node serialization
//! - The pure naming rules used to reconcile file names at close
//!
//! ## Example
//!
//! ```no_run
//! use sitemap_core::{ChangeFreq, Generator, Options, Url};
//!
//! let options = Options::new("public")
//!     .filename("sitemap")
//!     .base_url("https://example.com/");
//!
//! let mut generator = Generator::new(options);
//! generator.open()?;
//! generator.add(&Url::new("https://example.com/").with_change_freq(ChangeFreq::Daily))?;
//! let summary = generator.close()?;
//! println!("wrote {} file(s)", summary.files.len());
//! # Ok::<(), sitemap_core::SitemapError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod envelope;
mod error;
mod generator;
mod index;
pub mod naming;
mod options;
mod url;

pub use envelope::{format_url_node, FOOTER, HEADER};
pub use error::{IoOperation, SitemapError, SitemapResult};
pub use generator::{Generator, Summary};
pub use options::{
    envelope_len, Limits, Options, DEFAULT_FILENAME, DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_URLS,
};
pub use url::{ChangeFreq, ParseChangeFreqError, Url};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

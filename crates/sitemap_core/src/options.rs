//! Generator configuration.

use crate::envelope::{FOOTER, HEADER};
use crate::error::{SitemapError, SitemapResult};
use serde::Deserialize;
use std::path::PathBuf;

/// Maximum entries per file allowed by the sitemaps protocol.
pub const DEFAULT_MAX_URLS: i64 = 50_000;

/// Maximum uncompressed file size allowed by the sitemaps protocol (50 MiB).
pub const DEFAULT_MAX_FILE_SIZE: i64 = 50 * 1024 * 1024;

/// Base name used when none is configured.
pub const DEFAULT_FILENAME: &str = "sitemap";

/// Configuration for a generator session.
///
/// The numeric limits are signed because they usually come from flags or
/// config files; out-of-range values are rejected when the session opens,
/// not when the options are built.
///
/// - `max_urls`: entries per file; `0` means unlimited, negative is invalid.
/// - `max_file_size`: bytes per file including the envelope; `0` selects
///   [`DEFAULT_MAX_FILE_SIZE`], negative is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Maximum number of URL entries per file.
    pub max_urls: i64,

    /// Maximum byte size per file.
    pub max_file_size: i64,

    /// Output directory.
    pub dir: PathBuf,

    /// Base file name, without extension or sequence suffix.
    pub filename: String,

    /// Public URL prefix of the output directory, used for index entries.
    pub base_url: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_urls: DEFAULT_MAX_URLS,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            dir: PathBuf::from("."),
            filename: DEFAULT_FILENAME.to_string(),
            base_url: String::new(),
        }
    }
}

/// Limits resolved from [`Options`] after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Entries per file, or `None` for unlimited.
    pub max_urls: Option<u64>,
    /// Bytes per file, envelope included.
    pub max_file_size: u64,
}

impl Options {
    /// Creates options writing into `dir`, with protocol defaults otherwise.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    /// Sets the maximum number of entries per file.
    #[must_use]
    pub const fn max_urls(mut self, value: i64) -> Self {
        self.max_urls = value;
        self
    }

    /// Sets the maximum byte size per file.
    #[must_use]
    pub const fn max_file_size(mut self, value: i64) -> Self {
        self.max_file_size = value;
        self
    }

    /// Sets the base file name.
    #[must_use]
    pub fn filename(mut self, value: impl Into<String>) -> Self {
        self.filename = value.into();
        self
    }

    /// Sets the public URL prefix.
    #[must_use]
    pub fn base_url(mut self, value: impl Into<String>) -> Self {
        self.base_url = value.into();
        self
    }

    /// Returns the base file name, falling back to [`DEFAULT_FILENAME`].
    #[must_use]
    pub fn base_name(&self) -> &str {
        if self.filename.is_empty() {
            DEFAULT_FILENAME
        } else {
            &self.filename
        }
    }

    /// Checks the options and resolves the effective limits.
    ///
    /// This is a pure function of the options, so repeated calls on the same
    /// value always produce the same outcome.
    ///
    /// # Errors
    ///
    /// Returns [`SitemapError::Config`] if:
    /// - `max_urls` is negative
    /// - `max_file_size` is negative
    /// - `max_file_size` leaves no room beyond the envelope
    /// - the base name contains a path separator
    pub fn validate(&self) -> SitemapResult<Limits> {
        if self.max_urls < 0 {
            return Err(SitemapError::config(format!(
                "max_urls must be 0 (unlimited) or positive, got {}",
                self.max_urls
            )));
        }

        let max_file_size = match self.max_file_size {
            0 => DEFAULT_MAX_FILE_SIZE,
            n if n < 0 => {
                return Err(SitemapError::config(format!(
                    "max_file_size must not be negative, got {n}"
                )));
            }
            n => n,
        };

        let envelope = envelope_len();
        if max_file_size as u64 <= envelope {
            return Err(SitemapError::config(format!(
                "max_file_size {max_file_size} leaves no room for entries: \
                 header and footer take {envelope} bytes"
            )));
        }

        let name = self.base_name();
        if name.contains(['/', '\\']) {
            return Err(SitemapError::config(format!(
                "filename must not contain path separators: {name:?}"
            )));
        }

        Ok(Limits {
            max_urls: (self.max_urls > 0).then_some(self.max_urls as u64),
            max_file_size: max_file_size as u64,
        })
    }
}

/// Combined length of the fixed header and footer.
#[must_use]
pub const fn envelope_len() -> u64 {
    (HEADER.len() + FOOTER.len()) as u64
}

//! Sitemap index written when a session produces several part files.

use crate::envelope::{format_index_entry, join_location, INDEX_FOOTER, INDEX_HEADER};
use crate::error::{IoOperation, SitemapError, SitemapResult};
use sitemap_storage::OutputStore;
use tracing::debug;

/// Writes an index called `name` listing `parts` under `base_url`.
///
/// Entries appear in the order given.
///
/// # Errors
///
/// Returns [`SitemapError::Io`] if the index cannot be created, written or
/// synced.
pub fn write_index(
    store: &mut dyn OutputStore,
    name: &str,
    base_url: &str,
    parts: &[String],
) -> SitemapResult<()> {
    let path = store.locate(name);
    let mut backend = store
        .create(name)
        .map_err(|e| SitemapError::io(IoOperation::Create, &path, e))?;

    let mut body = String::from(INDEX_HEADER);
    for part in parts {
        body.push_str(&format_index_entry(&join_location(base_url, part)));
    }
    body.push_str(INDEX_FOOTER);

    backend
        .append(body.as_bytes())
        .map_err(|e| SitemapError::io(IoOperation::Write, &path, e))?;
    backend
        .sync()
        .map_err(|e| SitemapError::io(IoOperation::Flush, &path, e))?;

    debug!(index = name, parts = parts.len(), "wrote sitemap index");
    Ok(())
}

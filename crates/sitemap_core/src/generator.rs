//! The sitemap generator session.

use crate::envelope::{format_url_node, FOOTER, HEADER};
use crate::error::{IoOperation, SitemapError, SitemapResult};
use crate::index::write_index;
use crate::naming::{file_name, final_name, provisional_name, rename_plan};
use crate::options::{Limits, Options};
use crate::url::Url;
use serde::Serialize;
use sitemap_storage::{DirStore, OutputStore, StorageBackend};
use tracing::{debug, info};

/// The file currently receiving nodes.
struct ActiveFile {
    name: String,
    backend: Box<dyn StorageBackend>,
}

enum State {
    Unopened,
    Open(ActiveFile),
    Closed,
    /// A filesystem step failed; the output on disk is incomplete.
    Failed,
}

/// Outcome of a closed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Final names of the urlset files, in suffix order.
    pub files: Vec<String>,
    /// Name of the sitemap index, when more than one file was produced.
    pub index: Option<String>,
    /// Total number of URL entries written.
    pub url_count: u64,
}

/// Writes URL entries into size- and count-bounded sitemap files.
///
/// A session goes through `open`, any number of `add` calls, and `close`.
/// Whenever the next node would push the active file past either limit,
/// the file is sealed and a new one started. File names are reconciled at
/// close, once the total count is known.
///
/// The generator does no internal locking. Use one generator per thread,
/// each with its own base file name.
///
/// # Example
///
/// ```rust
/// use sitemap_core::{Generator, Options, Url};
/// use sitemap_storage::InMemoryStore;
///
/// let store = InMemoryStore::new();
/// let options = Options::new("public").max_urls(2).filename("pages");
///
/// let mut generator = Generator::with_store(options, store.clone());
/// generator.open().unwrap();
/// for loc in ["/a", "/b", "/c"] {
///     generator.add(&Url::new(loc)).unwrap();
/// }
/// let summary = generator.close().unwrap();
///
/// assert_eq!(summary.files, vec!["pages-1.xml", "pages-2.xml"]);
/// assert_eq!(store.names(), vec!["pages-1.xml", "pages-2.xml", "pages.xml"]);
/// ```
pub struct Generator {
    options: Options,
    store: Box<dyn OutputStore>,
    limits: Option<Limits>,
    state: State,
    /// Header plus every node written to the active file.
    current_bytes: u64,
    current_entries: u64,
    /// Provisional names, in creation order.
    files: Vec<String>,
    url_count: u64,
}

impl Generator {
    /// Creates a generator writing into `options.dir`. No I/O is performed.
    #[must_use]
    pub fn new(options: Options) -> Self {
        let store = DirStore::new(options.dir.clone());
        Self::with_store(options, store)
    }

    /// Creates a generator writing into an arbitrary output store.
    #[must_use]
    pub fn with_store(options: Options, store: impl OutputStore + 'static) -> Self {
        Self {
            options,
            store: Box::new(store),
            limits: None,
            state: State::Unopened,
            current_bytes: 0,
            current_entries: 0,
            files: Vec::new(),
            url_count: 0,
        }
    }

    /// Returns the session options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns true between a successful `open` and `close`.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Open(_))
    }

    /// Number of files produced so far.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Bytes accounted to the active file, footer excluded.
    #[must_use]
    pub fn current_bytes(&self) -> u64 {
        self.current_bytes
    }

    /// Entries written to the active file.
    #[must_use]
    pub fn current_entries(&self) -> u64 {
        self.current_entries
    }

    /// Validates the options, prepares the output directory and starts the
    /// first file.
    ///
    /// # Errors
    ///
    /// - [`SitemapError::State`] if the session was already opened
    /// - [`SitemapError::Config`] if the options are invalid
    /// - [`SitemapError::Io`] if the directory or first file cannot be
    ///   created
    pub fn open(&mut self) -> SitemapResult<()> {
        if !matches!(self.state, State::Unopened) {
            return Err(SitemapError::state("open called more than once"));
        }

        let limits = self.options.validate()?;

        let prepared = self
            .store
            .prepare()
            .map_err(|e| SitemapError::io(IoOperation::Prepare, &self.options.dir, e));
        self.fail_on_error(prepared)?;

        self.limits = Some(limits);
        let started = self.start_file();
        self.fail_on_error(started)
    }

    /// Appends one URL entry, rolling over to a new file when needed.
    ///
    /// # Errors
    ///
    /// - [`SitemapError::State`] if the session is not open
    /// - [`SitemapError::Capacity`] if the node cannot fit even in an empty
    ///   file
    /// - [`SitemapError::Io`] if sealing, creating or writing a file fails
    ///
    /// A `Capacity` error leaves the session open. After an `Io` error every
    /// further call fails with [`SitemapError::State`].
    pub fn add(&mut self, url: &Url) -> SitemapResult<()> {
        let limits = self.ensure_open("add")?;
        let node = format_url_node(url);

        if envelope_with(node.len()) > limits.max_file_size {
            return Err(SitemapError::Capacity {
                node_len: node.len(),
                limit: limits.max_file_size,
            });
        }

        let written = if self.fits(node.len()) {
            self.write_node(&node)
        } else {
            self.rollover().and_then(|()| self.write_node(&node))
        };
        self.fail_on_error(written)
    }

    /// Appends every URL from `urls`, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by [`Generator::add`].
    pub fn add_all<I>(&mut self, urls: I) -> SitemapResult<()>
    where
        I: IntoIterator<Item = Url>,
    {
        for url in urls {
            self.add(&url)?;
        }
        Ok(())
    }

    /// Returns whether `additional` more bytes fit in the active file,
    /// leaving room for the footer.
    #[must_use]
    pub fn can_fit(&self, additional: usize) -> bool {
        self.limits.is_some_and(|limits| {
            self.current_bytes + additional as u64 + FOOTER.len() as u64
                <= limits.max_file_size
        })
    }

    /// Seals the last file and reconciles file names.
    ///
    /// With a single file the result is `{base}.xml`. With N > 1 files the
    /// first-created file becomes `{base}-N.xml`, rollover files keep
    /// `{base}-1.xml` to `{base}-(N-1).xml`, and a sitemap index listing all
    /// of them is written to `{base}.xml`.
    ///
    /// # Errors
    ///
    /// - [`SitemapError::State`] if the session is not open
    /// - [`SitemapError::Io`] if flushing, renaming or writing the index
    ///   fails. The session cannot be closed again afterwards.
    pub fn close(&mut self) -> SitemapResult<Summary> {
        self.ensure_open("close")?;
        let finished = self.finish();
        self.fail_on_error(finished)
    }

    fn finish(&mut self) -> SitemapResult<Summary> {
        self.seal_active(true)?;
        // Drop the handle before renaming
        self.state = State::Closed;

        let base = self.options.base_name().to_string();
        let total = self.files.len();

        for (from, to) in rename_plan(&base, total) {
            debug!(from = %from, to = %to, "renaming sitemap file");
            self.store
                .rename(&from, &to)
                .map_err(|e| SitemapError::io(IoOperation::Rename, self.store.locate(&from), e))?;
        }

        let mut files: Vec<String> = (0..total).map(|i| final_name(&base, i, total)).collect();

        let index = if total > 1 {
            // Suffix order: the first-created file holds the last slot
            files.rotate_left(1);
            let name = file_name(&base, None);
            write_index(
                self.store.as_mut(),
                &name,
                &self.options.base_url,
                &files,
            )?;
            Some(name)
        } else {
            None
        };

        info!(
            files = files.len(),
            urls = self.url_count,
            index = index.as_deref().unwrap_or("-"),
            "sitemap session closed"
        );

        Ok(Summary {
            files,
            index,
            url_count: self.url_count,
        })
    }

    fn ensure_open(&self, operation: &str) -> SitemapResult<Limits> {
        match (&self.state, self.limits) {
            (State::Open(_), Some(limits)) => Ok(limits),
            (State::Closed, _) => Err(SitemapError::state(format!(
                "{operation} called after close"
            ))),
            (State::Failed, _) => Err(SitemapError::state(format!(
                "{operation} called after a failed write"
            ))),
            _ => Err(SitemapError::state(format!(
                "{operation} called before open"
            ))),
        }
    }

    fn fail_on_error<T>(&mut self, result: SitemapResult<T>) -> SitemapResult<T> {
        if result.is_err() {
            self.state = State::Failed;
        }
        result
    }

    fn fits(&self, node_len: usize) -> bool {
        let under_count = self
            .limits
            .and_then(|limits| limits.max_urls)
            .map_or(true, |max| self.current_entries < max);
        under_count && self.can_fit(node_len)
    }

    fn start_file(&mut self) -> SitemapResult<()> {
        let name = provisional_name(self.options.base_name(), self.files.len());
        let path = self.store.locate(&name);

        let mut backend = self
            .store
            .create(&name)
            .map_err(|e| SitemapError::io(IoOperation::Create, &path, e))?;
        backend
            .append(HEADER.as_bytes())
            .map_err(|e| SitemapError::io(IoOperation::Write, &path, e))?;

        debug!(file = %name, index = self.files.len(), "started sitemap file");

        self.files.push(name.clone());
        self.current_bytes = HEADER.len() as u64;
        self.current_entries = 0;
        self.state = State::Open(ActiveFile { name, backend });
        Ok(())
    }

    /// Appends the footer. Rollover only flushes; close also syncs.
    fn seal_active(&mut self, durable: bool) -> SitemapResult<()> {
        let State::Open(active) = &mut self.state else {
            return Err(SitemapError::state("no active file to seal"));
        };
        let path = self.store.locate(&active.name);

        active
            .backend
            .append(FOOTER.as_bytes())
            .map_err(|e| SitemapError::io(IoOperation::Write, &path, e))?;
        let done = if durable {
            active.backend.sync()
        } else {
            active.backend.flush()
        };
        done.map_err(|e| SitemapError::io(IoOperation::Flush, &path, e))
    }

    fn rollover(&mut self) -> SitemapResult<()> {
        debug!(
            entries = self.current_entries,
            bytes = self.current_bytes + FOOTER.len() as u64,
            "rolling over to a new sitemap file"
        );
        self.seal_active(false)?;
        self.start_file()
    }

    fn write_node(&mut self, node: &str) -> SitemapResult<()> {
        let State::Open(active) = &mut self.state else {
            return Err(SitemapError::state("no active file to write to"));
        };

        active.backend.append(node.as_bytes()).map_err(|e| {
            SitemapError::io(IoOperation::Write, self.store.locate(&active.name), e)
        })?;

        self.current_bytes += node.len() as u64;
        self.current_entries += 1;
        self.url_count += 1;
        debug_assert!(active
            .backend
            .size()
            .map_or(true, |size| size == self.current_bytes));
        Ok(())
    }
}

/// Size of a file holding only the envelope and one node of `node_len` bytes.
fn envelope_with(node_len: usize) -> u64 {
    (HEADER.len() + node_len + FOOTER.len()) as u64
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("options", &self.options)
            .field("open", &self.is_open())
            .field("files", &self.files)
            .field("current_bytes", &self.current_bytes)
            .field("current_entries", &self.current_entries)
            .finish()
    }
}

//! Resource providers — resolve a resource name to a buffered byte reader.
//!
//! The provider decides what a name means (a file on disk, an in-memory
//! document, a test double). Resolution failures are reported as
//! [`SourceError::ResourceNotFound`] before anything is read.

use std::{
    collections::HashMap,
    io::Cursor,
    path::{Path, PathBuf},
    sync::Arc,
};

use actor_core::SourceError;
use futures::future::BoxFuture;
use tokio::io::{AsyncBufRead, BufReader};

/// A readable, buffered resource handle. Dropping it releases the resource.
pub type LineReader = Box<dyn AsyncBufRead + Send + Unpin>;

/// Resolves resource names to readers.
///
/// Object safe so a [`LineSource`](crate::LineSource) can hold any provider
/// behind an `Arc<dyn ResourceProvider>`.
pub trait ResourceProvider: Send + Sync {
    fn open<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<LineReader, SourceError>>;
}

// ---------------------------------------------------------------------------
// FileProvider
// ---------------------------------------------------------------------------

/// Looks resources up as `<root>/<name>.<extension>`.
#[derive(Debug, Clone)]
pub struct FileProvider {
    root: PathBuf,
    extension: String,
}

impl FileProvider {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    /// Map a resource name to the path it would be read from. A name that
    /// already ends in the configured extension is used unchanged.
    pub fn resolve(&self, name: &str) -> PathBuf {
        let has_extension = Path::new(name)
            .extension()
            .is_some_and(|ext| ext == self.extension.as_str());
        if has_extension || self.extension.is_empty() {
            self.root.join(name)
        } else {
            self.root.join(format!("{name}.{}", self.extension))
        }
    }
}

impl ResourceProvider for FileProvider {
    fn open<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<LineReader, SourceError>> {
        Box::pin(async move {
            let path = self.resolve(name);
            let not_found = || SourceError::ResourceNotFound {
                name: name.to_string(),
                location: path.display().to_string(),
            };
            let read_error = |source: std::io::Error| SourceError::Read {
                name: name.to_string(),
                line: 0,
                source,
            };

            let file = match tokio::fs::File::open(&path).await {
                Ok(file) => file,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
                Err(e) => return Err(read_error(e)),
            };
            // Directories open fine on unix; only regular files are resources.
            match file.metadata().await {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => return Err(not_found()),
                Err(e) => return Err(read_error(e)),
            }

            tracing::debug!(resource = name, path = %path.display(), "opened file resource");
            Ok(Box::new(BufReader::new(file)) as LineReader)
        })
    }
}

// ---------------------------------------------------------------------------
// EmbeddedProvider
// ---------------------------------------------------------------------------

/// In-memory resources keyed by name. Used by demos, benches and tests.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedProvider {
    resources: HashMap<String, Arc<[u8]>>,
}

impl EmbeddedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(self, name: impl Into<String>, text: &str) -> Self {
        self.with_bytes(name, text.as_bytes())
    }

    /// Register raw bytes, which need not be valid UTF-8.
    pub fn with_bytes(mut self, name: impl Into<String>, bytes: &[u8]) -> Self {
        self.resources.insert(name.into(), Arc::from(bytes));
        self
    }

    /// Register `lines` joined by `\n`.
    pub fn with_lines<S: AsRef<str>>(self, name: impl Into<String>, lines: &[S]) -> Self {
        let text = lines.iter().map(AsRef::as_ref).collect::<Vec<_>>().join("\n");
        self.with_text(name, &text)
    }
}

impl ResourceProvider for EmbeddedProvider {
    fn open<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<LineReader, SourceError>> {
        Box::pin(async move {
            match self.resources.get(name) {
                Some(bytes) => Ok(Box::new(Cursor::new(Arc::clone(bytes))) as LineReader),
                None => Err(SourceError::ResourceNotFound {
                    name: name.to_string(),
                    location: "embedded".to_string(),
                }),
            }
        })
    }
}

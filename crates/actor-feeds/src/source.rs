//! Line source — a named resource read as an ordered sequence of lines.
//!
//! Three access modes:
//!
//! - [`LineSource::lines`] reopens the resource on every call and hands back a
//!   lazy [`Lines`] handle. Each `next_line` suspends until the next line or
//!   end-of-input is known.
//! - [`LineSource::count`] reads the whole resource eagerly and then counts
//!   lines.
//! - [`LineSource::count_lazy`] counts by draining [`Lines`] one line at a
//!   time.
//!
//! The counts are diagnostics: nothing is parsed or published.
//!
//! A line ends at `\n`, `\r\n` or a lone `\r`.

use std::{
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use actor_core::SourceError;
use tokio::io::{AsyncBufReadExt, AsyncReadExt};

use crate::provider::{LineReader, ResourceProvider};

/// A named resource behind a [`ResourceProvider`].
#[derive(Clone)]
pub struct LineSource {
    provider: Arc<dyn ResourceProvider>,
    name: String,
}

impl std::fmt::Debug for LineSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineSource").field("name", &self.name).finish_non_exhaustive()
    }
}

/// How a diagnostic count reads the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountMode {
    /// Whole resource into memory, then split.
    #[default]
    Eager,
    /// One line at a time through [`Lines`].
    Lazy,
}

impl std::fmt::Display for CountMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CountMode::Eager => write!(f, "eager"),
            CountMode::Lazy => write!(f, "lazy"),
        }
    }
}

/// Result of a diagnostic count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCount {
    pub lines: usize,
    pub elapsed: Duration,
}

impl LineSource {
    pub fn new(provider: Arc<dyn ResourceProvider>, name: impl Into<String>) -> Self {
        Self {
            provider,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Open the resource and return a fresh lazy line sequence.
    ///
    /// Resolution failures surface here, before any line is read.
    pub async fn lines(&self) -> Result<Lines, SourceError> {
        let reader = self.provider.open(&self.name).await?;
        tracing::debug!(resource = %self.name, "line source opened");
        Ok(Lines::new(self.name.clone(), reader))
    }

    /// Count lines, empty ones included, using `mode`.
    pub async fn count_with(&self, mode: CountMode) -> Result<LineCount, SourceError> {
        match mode {
            CountMode::Eager => self.count().await,
            CountMode::Lazy => self.count_lazy().await,
        }
    }

    /// Read the whole resource and count its lines, empty ones included.
    pub async fn count(&self) -> Result<LineCount, SourceError> {
        let start = Instant::now();
        let mut reader = self.provider.open(&self.name).await?;
        let mut contents = Vec::new();
        reader
            .read_to_end(&mut contents)
            .await
            .map_err(|source| SourceError::Read {
                name: self.name.clone(),
                line: 0,
                source,
            })?;

        let mut lines = Lines::new(self.name.clone(), Box::new(io::Cursor::new(contents)));
        let count = LineCount {
            lines: drain(&mut lines).await?,
            elapsed: start.elapsed(),
        };
        self.log_count(CountMode::Eager, count);
        Ok(count)
    }

    /// Count lines by pulling them one at a time, empty ones included.
    pub async fn count_lazy(&self) -> Result<LineCount, SourceError> {
        let start = Instant::now();
        let mut lines = self.lines().await?;
        let count = LineCount {
            lines: drain(&mut lines).await?,
            elapsed: start.elapsed(),
        };
        self.log_count(CountMode::Lazy, count);
        Ok(count)
    }

    fn log_count(&self, mode: CountMode, count: LineCount) {
        tracing::info!(
            resource = %self.name,
            %mode,
            lines = count.lines,
            elapsed_ms = count.elapsed.as_secs_f64() * 1000.0,
            "line count"
        );
    }
}

async fn drain(lines: &mut Lines) -> Result<usize, SourceError> {
    while lines.next_line().await?.is_some() {}
    Ok(lines.lines_read())
}

// ---------------------------------------------------------------------------
// Lines
// ---------------------------------------------------------------------------

/// Lazy, ordered, fused sequence of lines from one opened resource.
///
/// The reader is dropped as soon as the sequence ends (end-of-input or read
/// error), and in any case when the `Lines` value itself is dropped.
pub struct Lines {
    name: String,
    reader: Option<LineReader>,
    buf: Vec<u8>,
    /// The previous line ended in `\r`; a leading `\n` belongs to it.
    after_cr: bool,
    read: usize,
}

impl Lines {
    pub fn new(name: impl Into<String>, reader: LineReader) -> Self {
        Self {
            name: name.into(),
            reader: Some(reader),
            buf: Vec::new(),
            after_cr: false,
            read: 0,
        }
    }

    /// Next line without its terminator (`\n`, `\r\n` or `\r`).
    ///
    /// Returns `Ok(None)` at end-of-input and on every call after the
    /// sequence has ended. A read failure is returned once, then the
    /// sequence is finished.
    pub async fn next_line(&mut self) -> Result<Option<String>, SourceError> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };

        match read_line(reader, &mut self.buf, &mut self.after_cr).await {
            Ok(Some(line)) => {
                self.read += 1;
                Ok(Some(line))
            }
            Ok(None) => {
                self.reader = None;
                tracing::debug!(resource = %self.name, lines = self.read, "end of input");
                Ok(None)
            }
            Err(source) => {
                self.reader = None;
                Err(SourceError::Read {
                    name: self.name.clone(),
                    line: self.read,
                    source,
                })
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lines returned so far; also the 1-based number of the last line.
    pub fn lines_read(&self) -> usize {
        self.read
    }

    pub fn is_finished(&self) -> bool {
        self.reader.is_none()
    }
}

impl std::fmt::Debug for Lines {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lines")
            .field("name", &self.name)
            .field("read", &self.read)
            .field("finished", &self.is_finished())
            .finish()
    }
}

/// Read up to the next `\n`, `\r\n` or `\r`, leaving the terminator out.
async fn read_line(
    reader: &mut LineReader,
    buf: &mut Vec<u8>,
    after_cr: &mut bool,
) -> io::Result<Option<String>> {
    buf.clear();
    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            return if buf.is_empty() {
                Ok(None)
            } else {
                decode(buf).map(Some)
            };
        }

        let skip = usize::from(std::mem::take(after_cr) && available[0] == b'\n');
        let rest = &available[skip..];
        let (used, done) = match rest.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(end) => {
                buf.extend_from_slice(&rest[..end]);
                *after_cr = rest[end] == b'\r';
                (skip + end + 1, true)
            }
            None => {
                buf.extend_from_slice(rest);
                (available.len(), false)
            }
        };
        reader.consume(used);
        if done {
            return decode(buf).map(Some);
        }
    }
}

fn decode(buf: &mut Vec<u8>) -> io::Result<String> {
    String::from_utf8(std::mem::take(buf))
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

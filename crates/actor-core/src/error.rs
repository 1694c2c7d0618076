//! Error taxonomy shared by every pipeline layer.
//!
//! - [`SourceError`] is terminal for the sequence it came from.
//! - [`ParseError`] is recovered locally by the record stream (log and skip).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// The resource name did not resolve. Raised before any line is read.
    #[error("resource not found: {name} ({location})")]
    ResourceNotFound { name: String, location: String },

    /// The underlying reader failed. `line` is the number of lines read
    /// successfully before the failure (0 when opening failed).
    #[error("read error in {name} after line {line}: {source}")]
    Read {
        name: String,
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::ResourceNotFound { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line has fewer than the two tab-separated fields a record needs.
    #[error("malformed line {line}: expected at least 2 tab-separated fields, found {fields}")]
    MalformedLine { line: usize, fields: usize },
}

//! Core types for actor-core.
//!
//! This module defines the fundamental data structures shared across the
//! pipeline: the parsed [`Record`] and its process-unique [`RecordId`].

/// Identifier assigned to a [`Record`] when it is parsed.
///
/// Never derived from the line content: two records with the same name still
/// get distinct identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(uuid::Uuid);

impl RecordId {
    /// Allocate a fresh random identifier.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One parsed entry from a tab-separated source line.
///
/// Records are immutable once built; fields are only reachable through
/// accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: RecordId,
    name: String,
    line: usize,
}

impl Record {
    /// Build a record with a freshly allocated identifier.
    ///
    /// `line` is the 1-based line number of the source line.
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            id: RecordId::new(),
            name: name.into(),
            line,
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    /// The display name (second tab-separated field of the source line).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 1-based line number in the source resource.
    pub fn line(&self) -> usize {
        self.line
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

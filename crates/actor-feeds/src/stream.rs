//! Record stream — pull-mode delivery of parsed [`Record`]s.
//!
//! This is the only place lines become records. Push mode
//! ([`Publisher`](crate::Publisher)) drives a `RecordStream` from a background
//! task rather than parsing on its own.
//!
//! Per line:
//!
//! 1. end-of-input ends the sequence;
//! 2. blank lines are skipped and the next line is pulled;
//! 3. malformed lines (no name field) are logged, counted and skipped;
//! 4. anything else becomes a record with a fresh id and is returned before
//!    the next line is read.
//!
//! A read failure ends the sequence. [`RecordStream::next`] reports it and
//! behaves as if input had ended; [`RecordStream::try_next`] returns it.

use actor_core::{parser::parse_line, CollectedSequence, Record, SourceError};
use futures::Stream;
use tokio_util::sync::CancellationToken;

use crate::source::{LineSource, Lines};

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// How a delivery run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// End-of-input was reached.
    Exhausted,
    /// The source failed mid-read; records delivered before it remain valid.
    ReadFailed(String),
    /// The consumer cancelled or went away.
    Cancelled,
}

/// Final signal of a delivery run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Records handed to the consumer.
    pub delivered: usize,
    pub outcome: Outcome,
}

impl Completion {
    /// True when the source was read to the end without error.
    pub fn is_exhausted(&self) -> bool {
        self.outcome == Outcome::Exhausted
    }
}

/// Per-stream counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub lines_read: usize,
    pub delivered: usize,
    pub skipped_empty: usize,
    pub malformed: usize,
}

// ---------------------------------------------------------------------------
// RecordStream
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct RecordStream {
    lines: Lines,
    stats: StreamStats,
    failure: Option<SourceError>,
}

impl RecordStream {
    /// Open `source` and wrap the resulting line sequence.
    pub async fn open(source: &LineSource) -> Result<Self, SourceError> {
        Ok(Self::new(source.lines().await?))
    }

    pub fn new(lines: Lines) -> Self {
        Self {
            lines,
            stats: StreamStats::default(),
            failure: None,
        }
    }

    /// Next record, or the read error that ended the sequence.
    pub async fn try_next(&mut self) -> Result<Option<Record>, SourceError> {
        loop {
            let Some(raw) = self.lines.next_line().await? else {
                return Ok(None);
            };
            self.stats.lines_read += 1;

            match parse_line(self.lines.lines_read(), &raw) {
                Ok(Some(record)) => {
                    self.stats.delivered += 1;
                    return Ok(Some(record));
                }
                Ok(None) => self.stats.skipped_empty += 1,
                Err(err) => {
                    self.stats.malformed += 1;
                    tracing::warn!(resource = %self.lines.name(), %err, "skipping malformed line");
                }
            }
        }
    }

    /// Next record. A read failure is logged, kept in [`failure`](Self::failure)
    /// and ends the sequence.
    pub async fn next(&mut self) -> Option<Record> {
        match self.try_next().await {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(%err, delivered = self.stats.delivered, "record stream ended by read error");
                self.failure = Some(err);
                None
            }
        }
    }

    /// The read error that ended the sequence, if any.
    pub fn failure(&self) -> Option<&SourceError> {
        self.failure.as_ref()
    }

    pub fn stats(&self) -> StreamStats {
        self.stats
    }

    pub fn name(&self) -> &str {
        self.lines.name()
    }

    /// How the sequence ended so far: a stored read error, or exhausted.
    pub(crate) fn outcome(&self) -> Outcome {
        match &self.failure {
            Some(err) => Outcome::ReadFailed(err.to_string()),
            None => Outcome::Exhausted,
        }
    }

    /// Adapt to a [`futures::Stream`] of records.
    pub fn into_stream(self) -> impl Stream<Item = Record> + Send {
        futures::stream::unfold(self, |mut stream| async move {
            stream.next().await.map(|record| (record, stream))
        })
    }

    /// Pull every record into `seq` until the input ends or `cancel` fires.
    ///
    /// The stream (and with it the underlying reader) is dropped before this
    /// returns, on every exit path.
    pub async fn collect_into(
        mut self,
        seq: &mut CollectedSequence,
        cancel: &CancellationToken,
    ) -> Completion {
        let outcome = loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => break Outcome::Cancelled,
                next = self.next() => next,
            };
            match next {
                Some(record) => seq.push(record),
                None => break self.outcome(),
            }
        };

        let completion = Completion {
            delivered: self.stats.delivered,
            outcome,
        };
        tracing::info!(
            resource = %self.name(),
            delivered = completion.delivered,
            outcome = ?completion.outcome,
            "pull delivery finished"
        );
        completion
    }
}

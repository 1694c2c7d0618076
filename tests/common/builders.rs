//! Test builders — short constructors for sources, streams and sequences.
//!
//! Designed for readability in tests; they panic instead of returning
//! `Result`.

use std::sync::Arc;

use actor_core::{CollectedSequence, Record};
use actor_feeds::{EmbeddedProvider, LineSource, Publisher, RecordStream};
use tokio_util::sync::CancellationToken;

/// Name under which builder resources are registered.
pub const RESOURCE: &str = "names";

/// An in-memory line source holding `lines`.
pub fn embedded_source<S: AsRef<str>>(lines: &[S]) -> LineSource {
    LineSource::new(Arc::new(EmbeddedProvider::new().with_lines(RESOURCE, lines)), RESOURCE)
}

/// Well-formed lines (`<i>\t<name>`) for each name.
pub fn lines_for(names: &[&str]) -> Vec<String> {
    names.iter().enumerate().map(|(i, n)| format!("{}\t{n}", i + 1)).collect()
}

/// Records named `names`, numbered as if read from consecutive lines.
pub fn records(names: &[&str]) -> Vec<Record> {
    names.iter().enumerate().map(|(i, n)| Record::new(*n, i + 1)).collect()
}

/// Drive `source` to completion in pull mode and return the names collected.
pub async fn pull_names(source: &LineSource) -> Vec<String> {
    let stream = RecordStream::open(source).await.expect("open source");
    let mut seq = CollectedSequence::new();
    stream.collect_into(&mut seq, &CancellationToken::new()).await;
    seq.names()
}

/// Drive `source` to completion in push mode and return the names collected.
pub async fn push_names(source: &LineSource) -> Vec<String> {
    let stream = RecordStream::open(source).await.expect("open source");
    let mut publisher = Publisher::new(stream);
    let subscription = publisher.subscribe();
    publisher.start(CancellationToken::new());
    let mut seq = CollectedSequence::new();
    subscription.collect_into(&mut seq).await;
    seq.names()
}

/// Non-empty lines of `lines` that carry a name field, mapped to that name.
pub fn expected_names<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| l.split('\t').nth(1))
        .map(str::to_string)
        .collect()
}

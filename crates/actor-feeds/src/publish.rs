//! Publisher — push-mode delivery built on top of [`RecordStream`].
//!
//! The publisher owns the stream and, once started, drives it from a single
//! background task. Each record is handed to every live [`Subscription`] in
//! turn over a one-slot channel, so the producer never runs more than one
//! record ahead of the slowest subscriber.
//!
//! Every subscription sees its records followed by exactly one
//! [`StreamEvent::Finished`]. The producer stops pulling lines, and drops the
//! stream, when the token is cancelled or the last subscription is dropped.

use actor_core::{CollectedSequence, Record};
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;

use crate::stream::{Completion, Outcome, RecordStream};

/// What a subscription receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    Record(Record),
    /// Always the last event.
    Finished(Completion),
}

struct Subscriber {
    records: mpsc::Sender<Record>,
    done: oneshot::Sender<Completion>,
    sent: usize,
}

/// Push-mode adapter over a [`RecordStream`].
pub struct Publisher {
    stream: RecordStream,
    subscribers: Vec<Subscriber>,
}

impl Publisher {
    pub fn new(stream: RecordStream) -> Self {
        Self {
            stream,
            subscribers: Vec::new(),
        }
    }

    /// Register a passive subscriber. Must be called before [`start`](Self::start).
    pub fn subscribe(&mut self) -> Subscription {
        let (records_tx, records_rx) = mpsc::channel(1);
        let (done_tx, done_rx) = oneshot::channel();
        self.subscribers.push(Subscriber {
            records: records_tx,
            done: done_tx,
            sent: 0,
        });
        Subscription {
            records: records_rx,
            done: Some(done_rx),
            received: 0,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Spawn the producer task. The handle resolves to the producer-side
    /// completion once every subscriber has been signalled.
    pub fn start(self, cancel: CancellationToken) -> JoinHandle<Completion> {
        tokio::spawn(self.run(cancel))
    }

    async fn run(mut self, cancel: CancellationToken) -> Completion {
        tracing::debug!(
            resource = %self.stream.name(),
            subscribers = self.subscribers.len(),
            "publisher started"
        );
        let mut published = 0;

        let outcome = loop {
            if self.subscribers.is_empty() {
                tracing::debug!("no subscribers left; stopping producer");
                break Outcome::Cancelled;
            }

            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => break Outcome::Cancelled,
                _ = all_closed(&self.subscribers) => {
                    tracing::debug!("all subscribers dropped; stopping producer");
                    break Outcome::Cancelled;
                }
                next = self.stream.next() => next,
            };
            let Some(record) = next else {
                break self.stream.outcome();
            };

            if !broadcast(&mut self.subscribers, record, &cancel).await {
                break Outcome::Cancelled;
            }
            published += 1;
        };

        let Publisher { stream, subscribers } = self;
        let stats = stream.stats();
        // Release the reader before anyone is told the run is over.
        drop(stream);

        for subscriber in subscribers {
            let Subscriber { records, done, sent } = subscriber;
            drop(records);
            let _ = done.send(Completion {
                delivered: sent,
                outcome: outcome.clone(),
            });
        }

        tracing::info!(
            published,
            lines_read = stats.lines_read,
            malformed = stats.malformed,
            outcome = ?outcome,
            "publisher finished"
        );
        Completion {
            delivered: published,
            outcome,
        }
    }
}

/// Send `record` to every subscriber in registration order, dropping those
/// whose receiving side has gone. Returns `false` if cancelled part-way.
async fn broadcast(
    subscribers: &mut Vec<Subscriber>,
    record: Record,
    cancel: &CancellationToken,
) -> bool {
    let mut i = 0;
    while i < subscribers.len() {
        let sent = tokio::select! {
            biased;
            _ = cancel.cancelled() => return false,
            sent = subscribers[i].records.send(record.clone()) => sent.is_ok(),
        };
        if sent {
            subscribers[i].sent += 1;
            i += 1;
        } else {
            tracing::debug!(subscriber = i, "subscriber dropped");
            subscribers.remove(i);
        }
    }
    true
}

/// Resolves once every subscriber's receiving side has been dropped.
async fn all_closed(subscribers: &[Subscriber]) {
    futures::future::join_all(subscribers.iter().map(|s| s.records.closed())).await;
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// Receiving end of a [`Publisher`]. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    records: mpsc::Receiver<Record>,
    done: Option<oneshot::Receiver<Completion>>,
    received: usize,
}

impl Subscription {
    /// Next event, in source order. After [`StreamEvent::Finished`] has been
    /// returned this yields `None`.
    pub async fn recv(&mut self) -> Option<StreamEvent> {
        if let Some(record) = self.records.recv().await {
            self.received += 1;
            return Some(StreamEvent::Record(record));
        }

        let done = self.done.take()?;
        let completion = done.await.unwrap_or(Completion {
            // Publisher dropped without ever running.
            delivered: self.received,
            outcome: Outcome::Cancelled,
        });
        Some(StreamEvent::Finished(completion))
    }

    /// Append every published record to `seq` and return the completion.
    pub async fn collect_into(mut self, seq: &mut CollectedSequence) -> Completion {
        while let Some(event) = self.recv().await {
            match event {
                StreamEvent::Record(record) => seq.push(record),
                StreamEvent::Finished(completion) => return completion,
            }
        }
        Completion {
            delivered: self.received,
            outcome: Outcome::Cancelled,
        }
    }
}

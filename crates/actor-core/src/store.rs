//! Store — the append-only [`CollectedSequence`] of parsed records.
//!
//! The sequence is the single source of truth for the display layer. It has
//! exactly one writer ([`CollectedSequence`], which is not `Clone`) and any
//! number of read-only [`SequenceView`]s. Every append bumps a `watch`
//! channel carrying the current length so observers can await growth instead
//! of polling.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use tokio::sync::watch;

use crate::{search::Filter, Record};

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Ordered, append-only accumulation of [`Record`]s.
#[derive(Debug)]
pub struct CollectedSequence {
    records: Arc<RwLock<Vec<Record>>>,
    len_tx: watch::Sender<usize>,
}

impl Default for CollectedSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectedSequence {
    pub fn new() -> Self {
        let (len_tx, _) = watch::channel(0);
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            len_tx,
        }
    }

    /// Append one record at the end and notify observers.
    pub fn push(&mut self, record: Record) {
        let len = {
            let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
            records.push(record);
            records.len()
        };
        self.len_tx.send_replace(len);
    }

    pub fn len(&self) -> usize {
        *self.len_tx.borrow()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hand out a read-only observer for the display layer.
    pub fn view(&self) -> SequenceView {
        SequenceView {
            records: Arc::clone(&self.records),
            len_rx: self.len_tx.subscribe(),
        }
    }

    /// Clone out the current contents.
    pub fn snapshot(&self) -> Vec<Record> {
        read(&self.records).clone()
    }

    /// Names in sequence order. Handy for comparing two sequences.
    pub fn names(&self) -> Vec<String> {
        read(&self.records).iter().map(|r| r.name().to_string()).collect()
    }
}

impl Extend<Record> for CollectedSequence {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        for record in iter {
            self.push(record);
        }
    }
}

// ---------------------------------------------------------------------------
// Observer
// ---------------------------------------------------------------------------

/// Cheap, cloneable read handle on a [`CollectedSequence`].
#[derive(Debug, Clone)]
pub struct SequenceView {
    records: Arc<RwLock<Vec<Record>>>,
    len_rx: watch::Receiver<usize>,
}

impl SequenceView {
    pub fn len(&self) -> usize {
        *self.len_rx.borrow()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Record> {
        read(&self.records).get(index).cloned()
    }

    pub fn snapshot(&self) -> Vec<Record> {
        read(&self.records).clone()
    }

    /// Records matching `filter`, in sequence order.
    pub fn search(&self, filter: &Filter) -> Vec<Record> {
        filter.apply(&read(&self.records)).into_iter().cloned().collect()
    }

    /// Wait until the sequence grows past the last observed length.
    ///
    /// Returns `false` once the writer has been dropped and no further
    /// growth is possible.
    pub async fn changed(&mut self) -> bool {
        self.len_rx.changed().await.is_ok()
    }

    /// Wait until at least `len` records are present. Returns `false` if the
    /// writer is dropped first.
    pub async fn wait_for_len(&mut self, len: usize) -> bool {
        self.len_rx.wait_for(|current| *current >= len).await.is_ok()
    }
}

fn read(records: &RwLock<Vec<Record>>) -> RwLockReadGuard<'_, Vec<Record>> {
    records.read().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

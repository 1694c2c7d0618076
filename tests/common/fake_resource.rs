//! FakeProvider — a [`ResourceProvider`] whose single resource is fed line by
//! line from the test through a channel.
//!
//! Useful for simulating a slow or stalled source, a read failure part-way
//! through, and for checking that the reader is released when the consumer
//! goes away.

use std::{
    io,
    pin::Pin,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    task::{Context, Poll},
};

use actor_core::SourceError;
use actor_feeds::{LineReader, ResourceProvider};
use bytes::Bytes;
use futures::{future::BoxFuture, Stream};
use tokio::sync::mpsc;
use tokio_util::io::StreamReader;

/// A handle for pushing lines into a [`FakeResource`].
pub struct FakeResourceWriter {
    tx: mpsc::UnboundedSender<io::Result<Bytes>>,
}

impl FakeResourceWriter {
    /// Send one line, adding a trailing newline if not already present.
    /// Returns `false` once the reader has been dropped.
    pub fn send_line(&self, line: impl Into<String>) -> bool {
        let mut s = line.into();
        if !s.ends_with('\n') {
            s.push('\n');
        }
        self.tx.send(Ok(Bytes::from(s))).is_ok()
    }

    /// Send raw bytes as-is (e.g. invalid UTF-8).
    pub fn send_bytes(&self, bytes: &'static [u8]) -> bool {
        self.tx.send(Ok(Bytes::from_static(bytes))).is_ok()
    }

    /// Send several lines at once.
    pub fn send_burst(&self, lines: &[&str]) {
        for line in lines {
            self.send_line(*line);
        }
    }

    /// Make the next read fail with an I/O error.
    pub fn fail(&self, message: &str) -> bool {
        self.tx
            .send(Err(io::Error::new(io::ErrorKind::BrokenPipe, message.to_string())))
            .is_ok()
    }

    /// Close the stream, causing the consumer to see end-of-input.
    pub fn close(self) {
        // tx is dropped, causing the channel to close.
    }
}

/// Reports whether the fake resource's reader has been dropped.
#[derive(Clone)]
pub struct ReleaseFlag(Arc<AtomicBool>);

impl ReleaseFlag {
    pub fn is_released(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The byte stream behind the fake reader. Flags its release on drop.
pub struct FakeResource {
    rx: mpsc::UnboundedReceiver<io::Result<Bytes>>,
    released: Arc<AtomicBool>,
}

impl Stream for FakeResource {
    type Item = io::Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for FakeResource {
    fn drop(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

/// Hands out its single resource once, under any name.
pub struct FakeProvider {
    resource: Mutex<Option<FakeResource>>,
    released: ReleaseFlag,
}

impl FakeProvider {
    pub fn release_flag(&self) -> ReleaseFlag {
        self.released.clone()
    }
}

impl ResourceProvider for FakeProvider {
    fn open<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<LineReader, SourceError>> {
        Box::pin(async move {
            let resource = self.resource.lock().unwrap().take();
            match resource {
                Some(resource) => Ok(Box::new(StreamReader::new(resource)) as LineReader),
                None => Err(SourceError::ResourceNotFound {
                    name: name.to_string(),
                    location: "fake (already opened)".to_string(),
                }),
            }
        })
    }
}

/// Create a linked writer/provider pair.
///
/// ```rust
/// let (writer, provider) = fake_resource();
/// writer.send_line("1\tAda");
/// writer.close();
/// ```
pub fn fake_resource() -> (FakeResourceWriter, FakeProvider) {
    let (tx, rx) = mpsc::unbounded_channel();
    let released = Arc::new(AtomicBool::new(false));
    let provider = FakeProvider {
        resource: Mutex::new(Some(FakeResource {
            rx,
            released: Arc::clone(&released),
        })),
        released: ReleaseFlag(released),
    };
    (FakeResourceWriter { tx }, provider)
}

//! actor-feeds — line sources and record delivery for actor-search.
//!
//! A [`ResourceProvider`] resolves a name to a reader, a [`LineSource`] turns
//! it into an ordered sequence of lines, and a [`RecordStream`] parses those
//! into records. Records reach the consumer either by pulling from the
//! stream directly or through a [`Publisher`] that pushes them to
//! [`Subscription`]s from a background task.

pub mod provider;
pub mod publish;
pub mod source;
pub mod stream;

pub use provider::{EmbeddedProvider, FileProvider, LineReader, ResourceProvider};
pub use publish::{Publisher, StreamEvent, Subscription};
pub use source::{CountMode, LineCount, LineSource, Lines};
pub use stream::{Completion, Outcome, RecordStream, StreamStats};

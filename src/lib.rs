//! actor-search — streams a tab-separated name list into an observable,
//! filterable collection.
//!
//! The library crates are re-exported so integration tests and benches can
//! reach every layer from one place.
//!
//! # Architecture
//!
//! ```text
//! ResourceProvider ──► LineSource ──► RecordStream ──┬─ pull ─────────────┐
//!                                                    └─ push ─► Publisher ┤
//!                                                                         ▼
//!                                             CollectedSequence ──► SequenceView + Filter
//! ```
//!
//! One producer and one consumer per subscription; records arrive in source
//! order, one at a time.

pub mod app;

pub use actor_core;
pub use actor_feeds;

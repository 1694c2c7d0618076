//! actor-core — Actor Search core library.
//!
//! Shared types and the consumer-side layers of the pipeline:
//!
//! ```text
//! line ──► parser ──► Record ──► CollectedSequence ──► SequenceView + Filter
//! ```
//!
//! Reading lines and driving delivery (pull or push) lives in `actor-feeds`;
//! this crate holds everything the display layer needs to observe the result.

pub mod config;
pub mod error;
pub mod parser;
pub mod search;
pub mod store;
pub mod types;

pub use error::{ParseError, SourceError};
pub use search::{CaseRule, Filter};
pub use store::{CollectedSequence, SequenceView};
pub use types::{Record, RecordId};

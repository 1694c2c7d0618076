//! Shared test utilities for actor-search integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

pub mod assertions;
pub mod builders;
pub mod fake_resource;
pub mod fixtures;

pub use builders::*;
pub use fake_resource::*;
pub use fixtures::*;

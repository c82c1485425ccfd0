#![allow(dead_code)]
//! Shared test utilities for muxlog integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top
//! of each harness file. The fakes are single-threaded and hand shared
//! `Rc` handles back to the test so captured output can be inspected
//! after the multiplexer has consumed the collaborator boxes.

pub mod assertions;
pub mod builders;
pub mod fake_sinks;
pub mod fake_store;
pub mod fake_transport;
pub mod fixtures;

pub use builders::*;
pub use fake_sinks::*;
pub use fake_store::*;
pub use fake_transport::*;
pub use fixtures::*;

//! muxlog — character-stream log multiplexer.
//!
//! Takes a device's byte-at-a-time log output, reassembles and classifies
//! log lines, and fans them out to independently configured sinks while
//! always forwarding the raw bytes to a primary output. This crate is the
//! host-side bridge: the core state machines live in [`muxlog_core`], the
//! concrete adapters in [`muxlog_sinks`], and the integration harnesses
//! under `tests/` import all three.
//!
//! # Architecture
//!
//! ```text
//! stdin ──► Multiplexer ──► primary sink (stdout, raw)
//!               │
//!               └─► LineAssembler ──► SinkRouter ──► publish / command / HTTP
//! ```

pub mod settings;

pub use muxlog_core::{
    LogLine, Multiplexer, MuxOptions, MuxStats, Severity, TargetsConfig, ASCII_XOFF, ASCII_XON,
};

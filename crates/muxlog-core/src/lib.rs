//! muxlog-core — character-stream log multiplexer core.
//!
//! Reassembles a byte-at-a-time log stream into severity-classified
//! lines and fans them out to independently configured sinks, with
//! pause/resume flow control over a bounded byte buffer.
//!
//! # Architecture
//!
//! ```text
//! byte ──► Multiplexer ──► primary sink (raw, unconditional)
//!              │
//!              ├─ paused ──► PauseBuffer ──(resume)──► replay
//!              │
//!              └─► LineAssembler ──► SinkRouter ──► publish / command / HTTP
//! ```
//!
//! Single-threaded and cooperative: all state is touched from the
//! byte-ingestion path and the periodic service tick. No I/O happens in
//! this crate — every destination is a capability trait implemented by
//! `muxlog-sinks` or by a test fake.

pub mod assembler;
pub mod config;
pub mod flow;
pub mod mux;
pub mod ring;
pub mod router;
pub mod sinks;
pub mod types;

pub use config::{
    CommandConfig, HttpConfig, PublishConfig, SerialConfig, TargetsConfig, DEFAULT_HTTP_PORT,
};
pub use flow::{Clock, FlowControl, SystemClock, ASCII_XOFF, ASCII_XON};
pub use mux::{Multiplexer, MuxOptions, MuxStats};
pub use ring::{PauseBuffer, RingCursors};
pub use sinks::{ByteSink, CommandChannel, ConfigStore, NetTransport, PublishChannel};
pub use types::{LogLine, Severity, MAX_LINE_LEN};

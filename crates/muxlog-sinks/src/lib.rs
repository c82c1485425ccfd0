//! muxlog-sinks — concrete collaborator adapters for muxlog.
//!
//! Each adapter implements one of the capability traits from
//! [`muxlog_core`] over a real host facility: `std::io::Write` for the
//! primary output and the channel bridges, `std::net::TcpStream` for the
//! HTTP transport, and the filesystem for the configuration store. All
//! adapters absorb their own I/O failures — the multiplexer's byte path
//! must never see an error.

pub mod channel;
pub mod serial;
pub mod store;
pub mod tcp;

pub use channel::{QueueChannel, WriterChannel};
pub use serial::{stdout_sink, WriterSink};
pub use store::{FileStore, MemoryStore, StoreError};
pub use tcp::TcpTransport;

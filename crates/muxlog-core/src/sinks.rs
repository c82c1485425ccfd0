//! Collaborator capabilities.
//!
//! The multiplexer core performs no I/O of its own. Every external
//! destination — the raw primary output, the publish and command
//! channels, the HTTP transport, the configuration store — is expressed
//! as a single-purpose trait, implemented by the adapters in
//! `muxlog-sinks` and by the fakes in the test harnesses.

/// Destination for raw bytes — the primary output.
///
/// Receives every non-paused byte unconditionally, before any line
/// assembly. Implementations absorb their own write failures: nothing may
/// propagate an error back into the byte-ingestion path.
pub trait ByteSink {
    fn write_byte(&mut self, byte: u8);
}

/// Best-effort, fire-and-forget delivery of a pre-formatted payload to
/// the publish channel (an MQTT-style topic).
pub trait PublishChannel {
    fn publish(&mut self, payload: &str);
}

/// Local delivery of a pre-formatted payload over the command channel.
pub trait CommandChannel {
    fn log_message(&mut self, payload: &str);
}

/// Single-connection network transport for the HTTP sink.
///
/// A minimal TCP-client surface: connect / stop / connected plus raw
/// sends and bounded inbound reads. One outstanding connection at a time;
/// no pooling, no concurrent in-flight requests.
pub trait NetTransport {
    /// Open a fresh connection. Returns `false` on failure.
    fn connect(&mut self, host: &str, port: u16) -> bool;
    /// Drop the current connection, if any.
    fn stop(&mut self);
    fn connected(&self) -> bool;
    /// Write `data` synchronously; failures are absorbed.
    fn send(&mut self, data: &[u8]);
    /// Bytes ready to read without blocking.
    fn available(&mut self) -> usize;
    /// Read up to `buf.len()` bytes without blocking; returns the count
    /// actually read.
    fn read(&mut self, buf: &mut [u8]) -> usize;
}

/// Persisted-configuration collaborator.
///
/// The canonical configuration is a flat key/value record serialized as a
/// single object-shaped text blob; the store owns parsing and persistence.
/// `set_config_data` stages a new blob, `write_config` persists it.
pub trait ConfigStore {
    fn get_string(&self, key: &str, default: &str) -> String;
    fn get_long(&self, key: &str, default: i64) -> i64;
    fn set_config_data(&mut self, canonical: &str);
    fn write_config(&mut self);
}

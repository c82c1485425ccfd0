//! Composition root — the multiplexer that receives the byte stream.
//!
//! [`Multiplexer`] wires the line assembler, the sink router, and the
//! pause machinery together behind a two-call surface: `ingest(byte)` on
//! the hot path and `service(flow_byte)` on a periodic tick. Every
//! collaborator is owned as a trait object, so instances are independently
//! constructible and fully testable with fakes.

use crate::assembler::LineAssembler;
use crate::config::{HttpConfig, PublishConfig, SerialConfig, TargetsConfig};
use crate::flow::{Clock, FlowControl, SystemClock, ASCII_XOFF, ASCII_XON};
use crate::ring::PauseBuffer;
use crate::router::SinkRouter;
use crate::sinks::{ByteSink, CommandChannel, ConfigStore, NetTransport, PublishChannel};
use crate::types::Severity;

/// Construction-time tunables.
#[derive(Debug, Clone)]
pub struct MuxOptions {
    /// Capacity of the buffer that absorbs bytes while paused.
    pub pause_buffer_bytes: usize,
    /// Pause longer than this and the service tick resumes automatically.
    pub pause_timeout_ms: u64,
}

impl Default for MuxOptions {
    fn default() -> Self {
        Self {
            pause_buffer_bytes: 1000,
            pause_timeout_ms: 15_000,
        }
    }
}

/// Observability counters. The drop and truncation policies stay silent
/// on the data path; these expose them without adding backpressure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MuxStats {
    /// Bytes forwarded to the primary sink.
    pub bytes_forwarded: u64,
    /// Completed lines handed to the router.
    pub lines_dispatched: u64,
    /// Bytes rejected because the pause buffer was full.
    pub pause_dropped_bytes: u64,
    /// Lines emitted with bytes dropped at the length cap.
    pub truncated_lines: u64,
}

/// Character-stream log multiplexer.
pub struct Multiplexer {
    primary: Box<dyn ByteSink>,
    assembler: LineAssembler,
    router: SinkRouter,
    flow: FlowControl,
    pause_buffer: PauseBuffer,
    config: TargetsConfig,
    store: Option<Box<dyn ConfigStore>>,
    system_name: String,
    clock: Box<dyn Clock>,
    bytes_forwarded: u64,
    lines_dispatched: u64,
}

impl Multiplexer {
    pub fn new(
        primary: Box<dyn ByteSink>,
        publish: Box<dyn PublishChannel>,
        command: Box<dyn CommandChannel>,
        transport: Box<dyn NetTransport>,
    ) -> Self {
        Self::with_options(primary, publish, command, transport, MuxOptions::default())
    }

    pub fn with_options(
        primary: Box<dyn ByteSink>,
        publish: Box<dyn PublishChannel>,
        command: Box<dyn CommandChannel>,
        transport: Box<dyn NetTransport>,
        options: MuxOptions,
    ) -> Self {
        Self {
            primary,
            assembler: LineAssembler::new(),
            router: SinkRouter::new(publish, command, transport),
            flow: FlowControl::new(options.pause_timeout_ms),
            pause_buffer: PauseBuffer::new(options.pause_buffer_bytes),
            config: TargetsConfig::default(),
            store: None,
            system_name: String::new(),
            clock: Box::new(SystemClock::new()),
            bytes_forwarded: 0,
            lines_dispatched: 0,
        }
    }

    /// Replace the clock driving the pause timeout (tests use a manual one).
    pub fn set_clock(&mut self, clock: Box<dyn Clock>) {
        self.clock = clock;
    }

    /// Ingest one byte from the log stream.
    ///
    /// While paused the byte goes to the pause buffer (dropped when that
    /// is full). Otherwise it is forwarded to the primary sink
    /// unconditionally, then fed to the line assembler; a completed line
    /// is routed to the enabled sinks before this call returns.
    pub fn ingest(&mut self, byte: u8) {
        if self.flow.is_paused() {
            self.pause_buffer.put(byte);
            return;
        }
        self.bytes_forwarded += 1;
        self.primary.write_byte(byte);
        if let Some(line) = self.assembler.feed(byte, self.config.threshold) {
            self.router.dispatch(&line, &self.config);
            self.lines_dispatched += 1;
        }
    }

    /// Stop forwarding and start buffering incoming bytes.
    pub fn pause(&mut self) {
        self.flow.pause(self.clock.now_ms());
    }

    /// Resume forwarding. Buffered bytes are replayed in FIFO order
    /// through the normal ingest path before live bytes continue, so they
    /// participate in line assembly and dispatch exactly as live bytes
    /// would. A no-op when not paused.
    pub fn resume(&mut self) {
        if self.flow.resume() {
            self.replay_buffered();
        }
    }

    fn replay_buffered(&mut self) {
        while let Some(byte) = self.pause_buffer.get() {
            self.ingest(byte);
        }
    }

    /// Periodic housekeeping: drain inbound transport data, interpret an
    /// optional flow-control byte (XOFF pauses, XON resumes), and enforce
    /// the pause timeout.
    pub fn service(&mut self, flow_byte: Option<u8>) {
        self.router.drain_inbound();
        match flow_byte {
            Some(ASCII_XOFF) => self.pause(),
            Some(ASCII_XON) => self.resume(),
            _ => {}
        }
        if self.flow.timed_out(self.clock.now_ms()) {
            tracing::debug!(timeout_ms = self.flow.timeout_ms(), "pause timed out, resuming");
            self.resume();
        }
    }

    /// Point this instance at its persisted configuration and identity.
    /// Reads every field from the store, defaulting absent keys, and
    /// keeps the store for setter write-backs.
    pub fn setup(&mut self, store: Box<dyn ConfigStore>, system_name: &str) {
        self.system_name = system_name.to_string();
        self.router.set_system_name(system_name);
        self.config = TargetsConfig::from_store(store.as_ref());
        self.store = Some(store);
        tracing::debug!(system = system_name, config = ?self.config, "configured from store");
    }

    /// Set the severity threshold from a tag letter (case-insensitive) or
    /// a digit code; anything unrecognized falls back to SILENT.
    pub fn set_log_level(&mut self, level: &str) {
        let threshold = Severity::from_level_str(level);
        let changed = self.config.threshold != threshold;
        self.config.threshold = threshold;
        if changed {
            tracing::debug!(%threshold, "log level set");
            self.persist();
        } else {
            tracing::debug!(%threshold, "log level unchanged");
        }
    }

    /// Enable or disable the publish-channel sink. An empty topic keeps
    /// the current one.
    pub fn set_publish(&mut self, enabled: bool, topic: &str) {
        let next = PublishConfig {
            enabled,
            topic: non_empty_or(topic, &self.config.publish.topic),
        };
        let changed = self.config.publish != next;
        self.config.publish = next;
        if changed {
            self.persist();
        }
    }

    /// Enable or disable the serial bridge and select its channel. An
    /// empty port string keeps the current channel; malformed numbers
    /// parse to 0.
    pub fn set_serial(&mut self, enabled: bool, port: &str) {
        let next = SerialConfig {
            enabled,
            port: if port.is_empty() {
                self.config.serial.port
            } else {
                port.parse().unwrap_or(0)
            },
        };
        let changed = self.config.serial != next;
        self.config.serial = next;
        if changed {
            self.persist();
        }
    }

    /// Enable or disable the command-channel sink.
    pub fn set_command(&mut self, enabled: bool) {
        let changed = self.config.command.enabled != enabled;
        self.config.command.enabled = enabled;
        if changed {
            self.persist();
        }
    }

    /// Enable or disable the HTTP sink and set its endpoint. Empty
    /// strings keep the current values; malformed ports parse to 0.
    pub fn set_http(&mut self, enabled: bool, addr: &str, port: &str, url: &str) {
        let next = HttpConfig {
            enabled,
            addr: non_empty_or(addr, &self.config.http.addr),
            port: if port.is_empty() {
                self.config.http.port
            } else {
                port.parse().unwrap_or(0)
            },
            url: non_empty_or(url, &self.config.http.url),
        };
        let changed = self.config.http != next;
        self.config.http = next;
        if changed {
            self.persist();
        } else {
            tracing::debug!("sink config unchanged");
        }
    }

    fn persist(&mut self) {
        if let Some(store) = self.store.as_mut() {
            store.set_config_data(&self.config.canonical());
            store.write_config();
        }
    }

    pub fn config(&self) -> &TargetsConfig {
        &self.config
    }

    pub fn is_paused(&self) -> bool {
        self.flow.is_paused()
    }

    pub fn stats(&self) -> MuxStats {
        MuxStats {
            bytes_forwarded: self.bytes_forwarded,
            lines_dispatched: self.lines_dispatched,
            pause_dropped_bytes: self.pause_buffer.dropped(),
            truncated_lines: self.assembler.truncated_lines(),
        }
    }
}

fn non_empty_or(value: &str, current: &str) -> String {
    if value.is_empty() { current } else { value }.to_string()
}

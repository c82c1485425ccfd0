//! Test builders — a fully-faked multiplexer and feeding helpers.
//!
//! [`MuxHarness`] wires a [`muxlog_core::Multiplexer`] to capture fakes
//! and a manual clock, and keeps the inspection handles. Designed for
//! readability in assertions, not for production use.

use super::fake_sinks::{capture_channel, capture_sink, manual_clock};
use super::fake_store::shared_store;
use super::fake_transport::{fake_transport, FakeTransportState};
use muxlog_core::{Multiplexer, MuxOptions};
use muxlog_sinks::MemoryStore;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A multiplexer wired entirely to fakes, plus the handles to inspect them.
pub struct MuxHarness {
    pub mux: Multiplexer,
    /// Raw bytes the primary sink received.
    pub primary: Rc<RefCell<Vec<u8>>>,
    /// Payloads delivered to the publish channel.
    pub published: Rc<RefCell<Vec<String>>>,
    /// Payloads delivered to the command channel.
    pub commanded: Rc<RefCell<Vec<String>>>,
    /// Scriptable HTTP transport state.
    pub transport: Rc<RefCell<FakeTransportState>>,
    /// Current time of the manual clock, in milliseconds.
    pub now_ms: Rc<Cell<u64>>,
    /// Persisted-config store (populated by [`MuxHarness::with_store`]).
    pub store: Option<Rc<RefCell<MemoryStore>>>,
}

impl MuxHarness {
    pub fn new() -> Self {
        Self::with_options(MuxOptions::default())
    }

    pub fn with_options(options: MuxOptions) -> Self {
        let (primary_sink, primary) = capture_sink();
        let (publish_chan, published) = capture_channel();
        let (command_chan, commanded) = capture_channel();
        let (transport_fake, transport) = fake_transport();
        let (clock, now_ms) = manual_clock();

        let mut mux = Multiplexer::with_options(
            Box::new(primary_sink),
            Box::new(publish_chan),
            Box::new(command_chan),
            Box::new(transport_fake),
            options,
        );
        mux.set_clock(Box::new(clock));

        Self {
            mux,
            primary,
            published,
            commanded,
            transport,
            now_ms,
            store: None,
        }
    }

    /// Run `setup` against a shared memory store seeded with `blob`,
    /// keeping the handle in `self.store`.
    pub fn with_store(mut self, blob: &str) -> Self {
        let inner = MemoryStore::from_blob(blob).expect("seed blob must be a JSON object");
        let (store, handle) = shared_store(inner);
        self.mux.setup(Box::new(store), "dev-42");
        self.store = Some(handle);
        self
    }

    /// Feed every byte of `input` through `ingest`.
    pub fn feed(&mut self, input: &str) {
        for byte in input.bytes() {
            self.mux.ingest(byte);
        }
    }

    /// Count of `write_config` calls on the shared store.
    pub fn config_writes(&self) -> u64 {
        self.store
            .as_ref()
            .expect("harness built without with_store")
            .borrow()
            .writes()
    }
}

impl Default for MuxHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a structured payload into `(level code, message)`.
pub fn parse_payload(payload: &str) -> (u8, String) {
    let value: serde_json::Value =
        serde_json::from_str(payload).expect("payload must be valid JSON");
    (
        value["logLevel"].as_u64().expect("logLevel must be a number") as u8,
        value["logMsg"].as_str().expect("logMsg must be a string").to_string(),
    )
}

//! Publish- and command-channel adapters.
//!
//! Both channels carry the same pre-formatted payload string, so each
//! adapter here implements both traits; pick per wiring.

use muxlog_core::{CommandChannel, PublishChannel};
use std::io::Write;
use std::sync::mpsc;

/// Channel adapter pushing payloads onto an [`mpsc`] queue for whatever
/// owns the other end — an MQTT client task, the command bridge, a test.
/// Delivery is fire-and-forget: a disconnected receiver loses the payload.
pub struct QueueChannel {
    tx: mpsc::Sender<String>,
}

impl QueueChannel {
    pub fn new() -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl PublishChannel for QueueChannel {
    fn publish(&mut self, payload: &str) {
        let _ = self.tx.send(payload.to_string());
    }
}

impl CommandChannel for QueueChannel {
    fn log_message(&mut self, payload: &str) {
        let _ = self.tx.send(payload.to_string());
    }
}

/// Channel adapter writing one payload per line to an [`std::io::Write`].
pub struct WriterChannel<W: Write> {
    writer: W,
}

impl<W: Write> WriterChannel<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn deliver(&mut self, payload: &str) {
        if writeln!(self.writer, "{payload}").is_err() {
            tracing::debug!("channel write failed, payload dropped");
            return;
        }
        let _ = self.writer.flush();
    }
}

impl<W: Write> PublishChannel for WriterChannel<W> {
    fn publish(&mut self, payload: &str) {
        self.deliver(payload);
    }
}

impl<W: Write> CommandChannel for WriterChannel<W> {
    fn log_message(&mut self, payload: &str) {
        self.deliver(payload);
    }
}

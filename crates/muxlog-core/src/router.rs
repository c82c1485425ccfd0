//! Sink fan-out and payload formatting.
//!
//! [`SinkRouter`] takes each completed [`LogLine`] and delivers it to
//! every enabled sink: an identical structured payload to the publish and
//! command channels, and a one-shot HTTP POST over the transport. Sinks
//! are independent — failure or disablement of one never affects the
//! others, and failures are absorbed here rather than propagated to the
//! ingest path.

use crate::config::TargetsConfig;
use crate::sinks::{CommandChannel, NetTransport, PublishChannel};
use crate::types::LogLine;

/// Per-tick cap on inbound transport bytes drained and discarded.
const MAX_RX_DRAIN: usize = 100;

/// Fan-out of completed lines to the structured sinks.
pub struct SinkRouter {
    publish: Box<dyn PublishChannel>,
    command: Box<dyn CommandChannel>,
    transport: Box<dyn NetTransport>,
    system_name: String,
}

impl SinkRouter {
    pub fn new(
        publish: Box<dyn PublishChannel>,
        command: Box<dyn CommandChannel>,
        transport: Box<dyn NetTransport>,
    ) -> Self {
        Self {
            publish,
            command,
            transport,
            system_name: String::new(),
        }
    }

    /// System identifier used in the HTTP request path.
    pub fn set_system_name(&mut self, name: &str) {
        self.system_name = name.to_string();
    }

    /// Deliver one completed line to every enabled sink.
    pub fn dispatch(&mut self, line: &LogLine, cfg: &TargetsConfig) {
        if cfg.publish.enabled || cfg.command.enabled {
            let payload = structured_payload(line);
            if cfg.publish.enabled {
                self.publish.publish(&payload);
            }
            if cfg.command.enabled {
                self.command.log_message(&payload);
            }
        }
        if cfg.http.enabled {
            self.post(line, cfg);
        }
    }

    /// One POST per line over a fresh, non-persistent connection. A
    /// connect failure drops the line for this sink only.
    fn post(&mut self, line: &LogLine, cfg: &TargetsConfig) {
        if self.transport.connected() {
            self.transport.stop();
        }
        if !self.transport.connect(&cfg.http.addr, cfg.http.port) {
            tracing::warn!(
                addr = %cfg.http.addr,
                port = cfg.http.port,
                "log endpoint unreachable, line dropped"
            );
            return;
        }
        let body = http_body(line);
        let mut request = http_request(&cfg.http.url, &self.system_name, &cfg.http.addr, body.len());
        request.push_str(&body);
        self.transport.send(request.as_bytes());
    }

    /// Drain and discard inbound transport bytes, capped per tick so the
    /// service tick stays bounded.
    pub fn drain_inbound(&mut self) {
        if !self.transport.connected() {
            return;
        }
        let available = self.transport.available();
        if available == 0 {
            return;
        }
        let mut buf = [0u8; MAX_RX_DRAIN];
        let want = available.min(MAX_RX_DRAIN);
        let got = self.transport.read(&mut buf[..want]);
        tracing::trace!(available, got, "discarded inbound transport bytes");
    }
}

/// Structured sink payload: `{"logLevel":N,"logMsg":"…"}` with newline
/// characters stripped from the message field.
pub fn structured_payload(line: &LogLine) -> String {
    let msg: String = line
        .text
        .chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .collect();
    serde_json::json!({ "logLevel": line.severity.code(), "logMsg": msg }).to_string()
}

/// HTTP body: a one-element array, CRLF-terminated.
pub fn http_body(line: &LogLine) -> String {
    let mut body =
        serde_json::json!([{ "logCat": line.severity.code(), "eventText": line.text }]).to_string();
    body.push_str("\r\n");
    body
}

/// Minimal HTTP/1.1 POST request head for one body.
pub fn http_request(url_fragment: &str, system_name: &str, host: &str, content_length: usize) -> String {
    format!(
        "POST /{url_fragment}/{system_name}/ HTTP/1.1\r\n\
         Content-Length:{content_length}\r\n\
         Content-Type: application/json\r\n\
         Accept: application/json\r\n\
         Host: {host}\r\n\
         Connection: close\r\n\r\n"
    )
}

//! TCP transport for the HTTP sink.

use muxlog_core::NetTransport;
use std::io::{ErrorKind, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// [`NetTransport`] over a [`TcpStream`]: blocking connect and send with
/// timeouts, non-blocking inbound reads. One outstanding connection,
/// matching the multiplexer's one-POST-per-line model.
pub struct TcpTransport {
    stream: Option<TcpStream>,
    connect_timeout: Duration,
}

impl TcpTransport {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(2))
    }

    pub fn with_timeout(connect_timeout: Duration) -> Self {
        Self {
            stream: None,
            connect_timeout,
        }
    }
}

impl Default for TcpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl NetTransport for TcpTransport {
    fn connect(&mut self, host: &str, port: u16) -> bool {
        self.stream = None;
        let addrs = match (host, port).to_socket_addrs() {
            Ok(addrs) => addrs,
            Err(err) => {
                tracing::debug!(host, port, %err, "address resolution failed");
                return false;
            }
        };
        for addr in addrs {
            if let Ok(stream) = TcpStream::connect_timeout(&addr, self.connect_timeout) {
                let _ = stream.set_write_timeout(Some(self.connect_timeout));
                self.stream = Some(stream);
                return true;
            }
        }
        false
    }

    fn stop(&mut self) {
        self.stream = None;
    }

    fn connected(&self) -> bool {
        self.stream.is_some()
    }

    fn send(&mut self, data: &[u8]) {
        if let Some(stream) = self.stream.as_mut() {
            if let Err(err) = stream.write_all(data) {
                tracing::debug!(%err, "transport write failed");
                self.stream = None;
            }
        }
    }

    fn available(&mut self) -> usize {
        let Some(stream) = self.stream.as_mut() else {
            return 0;
        };
        let mut probe = [0u8; 64];
        let _ = stream.set_nonblocking(true);
        let n = match stream.peek(&mut probe) {
            Ok(n) => n,
            Err(ref err) if err.kind() == ErrorKind::WouldBlock => 0,
            Err(_) => 0,
        };
        let _ = stream.set_nonblocking(false);
        n
    }

    fn read(&mut self, buf: &mut [u8]) -> usize {
        let Some(stream) = self.stream.as_mut() else {
            return 0;
        };
        let _ = stream.set_nonblocking(true);
        let n = stream.read(buf).unwrap_or(0);
        let _ = stream.set_nonblocking(false);
        n
    }
}

//! Scriptable [`NetTransport`] fake for the HTTP sink.
//!
//! The shared state records connect attempts and sent bytes, and lets a
//! test refuse connections or preload inbound bytes for the service-tick
//! drain.

use muxlog_core::NetTransport;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct FakeTransportState {
    /// When false, every `connect` fails.
    pub accept_connections: bool,
    pub connected: bool,
    /// Every `(host, port)` passed to `connect`.
    pub connects: Vec<(String, u16)>,
    /// Number of `stop` calls.
    pub stops: u64,
    /// Everything passed to `send`, concatenated.
    pub sent: Vec<u8>,
    /// Bytes handed out by `read`.
    pub inbound: VecDeque<u8>,
}

/// [`NetTransport`] over shared scriptable state.
pub struct FakeTransport {
    state: Rc<RefCell<FakeTransportState>>,
}

/// Build a transport that accepts connections, plus its state handle.
pub fn fake_transport() -> (FakeTransport, Rc<RefCell<FakeTransportState>>) {
    let state = Rc::new(RefCell::new(FakeTransportState {
        accept_connections: true,
        ..FakeTransportState::default()
    }));
    (
        FakeTransport {
            state: Rc::clone(&state),
        },
        state,
    )
}

impl NetTransport for FakeTransport {
    fn connect(&mut self, host: &str, port: u16) -> bool {
        let mut state = self.state.borrow_mut();
        state.connects.push((host.to_string(), port));
        state.connected = state.accept_connections;
        state.connected
    }

    fn stop(&mut self) {
        let mut state = self.state.borrow_mut();
        state.stops += 1;
        state.connected = false;
    }

    fn connected(&self) -> bool {
        self.state.borrow().connected
    }

    fn send(&mut self, data: &[u8]) {
        self.state.borrow_mut().sent.extend_from_slice(data);
    }

    fn available(&mut self) -> usize {
        self.state.borrow().inbound.len()
    }

    fn read(&mut self, buf: &mut [u8]) -> usize {
        let mut state = self.state.borrow_mut();
        let mut n = 0;
        while n < buf.len() {
            match state.inbound.pop_front() {
                Some(byte) => {
                    buf[n] = byte;
                    n += 1;
                }
                None => break,
            }
        }
        n
    }
}

//! Capture fakes for the byte sink and the structured channels, plus a
//! manually-driven clock for timeout tests.

use muxlog_core::{ByteSink, Clock, CommandChannel, PublishChannel};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

// ---------------------------------------------------------------------------
// Primary byte sink
// ---------------------------------------------------------------------------

/// [`ByteSink`] recording every byte it receives.
pub struct CaptureSink {
    bytes: Rc<RefCell<Vec<u8>>>,
}

/// Build a capture sink plus the handle the test reads captured bytes from.
pub fn capture_sink() -> (CaptureSink, Rc<RefCell<Vec<u8>>>) {
    let bytes = Rc::new(RefCell::new(Vec::new()));
    (
        CaptureSink {
            bytes: Rc::clone(&bytes),
        },
        bytes,
    )
}

impl ByteSink for CaptureSink {
    fn write_byte(&mut self, byte: u8) {
        self.bytes.borrow_mut().push(byte);
    }
}

// ---------------------------------------------------------------------------
// Structured channels
// ---------------------------------------------------------------------------

/// Channel fake recording every payload; implements both channel traits.
pub struct CaptureChannel {
    payloads: Rc<RefCell<Vec<String>>>,
}

/// Build a capture channel plus the handle to its recorded payloads.
pub fn capture_channel() -> (CaptureChannel, Rc<RefCell<Vec<String>>>) {
    let payloads = Rc::new(RefCell::new(Vec::new()));
    (
        CaptureChannel {
            payloads: Rc::clone(&payloads),
        },
        payloads,
    )
}

impl PublishChannel for CaptureChannel {
    fn publish(&mut self, payload: &str) {
        self.payloads.borrow_mut().push(payload.to_string());
    }
}

impl CommandChannel for CaptureChannel {
    fn log_message(&mut self, payload: &str) {
        self.payloads.borrow_mut().push(payload.to_string());
    }
}

// ---------------------------------------------------------------------------
// Manual clock
// ---------------------------------------------------------------------------

/// [`Clock`] reading from a shared cell the test advances by hand.
pub struct ManualClock {
    now_ms: Rc<Cell<u64>>,
}

/// Build a manual clock plus the handle that sets its current time.
pub fn manual_clock() -> (ManualClock, Rc<Cell<u64>>) {
    let now_ms = Rc::new(Cell::new(0));
    (
        ManualClock {
            now_ms: Rc::clone(&now_ms),
        },
        now_ms,
    )
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }
}

//! Pause / resume flow control.
//!
//! When the consumer of the primary output signals backpressure (XOFF),
//! the multiplexer stops forwarding and buffers incoming bytes instead.
//! [`FlowControl`] tracks the paused state and the pause deadline against
//! an injected [`Clock`], so the timeout path is testable without
//! sleeping. The timeout guarantees the stream cannot stay silently
//! paused forever when the resume signal is lost.

/// XON control byte — resume logging.
pub const ASCII_XON: u8 = 0x11;
/// XOFF control byte — pause logging.
pub const ASCII_XOFF: u8 = 0x13;

/// Monotonic millisecond clock capability.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// [`Clock`] over [`std::time::Instant`], counting from construction.
#[derive(Debug)]
pub struct SystemClock {
    origin: std::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Pause state and timeout bookkeeping.
#[derive(Debug)]
pub struct FlowControl {
    paused: bool,
    /// Meaningful only while `paused` is set.
    started_at_ms: u64,
    timeout_ms: u64,
}

impl FlowControl {
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            paused: false,
            started_at_ms: 0,
            timeout_ms,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self, now_ms: u64) {
        self.paused = true;
        self.started_at_ms = now_ms;
    }

    /// Leave the paused state. Returns `true` if the call actually
    /// unpaused (callers replay the pause buffer only then).
    pub fn resume(&mut self) -> bool {
        let was_paused = self.paused;
        self.paused = false;
        was_paused
    }

    /// True when paused at least as long as the configured timeout.
    pub fn timed_out(&self, now_ms: u64) -> bool {
        self.paused && now_ms.saturating_sub(self.started_at_ms) >= self.timeout_ms
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }
}

//! Domain-specific assertion macros for muxlog harnesses.
//!
//! These add context-rich failure messages that make it clear which
//! multiplexer guarantee was violated.

/// Assert that a captured payload list matches `(level code, message)`
/// pairs, in order.
///
/// ```rust
/// assert_payloads!(harness.published, [(3, "Wabc"), (2, "Edef")]);
/// ```
#[macro_export]
macro_rules! assert_payloads {
    ($handle:expr, [$(($level:expr, $msg:expr)),* $(,)?]) => {{
        let captured: Vec<(u8, String)> = $handle
            .borrow()
            .iter()
            .map(|p| $crate::common::builders::parse_payload(p))
            .collect();
        let expected: Vec<(u8, String)> = vec![$(($level, $msg.to_string())),*];
        if captured != expected {
            panic!(
                "assert_payloads! failed:\n  expected: {:?}\n  captured: {:?}",
                expected, captured
            );
        }
    }};
}

/// Assert that the primary sink received exactly these raw bytes.
#[macro_export]
macro_rules! assert_forwarded {
    ($handle:expr, $expected:expr) => {{
        let captured = $handle.borrow().clone();
        let expected: &[u8] = $expected.as_bytes();
        if captured != expected {
            panic!(
                "assert_forwarded! failed:\n  expected: {:?}\n  captured: {:?}",
                String::from_utf8_lossy(expected),
                String::from_utf8_lossy(&captured)
            );
        }
    }};
}

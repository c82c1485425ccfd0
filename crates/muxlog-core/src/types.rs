//! Core types for muxlog-core — severity classification and completed lines.
//!
//! [`Severity`] is the ordered enumeration shared by the assembler, the
//! router, and the configuration layer. [`LogLine`] is a completed,
//! severity-classified line produced by the assembler and fanned out by
//! the router.

/// Maximum length of a collected line, in bytes. Bytes past the cap are
/// dropped at ingest time — the line is emitted truncated, never rejected.
pub const MAX_LINE_LEN: usize = 250;

/// Log severity, ordered from most restrictive to most verbose.
///
/// The numeric codes are part of the wire format: they appear in the
/// structured sink payloads and under the persisted `LogLevel` key. Lower
/// code = higher priority, so a line is eligible for dispatch when its
/// severity is not [`Severity::Silent`] and `severity <= threshold`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Never dispatched. As a threshold, suppresses every line.
    Silent = 0,
    Fatal = 1,
    Error = 2,
    Warning = 3,
    Notice = 4,
    Trace = 5,
    Verbose = 6,
}

impl Severity {
    /// Classify the first byte of a line. The tag letters `F E W N T V`
    /// and the raw byte codes 1–6 map to their level; everything else is
    /// `Silent`.
    pub fn from_tag(byte: u8) -> Self {
        match byte {
            b'F' | 1 => Severity::Fatal,
            b'E' | 2 => Severity::Error,
            b'W' | 3 => Severity::Warning,
            b'N' | 4 => Severity::Notice,
            b'T' | 5 => Severity::Trace,
            b'V' | 6 => Severity::Verbose,
            _ => Severity::Silent,
        }
    }

    /// Parse a persisted numeric code. Out-of-range values fall back to
    /// `Silent`.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Severity::Fatal,
            2 => Severity::Error,
            3 => Severity::Warning,
            4 => Severity::Notice,
            5 => Severity::Trace,
            6 => Severity::Verbose,
            _ => Severity::Silent,
        }
    }

    /// Parse a level setter argument: a tag letter (case-insensitive) or a
    /// digit `1`–`6`. Anything else is `Silent`.
    pub fn from_level_str(level: &str) -> Self {
        match level.trim().bytes().next() {
            Some(b) => match b.to_ascii_uppercase() {
                b'F' => Severity::Fatal,
                b'E' => Severity::Error,
                b'W' => Severity::Warning,
                b'N' => Severity::Notice,
                b'T' => Severity::Trace,
                b'V' => Severity::Verbose,
                b'1'..=b'6' => Severity::from_code((b - b'0') as i64),
                _ => Severity::Silent,
            },
            None => Severity::Silent,
        }
    }

    /// Numeric wire code (`SILENT=0` … `VERBOSE=6`).
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Silent => write!(f, "SILENT"),
            Severity::Fatal => write!(f, "FATAL"),
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Notice => write!(f, "NOTICE"),
            Severity::Trace => write!(f, "TRACE"),
            Severity::Verbose => write!(f, "VERBOSE"),
        }
    }
}

/// A completed, severity-classified log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub severity: Severity,
    /// Line text with terminator characters stripped, capped at
    /// [`MAX_LINE_LEN`] bytes (UTF-8 lossy converted).
    pub text: String,
}

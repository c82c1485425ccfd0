//! Per-byte line assembly.
//!
//! [`LineAssembler`] consumes the raw byte stream one byte at a time and
//! produces completed [`LogLine`]s. The severity of a line is derived from
//! its first byte; lines whose severity does not pass the configured
//! threshold are discarded byte-by-byte without buffering. Text is capped
//! at [`MAX_LINE_LEN`] bytes so memory stays bounded regardless of line
//! length.

use crate::types::{LogLine, Severity, MAX_LINE_LEN};

/// What the assembler is doing with the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineState {
    /// The next byte starts a new line and carries its severity tag.
    AwaitingFirstByte,
    /// The line passed the threshold test; bytes accumulate into the text.
    Collecting,
    /// The line was rejected; bytes are discarded until the terminator.
    Discarding,
}

/// Byte-at-a-time line assembly state machine.
#[derive(Debug)]
pub struct LineAssembler {
    state: LineState,
    severity: Severity,
    text: Vec<u8>,
    overflowed: bool,
    truncated_lines: u64,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self {
            state: LineState::AwaitingFirstByte,
            severity: Severity::Silent,
            text: Vec::with_capacity(MAX_LINE_LEN),
            overflowed: false,
            truncated_lines: 0,
        }
    }

    /// Consume one byte.
    ///
    /// Returns a completed line when `byte` terminates a collected,
    /// non-empty line. The classifying first byte is also the first
    /// content byte. Embedded `\n`/`\r` are stripped from the emitted
    /// text, so a terminator-only line produces nothing.
    pub fn feed(&mut self, byte: u8, threshold: Severity) -> Option<LogLine> {
        match self.state {
            LineState::AwaitingFirstByte => {
                let severity = Severity::from_tag(byte);
                if severity != Severity::Silent && severity <= threshold {
                    self.state = LineState::Collecting;
                    self.severity = severity;
                    self.text.clear();
                    self.overflowed = false;
                    self.text.push(byte);
                } else {
                    self.state = LineState::Discarding;
                }
            }
            LineState::Collecting => {
                if self.text.len() < MAX_LINE_LEN {
                    self.text.push(byte);
                } else if byte != b'\n' && byte != b'\r' && !self.overflowed {
                    // Terminators are stripped at emit, so dropping one at
                    // the cap does not truncate the line.
                    self.overflowed = true;
                    self.truncated_lines += 1;
                }
            }
            LineState::Discarding => {}
        }

        if byte == b'\n' {
            let collected = self.state == LineState::Collecting;
            self.state = LineState::AwaitingFirstByte;
            if collected {
                self.text.retain(|&b| b != b'\n' && b != b'\r');
                if !self.text.is_empty() {
                    return Some(LogLine {
                        severity: self.severity,
                        text: String::from_utf8_lossy(&self.text).into_owned(),
                    });
                }
            }
        }
        None
    }

    /// Lines emitted with bytes dropped at the length cap.
    pub fn truncated_lines(&self) -> u64 {
        self.truncated_lines
    }
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new()
    }
}

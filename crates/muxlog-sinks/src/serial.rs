//! Byte sinks over `std::io::Write`.

use muxlog_core::ByteSink;
use std::io::Write;

/// Primary-output sink writing each byte to an [`std::io::Write`] —
/// stdout, a serial device file, a pipe.
///
/// Write errors are swallowed at this boundary. The writer is flushed on
/// line terminators so interactive consumers see whole lines promptly.
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ByteSink for WriterSink<W> {
    fn write_byte(&mut self, byte: u8) {
        let _ = self.writer.write_all(&[byte]);
        if byte == b'\n' {
            let _ = self.writer.flush();
        }
    }
}

/// [`WriterSink`] over the process stdout.
pub fn stdout_sink() -> WriterSink<std::io::Stdout> {
    WriterSink::new(std::io::stdout())
}

//! Byte-stream seams between the engine and its host.
//!
//! The engine knows nothing about files, terminals, or buffers; `,` and `.`
//! go through these two one-method traits. Blanket implementations make
//! every [`std::io::Read`] a source and every [`std::io::Write`] a sink, so
//! process stdio, byte slices, and `Vec<u8>` all plug in directly.

use std::io::{self, Read, Write};

/// Where `,` reads from.
pub trait ByteSource {
    /// The next byte of input, or `None` at a clean end of stream.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

/// Where `.` writes to.
pub trait ByteSink {
    /// Write one raw byte.
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;
}

impl<R: Read> ByteSource for R {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<W: Write> ByteSink for W {
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.write_all(&[byte])
    }
}

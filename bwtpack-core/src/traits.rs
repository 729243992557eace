//! Byte-level capabilities the codec is driven through.
//!
//! The pipeline never touches files or sockets directly. It pulls bytes from
//! a [`ByteSource`] and pushes bytes into a [`ByteSink`]. Both traits are
//! implemented for every `std::io::Read` / `std::io::Write`, so slices,
//! cursors, vectors and files all work unchanged.

use crate::error::Result;
use std::io::{ErrorKind, Read, Write};

/// A source that can be asked for one byte at a time.
pub trait ByteSource {
    /// Try to read one byte.
    ///
    /// Returns `Ok(None)` once the source is exhausted.
    fn read_byte(&mut self) -> Result<Option<u8>>;
}

/// A sink that accepts one byte at a time.
pub trait ByteSink {
    /// Write one byte.
    fn write_byte(&mut self, byte: u8) -> Result<()>;

    /// Write a run of bytes.
    fn write_all_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    /// Flush any buffering inside the sink.
    fn flush_sink(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<R: Read + ?Sized> ByteSource for R {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<W: Write + ?Sized> ByteSink for W {
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write_all(&[byte])?;
        Ok(())
    }

    fn write_all_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_all(bytes)?;
        Ok(())
    }

    fn flush_sink(&mut self) -> Result<()> {
        self.flush()?;
        Ok(())
    }
}

/// Drain a source into memory.
pub fn read_to_vec<S: ByteSource + ?Sized>(source: &mut S) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    while let Some(byte) = source.read_byte()? {
        data.push(byte);
    }
    Ok(data)
}

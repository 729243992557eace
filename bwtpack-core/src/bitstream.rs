//! Bit-level I/O for the bwtpack container.
//!
//! This module provides `BitReader` and `BitWriter` for reading and writing
//! individual bits and small integers on top of a byte source or sink.
//!
//! # Bit Ordering
//!
//! bwtpack packs bits MSB-first: the first bit written lands in the most
//! significant bit of the first byte. Multi-bit values are written most
//! significant bit first as well, so a `write_bits(v, 8)` call produces the
//! byte `v` unchanged when the stream is byte aligned.
//!
//! # End of stream
//!
//! The reader never fails on exhaustion. The first time the source cannot
//! supply a byte, [`BitReader::is_eof`] becomes true and every subsequent
//! read yields zero bits. Callers decide whether that is an error.
//!
//! # Example
//!
//! ```
//! use bwtpack_core::bitstream::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b1100, 4).unwrap();
//! let output = writer.finish().unwrap();
//! assert_eq!(output, vec![0b1011_1000]);
//!
//! let mut reader = BitReader::new(&output[..]);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! ```

use crate::error::Result;
use crate::traits::{ByteSink, ByteSource};

/// A bit-level reader over any [`ByteSource`].
///
/// At most one byte of partial state is held internally.
#[derive(Debug)]
pub struct BitReader<R: ByteSource> {
    /// Underlying source.
    reader: R,
    /// Current byte being consumed.
    buffer: u8,
    /// Number of unread bits left in `buffer`.
    bits_in_buffer: u8,
    /// Set once the source failed to supply a byte.
    eof: bool,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<R: ByteSource> BitReader<R> {
    /// Create a new `BitReader` wrapping the given source.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: 0,
            bits_in_buffer: 0,
            eof: false,
            total_bits_read: 0,
        }
    }

    /// Get a reference to the underlying source.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consume this `BitReader` and return the underlying source.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Get the total number of bits consumed from real input so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Whether the source has been exhausted.
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Read a single bit. Returns `false` once the stream is exhausted.
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.bits_in_buffer == 0 {
            if self.eof {
                return Ok(false);
            }
            match self.reader.read_byte()? {
                Some(byte) => {
                    self.buffer = byte;
                    self.bits_in_buffer = 8;
                }
                None => {
                    self.eof = true;
                    return Ok(false);
                }
            }
        }

        self.bits_in_buffer -= 1;
        self.total_bits_read += 1;
        Ok((self.buffer >> self.bits_in_buffer) & 1 == 1)
    }

    /// Read up to 32 bits, most significant bit first.
    ///
    /// Bits past the end of the stream are zero.
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        let mut value = 0u32;
        for _ in 0..count {
            value = (value << 1) | u32::from(self.read_bit()?);
        }
        Ok(value)
    }

    /// Read eight bits as a byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        Ok(self.read_bits(8)? as u8)
    }

    /// Read a big-endian 32-bit integer, one byte at a time.
    pub fn read_u32_be(&mut self) -> Result<u32> {
        let mut value = 0u32;
        for _ in 0..4 {
            value = (value << 8) | u32::from(self.read_byte()?);
        }
        Ok(value)
    }
}

/// A bit-level writer over any [`ByteSink`].
///
/// Bits accumulate in a one-byte buffer which is emitted as soon as it is
/// full. Call [`BitWriter::flush`] or [`BitWriter::finish`] when done to emit
/// the trailing partial byte.
#[derive(Debug)]
pub struct BitWriter<W: ByteSink> {
    /// Underlying sink.
    writer: W,
    /// Pending bits, right-aligned.
    buffer: u8,
    /// Number of pending bits in `buffer`.
    bits_in_buffer: u8,
    /// Total bits written.
    total_bits_written: u64,
}

impl<W: ByteSink> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given sink.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Get a reference to the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get the total number of bits written so far (padding excluded).
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.buffer = (self.buffer << 1) | u8::from(bit);
        self.bits_in_buffer += 1;
        self.total_bits_written += 1;

        if self.bits_in_buffer == 8 {
            self.writer.write_byte(self.buffer)?;
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }
        Ok(())
    }

    /// Write the `count` least significant bits of `value`, MSB first.
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");

        for i in (0..count).rev() {
            self.write_bit((value >> i) & 1 == 1)?;
        }
        Ok(())
    }

    /// Write eight bits.
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write_bits(u32::from(byte), 8)
    }

    /// Write a big-endian 32-bit integer, one byte at a time.
    pub fn write_u32_be(&mut self, value: u32) -> Result<()> {
        for byte in value.to_be_bytes() {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    /// Emit any partial byte, zero-padded in its low bits.
    ///
    /// Calling this on a byte-aligned writer emits nothing.
    pub fn flush(&mut self) -> Result<()> {
        if self.bits_in_buffer > 0 {
            let byte = self.buffer << (8 - self.bits_in_buffer);
            self.writer.write_byte(byte)?;
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }
        self.writer.flush_sink()
    }

    /// Flush and return the underlying sink.
    pub fn finish(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }
}

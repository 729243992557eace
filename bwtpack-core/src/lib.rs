//! # bwtpack Core
//!
//! Core components for the bwtpack block-sorting compressor.
//!
//! This crate provides the building blocks every pipeline stage sits on:
//!
//! - [`bitstream`]: MSB-first bit-level I/O with a sticky end-of-stream flag
//! - [`traits`]: the byte source / byte sink capabilities the codec is driven through
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L2: Codec (bwtpack)                                     │
//! │     RLE → BWT → MTF → RLE → Huffman, container header   │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitReader/BitWriter, ByteSource/ByteSink, errors    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use bwtpack_core::bitstream::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_u32_be(1234).unwrap();
//! let bytes = writer.finish().unwrap();
//!
//! let mut reader = BitReader::new(&bytes[..]);
//! assert_eq!(reader.read_u32_be().unwrap(), 1234);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;
pub mod traits;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{BwtPackError, Result};
pub use traits::{ByteSink, ByteSource, read_to_vec};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitReader, BitWriter};
    pub use crate::error::{BwtPackError, Result};
    pub use crate::traits::{ByteSink, ByteSource};
}

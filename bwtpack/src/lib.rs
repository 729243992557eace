//! Block-sorting compression for bwtpack.
//!
//! This crate provides a pure Rust lossless compressor built as a pipeline
//! of reversible stages:
//! 1. Run-Length Encoding (RLE) - Escape-marker encoding of byte runs
//! 2. Burrows-Wheeler Transform (BWT) - Block sorting for better compression
//! 3. Move-to-Front Transform (MTF) - Locality transformation
//! 4. Run-Length Encoding again - Collapses the zero runs MTF produces
//! 5. Huffman Coding - Final entropy coding
//!
//! The whole input is buffered and transformed as a single block. The
//! container is a 24-byte header of six big-endian sizes, the serialized
//! Huffman tree, and the Huffman-coded payload. Empty input compresses to
//! empty output.
//!
//! ## Example
//!
//! ```rust
//! use bwtpack::{compress, decompress};
//!
//! let original = vec![0x41u8; 200];
//! let compressed = compress(&original).unwrap();
//! assert!(compressed.len() < original.len());
//! assert_eq!(decompress(&compressed).unwrap(), original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Burrows-Wheeler Transform implementation.
pub mod bwt;
pub mod config;
mod decode;
mod encode;
pub mod header;
pub mod huffman;
pub mod mtf;
pub mod rle;

pub use config::{BwtAlgorithm, DecodeOptions, EncodeOptions, TruncationPolicy};
pub use decode::{decode, decompress, decompress_with};
pub use encode::{compress, compress_with, encode, encode_slice};
pub use header::{HEADER_SIZE, Header};

pub use bwtpack_core::{BwtPackError, ByteSink, ByteSource, Result};

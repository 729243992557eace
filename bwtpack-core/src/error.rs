//! Error types for bwtpack operations.
//!
//! Every failure the pipeline can report is a variant of [`BwtPackError`].
//! Decoding under the lenient truncation policy never produces the
//! stream-shape variants; it recovers instead and logs a warning.

use std::io;
use thiserror::Error;

/// The main error type for bwtpack operations.
#[derive(Debug, Error)]
pub enum BwtPackError {
    /// I/O error from the underlying byte source or sink.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid container header.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },

    /// BWT primary index outside the transformed block.
    #[error("Invalid BWT primary index {index} for block of {size} bytes")]
    InvalidBwtIndex {
        /// The stored primary index.
        index: u32,
        /// Size of the transformed block.
        size: u32,
    },

    /// The compressed stream ended before the named part was complete.
    #[error("Unexpected end of stream while reading {context}")]
    UnexpectedEof {
        /// Which part of the stream was being read.
        context: &'static str,
    },

    /// Corrupted data in the compressed stream.
    #[error("Corrupted data at offset {offset}: {message}")]
    CorruptedData {
        /// Byte (or bit, for the tree) offset where corruption was detected.
        offset: u64,
        /// Description of the corruption.
        message: String,
    },

    /// A decoding stage produced a different length than the header records.
    #[error("Size mismatch after {stage}: header says {expected} bytes, decoded {actual}")]
    SizeMismatch {
        /// Pipeline stage that produced the buffer.
        stage: &'static str,
        /// Size recorded in the header.
        expected: u64,
        /// Size actually produced.
        actual: u64,
    },

    /// A buffer is too long to be described by the 32-bit header fields.
    #[error("Input too large: {size} bytes exceeds the 32-bit container limit")]
    InputTooLarge {
        /// Length of the offending buffer.
        size: u64,
    },
}

/// Result type alias for bwtpack operations.
pub type Result<T> = std::result::Result<T, BwtPackError>;

impl BwtPackError {
    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create an invalid BWT index error.
    pub fn invalid_bwt_index(index: u32, size: u32) -> Self {
        Self::InvalidBwtIndex { index, size }
    }

    /// Create an unexpected end-of-stream error.
    pub fn unexpected_eof(context: &'static str) -> Self {
        Self::UnexpectedEof { context }
    }

    /// Create a corrupted data error.
    pub fn corrupted(offset: u64, message: impl Into<String>) -> Self {
        Self::CorruptedData {
            offset,
            message: message.into(),
        }
    }

    /// Create a stage size mismatch error.
    pub fn size_mismatch(stage: &'static str, expected: u64, actual: u64) -> Self {
        Self::SizeMismatch {
            stage,
            expected,
            actual,
        }
    }

    /// Create an input too large error.
    pub fn input_too_large(size: u64) -> Self {
        Self::InputTooLarge { size }
    }

    /// Whether this error describes a malformed or truncated stream rather
    /// than a failure of the surrounding I/O.
    pub fn is_format_error(&self) -> bool {
        !matches!(self, Self::Io(_) | Self::InputTooLarge { .. })
    }
}

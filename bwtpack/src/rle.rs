//! Run-Length Encoding.
//!
//! The same escape-marker scheme is used twice in the pipeline: once on the
//! raw input and once on the MTF output.
//!
//! A run is written as the triple `[RLE_MARKER, byte, count]` when it is at
//! least [`MIN_RUN`] long, or when the byte is the marker itself. Every
//! literal marker byte is escaped, so the decoder can treat each marker as
//! the start of a triple without lookahead.

use crate::config::TruncationPolicy;
use bwtpack_core::error::{BwtPackError, Result};
use log::warn;

/// Escape byte announcing a `(symbol, count)` pair.
pub const RLE_MARKER: u8 = 0xFF;

/// Shortest run of an ordinary byte that is collapsed into a triple.
pub const MIN_RUN: usize = 4;

/// Longest run one triple can describe.
pub const MAX_RUN: usize = 255;

/// Encode runs of identical bytes.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(data.len());
    let mut i = 0;

    while i < data.len() {
        let byte = data[i];
        let mut run_len = 1;

        while i + run_len < data.len() && data[i + run_len] == byte && run_len < MAX_RUN {
            run_len += 1;
        }

        if run_len >= MIN_RUN || (byte == RLE_MARKER && run_len >= 2) {
            result.extend_from_slice(&[RLE_MARKER, byte, run_len as u8]);
            i += run_len;
        } else if byte == RLE_MARKER {
            result.extend_from_slice(&[RLE_MARKER, RLE_MARKER, 1]);
            i += 1;
        } else {
            result.push(byte);
            i += 1;
        }
    }

    result
}

/// Decode an RLE stream.
///
/// A marker followed by fewer than two bytes is corruption under
/// [`TruncationPolicy::Strict`]; under [`TruncationPolicy::Lenient`] the
/// leftover bytes are copied through unchanged.
pub fn decode(data: &[u8], policy: TruncationPolicy) -> Result<Vec<u8>> {
    let mut result = Vec::with_capacity(data.len() * 2);
    let mut i = 0;

    while i < data.len() {
        if data[i] != RLE_MARKER {
            result.push(data[i]);
            i += 1;
            continue;
        }

        match data.get(i + 1..i + 3) {
            Some(&[symbol, count]) => {
                result.resize(result.len() + count as usize, symbol);
                i += 3;
            }
            _ if policy.is_strict() => {
                return Err(BwtPackError::corrupted(
                    i as u64,
                    "run marker without symbol and count",
                ));
            }
            _ => {
                warn!("truncated run triple at offset {i}, copying {} bytes", data.len() - i);
                result.extend_from_slice(&data[i..]);
                break;
            }
        }
    }

    Ok(result)
}

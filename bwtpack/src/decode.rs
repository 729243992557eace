//! Pipeline decoder.
//!
//! Decoding reverses the encoder stage by stage: Huffman, RLE, MTF, inverse
//! BWT, RLE. The whole pipeline runs before anything reaches the sink, so a
//! failed decode never leaves partial output behind.

use crate::config::{DecodeOptions, TruncationPolicy};
use crate::header::Header;
use crate::huffman::HuffmanTree;
use crate::{bwt, mtf, rle};
use bwtpack_core::error::{BwtPackError, Result};
use bwtpack_core::{BitReader, ByteSink, ByteSource};
use log::{debug, warn};

/// Decode a compressed stream from `source` and write the original bytes to
/// `sink`. Returns the number of bytes written.
pub fn decode<R: ByteSource, W: ByteSink>(
    source: R,
    mut sink: W,
    options: &DecodeOptions,
) -> Result<usize> {
    let data = decode_stream(source, options.truncation)?;
    sink.write_all_bytes(&data)?;
    sink.flush_sink()?;
    Ok(data.len())
}

/// Decompress data with default (strict) options.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_with(data, &DecodeOptions::default())
}

/// Decompress data with the given options.
pub fn decompress_with(data: &[u8], options: &DecodeOptions) -> Result<Vec<u8>> {
    decode_stream(data, options.truncation)
}

/// Under the lenient policy a failure means "no output"; under the strict
/// policy it is returned as is.
fn abandon(policy: TruncationPolicy, err: BwtPackError) -> Result<Vec<u8>> {
    if policy.is_strict() {
        return Err(err);
    }
    warn!("decode: {err}; writing nothing");
    Ok(Vec::new())
}

/// Compare a decoded length with the header.
fn check_len(
    policy: TruncationPolicy,
    stage: &'static str,
    expected: u32,
    actual: usize,
) -> Result<()> {
    if actual as u64 == u64::from(expected) {
        return Ok(());
    }
    if policy.is_strict() {
        return Err(BwtPackError::size_mismatch(stage, expected.into(), actual as u64));
    }
    warn!("decode: {stage} produced {actual} bytes, header says {expected}");
    Ok(())
}

fn decode_stream<R: ByteSource>(source: R, policy: TruncationPolicy) -> Result<Vec<u8>> {
    let mut reader = BitReader::new(source);

    let header = match Header::read_from(&mut reader)? {
        Some(header) => header,
        // An empty stream is the encoding of an empty input.
        None if reader.bits_read() == 0 => return Ok(Vec::new()),
        None => return abandon(policy, BwtPackError::unexpected_eof("header")),
    };
    debug!("decode: {header:?}");

    if let Err(err) = header.validate(policy) {
        return abandon(policy, err);
    }

    let tree = match HuffmanTree::read_from(&mut reader) {
        Ok(Some(tree)) => tree,
        Ok(None) => return abandon(policy, BwtPackError::unexpected_eof("Huffman tree")),
        Err(err) if err.is_format_error() => return abandon(policy, err),
        Err(err) => return Err(err),
    };

    // Step 5: Huffman decode
    let rle2 = tree.decode(&mut reader, header.rle2_size as usize)?;
    if rle2.len() < header.rle2_size as usize {
        if policy.is_strict() {
            return Err(BwtPackError::unexpected_eof("Huffman payload"));
        }
        warn!(
            "decode: stream ended after {} of {} symbols",
            rle2.len(),
            header.rle2_size
        );
    }

    // Step 4: Undo the second RLE
    let mtf_data = rle::decode(&rle2, policy)?;
    check_len(policy, "second RLE decode", header.mtf_size, mtf_data.len())?;

    // Step 3: Inverse MTF
    let bwt_data = mtf::decode(&mtf_data);

    // Step 2: Inverse BWT
    let rle1 = bwt::inverse_transform(&bwt_data, header.bwt_primary_index as usize);
    check_len(policy, "inverse BWT", header.rle1_size, rle1.len())?;

    // Step 1: Undo the first RLE
    let data = rle::decode(&rle1, policy)?;
    check_len(policy, "first RLE decode", header.original_size, data.len())?;

    debug!(
        "decode: {} symbols -> {} MTF -> {} RLE -> {} bytes",
        rle2.len(),
        mtf_data.len(),
        rle1.len(),
        data.len()
    );
    Ok(data)
}

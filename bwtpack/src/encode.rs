//! Pipeline encoder.

use crate::config::EncodeOptions;
use crate::header::{Header, size_field};
use crate::huffman::{FrequencyTable, HuffmanTree};
use crate::{bwt, mtf, rle};
use bwtpack_core::error::{BwtPackError, Result};
use bwtpack_core::{BitWriter, ByteSink, ByteSource, read_to_vec};
use log::debug;

/// Buffer the whole source, compress it and write the container to `sink`.
///
/// Returns the header that was written, or `None` for empty input, in
/// which case nothing is written at all.
pub fn encode<R: ByteSource, W: ByteSink>(
    mut source: R,
    sink: W,
    options: &EncodeOptions,
) -> Result<Option<Header>> {
    let data = read_to_vec(&mut source)?;
    encode_slice(&data, sink, options)
}

/// Compress an in-memory buffer with the given options.
pub fn encode_slice<W: ByteSink>(
    data: &[u8],
    sink: W,
    options: &EncodeOptions,
) -> Result<Option<Header>> {
    if data.is_empty() {
        debug!("encode: empty input, nothing to write");
        return Ok(None);
    }
    let original_size = size_field(data.len())?;

    // Step 1: Initial RLE
    let rle1 = rle::encode(data);
    debug!("encode: RLE {} -> {} bytes", data.len(), rle1.len());

    // Step 2: Burrows-Wheeler Transform
    let block = bwt::transform_with(&rle1, options.bwt_algorithm);
    debug!(
        "encode: BWT {} bytes, primary index {}",
        block.transformed.len(),
        block.primary_index
    );

    // Step 3: Move-to-Front Transform
    let mtf_data = mtf::encode(&block.transformed);

    // Step 4: Second RLE over the MTF ranks
    let rle2 = rle::encode(&mtf_data);
    debug!("encode: MTF+RLE {} -> {} bytes", mtf_data.len(), rle2.len());

    let header = Header {
        original_size,
        bwt_primary_index: size_field(block.primary_index)?,
        rle1_size: size_field(rle1.len())?,
        bwt_size: size_field(block.transformed.len())?,
        mtf_size: size_field(mtf_data.len())?,
        rle2_size: size_field(rle2.len())?,
    };
    debug!("encode: {header:?}");

    // Step 5: Huffman coding
    let freqs = FrequencyTable::from_data(&rle2);
    let tree = HuffmanTree::from_frequencies(&freqs)
        .ok_or_else(|| BwtPackError::corrupted(0, "empty Huffman alphabet"))?;
    let codes = tree.code_table();

    let mut writer = BitWriter::new(sink);
    header.write_to(&mut writer)?;
    tree.write_to(&mut writer)?;
    codes.encode(&rle2, &mut writer)?;
    let bits = writer.bits_written();
    writer.finish()?;

    debug!(
        "encode: {} symbols over {} distinct values, {} bytes out",
        rle2.len(),
        freqs.distinct_symbols(),
        bits.div_ceil(8)
    );
    Ok(Some(header))
}

/// Compress data with default options.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_with(data, &EncodeOptions::default())
}

/// Compress data with the given options.
pub fn compress_with(data: &[u8], options: &EncodeOptions) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    encode_slice(data, &mut output, options)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::HEADER_SIZE;

    #[test]
    fn test_compress_empty() {
        assert!(compress(b"").unwrap().is_empty());
        let mut sink = Vec::new();
        assert_eq!(encode(&b""[..], &mut sink, &EncodeOptions::default()).unwrap(), None);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_header_fields_for_run() {
        let data = [0x41u8; 200];
        let mut sink = Vec::new();
        let header = encode(&data[..], &mut sink, &EncodeOptions::default())
            .unwrap()
            .unwrap();

        assert_eq!(header.original_size, 200);
        assert_eq!(header.rle1_size, 3);
        assert_eq!(header.bwt_size, 3);
        assert_eq!(header.mtf_size, 3);
        assert!(header.bwt_primary_index < 3);
        assert_eq!(&sink[..4], &[0, 0, 0, 200]);
        assert!(sink.len() > HEADER_SIZE);
    }

    #[test]
    fn test_single_byte_layout() {
        let compressed = compress(&[0x7A]).unwrap();
        // Header, then tree: internal(0) leaf(1) 0x7A leaf(1) 0x00, then code "0".
        let expected_header = [1u32, 0, 1, 1, 1, 1].map(u32::to_be_bytes).concat();
        assert_eq!(&compressed[..HEADER_SIZE], expected_header.as_slice());
        // 0 1 01111010 1 00000000 0 -> 0101_1110 1010_0000 0000_0000
        assert_eq!(&compressed[HEADER_SIZE..], &[0x5E, 0xA0, 0x00]);
    }
}

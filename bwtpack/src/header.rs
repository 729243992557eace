//! Container header.
//!
//! Six big-endian 32-bit fields open every non-empty stream, ahead of the
//! serialized Huffman tree:
//!
//! | # | Field               | Meaning                          |
//! |---|---------------------|----------------------------------|
//! | 1 | `original_size`     | length of the uncompressed input |
//! | 2 | `bwt_primary_index` | BWT primary index                |
//! | 3 | `rle1_size`         | length after the first RLE pass  |
//! | 4 | `bwt_size`          | length after BWT (= field 3)     |
//! | 5 | `mtf_size`          | length after MTF (= field 4)     |
//! | 6 | `rle2_size`         | length after the second RLE pass |

use crate::config::TruncationPolicy;
use bwtpack_core::error::{BwtPackError, Result};
use bwtpack_core::{BitReader, BitWriter, ByteSink, ByteSource};

/// Number of 32-bit fields in the header.
pub const HEADER_FIELDS: usize = 6;

/// Encoded header size in bytes.
pub const HEADER_SIZE: usize = HEADER_FIELDS * 4;

/// The six size/index fields of a compressed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    /// Length of the uncompressed input.
    pub original_size: u32,
    /// BWT primary index.
    pub bwt_primary_index: u32,
    /// Length after the first RLE pass.
    pub rle1_size: u32,
    /// Length after BWT.
    pub bwt_size: u32,
    /// Length after MTF.
    pub mtf_size: u32,
    /// Length after the second RLE pass (Huffman symbol count).
    pub rle2_size: u32,
}

impl Header {
    fn fields(&self) -> [u32; HEADER_FIELDS] {
        [
            self.original_size,
            self.bwt_primary_index,
            self.rle1_size,
            self.bwt_size,
            self.mtf_size,
            self.rle2_size,
        ]
    }

    /// Write all six fields.
    pub fn write_to<W: ByteSink>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        for field in self.fields() {
            writer.write_u32_be(field)?;
        }
        Ok(())
    }

    /// Read all six fields. Returns `Ok(None)` if the stream ends first.
    pub fn read_from<R: ByteSource>(reader: &mut BitReader<R>) -> Result<Option<Self>> {
        let mut fields = [0u32; HEADER_FIELDS];
        for field in &mut fields {
            *field = reader.read_u32_be()?;
        }
        if reader.is_eof() {
            return Ok(None);
        }

        let [
            original_size,
            bwt_primary_index,
            rle1_size,
            bwt_size,
            mtf_size,
            rle2_size,
        ] = fields;
        Ok(Some(Self {
            original_size,
            bwt_primary_index,
            rle1_size,
            bwt_size,
            mtf_size,
            rle2_size,
        }))
    }

    /// Check that the header describes a decodable stream.
    ///
    /// Zero sizes and an out-of-range primary index are always rejected.
    /// The strict policy also requires fields 3, 4 and 5 to agree.
    pub fn validate(&self, policy: TruncationPolicy) -> Result<()> {
        if self.fields().iter().enumerate().any(|(i, &f)| i != 1 && f == 0) {
            return Err(BwtPackError::invalid_header("zero-sized field"));
        }
        if self.bwt_primary_index >= self.bwt_size {
            return Err(BwtPackError::invalid_bwt_index(
                self.bwt_primary_index,
                self.bwt_size,
            ));
        }
        if policy.is_strict()
            && (self.rle1_size != self.bwt_size || self.bwt_size != self.mtf_size)
        {
            return Err(BwtPackError::invalid_header(format!(
                "inconsistent block sizes: rle {} bwt {} mtf {}",
                self.rle1_size, self.bwt_size, self.mtf_size
            )));
        }
        Ok(())
    }
}

/// Convert a buffer length to a header field.
pub(crate) fn size_field(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| BwtPackError::input_too_large(len as u64))
}

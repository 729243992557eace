//! Huffman coding for the final pipeline stage.
//!
//! The tree is built from byte frequencies with a min-priority queue,
//! serialized in preorder (one leaf-flag bit per node, plus eight value bits
//! per leaf) and walked bit by bit on decode.
//!
//! Construction is deterministic. Queue entries are ordered by
//! `(frequency, sequence)`. Leaves take sequence numbers in ascending byte
//! order and every merged node takes the next free number. The first entry
//! popped becomes the left child.

use bwtpack_core::error::{BwtPackError, Result};
use bwtpack_core::{BitReader, BitWriter, ByteSink, ByteSource};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Deepest leaf a tree over at most 256 leaves can have.
pub const MAX_TREE_DEPTH: usize = 255;

/// Value of the zero-frequency sibling added to single-symbol trees.
pub const SYNTHETIC_SYMBOL: u8 = 0;

/// Occurrence counts for every byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    /// Count every byte of `data`.
    pub fn from_data(data: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        for &byte in data {
            counts[byte as usize] += 1;
        }
        Self { counts }
    }

    /// Count for one byte value.
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of byte values with a nonzero count.
    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// `(symbol, count)` for every nonzero count, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        (0..=255u8)
            .zip(self.counts.iter().copied())
            .filter(|&(_, count)| count > 0)
    }
}

/// A node of a Huffman tree. Internal nodes own both children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A leaf holding one byte value.
    Leaf(u8),
    /// An internal node: left child (bit 0), right child (bit 1).
    Internal(Box<Node>, Box<Node>),
}

/// A prefix code, stored right-aligned and emitted MSB first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    /// Code bits, right-aligned.
    pub bits: u64,
    /// Number of significant bits.
    pub len: u8,
}

impl Code {
    fn child(self, bit: bool) -> Self {
        debug_assert!(self.len < 64, "Huffman code longer than 64 bits");
        Self {
            bits: (self.bits << 1) | u64::from(bit),
            len: self.len + 1,
        }
    }

    /// Whether `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && other.bits >> (other.len - self.len) == self.bits
    }

    /// The code as a string of `'0'`/`'1'` characters.
    pub fn to_bit_string(&self) -> String {
        (0..self.len)
            .rev()
            .map(|i| if (self.bits >> i) & 1 == 1 { '1' } else { '0' })
            .collect()
    }
}

/// Mapping from byte value to its prefix code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; 256],
}

impl CodeTable {
    /// Code for a byte value, if the tree has a leaf for it.
    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// `(symbol, code)` for every coded symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        (0..=255u8)
            .zip(self.codes.iter())
            .filter_map(|(symbol, code)| code.map(|c| (symbol, c)))
    }

    /// Check that no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<Code> = self.iter().map(|(_, c)| c).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }

    /// Emit the code of every byte of `data`.
    pub fn encode<W: ByteSink>(&self, data: &[u8], writer: &mut BitWriter<W>) -> Result<()> {
        for (offset, &byte) in data.iter().enumerate() {
            let code = self.get(byte).ok_or_else(|| {
                BwtPackError::corrupted(offset as u64, format!("no Huffman code for {byte:#04x}"))
            })?;
            for i in (0..code.len).rev() {
                writer.write_bit((code.bits >> i) & 1 == 1)?;
            }
        }
        Ok(())
    }
}

/// An owned Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build a tree from frequencies. Returns `None` if every count is zero.
    ///
    /// A single distinct symbol gets a synthetic [`SYNTHETIC_SYMBOL`] sibling
    /// so that its code is one bit long.
    pub fn from_frequencies(freqs: &FrequencyTable) -> Option<Self> {
        // Arena indexed by sequence number; entries are taken when merged.
        let mut arena: Vec<Option<Node>> = Vec::with_capacity(511);
        let mut heap = BinaryHeap::new();

        for (symbol, count) in freqs.iter() {
            heap.push(Reverse((count, arena.len())));
            arena.push(Some(Node::Leaf(symbol)));
        }

        if heap.len() == 1 {
            let Reverse((_, only)) = heap.pop()?;
            let leaf = arena[only].take()?;
            return Some(Self {
                root: Node::Internal(Box::new(leaf), Box::new(Node::Leaf(SYNTHETIC_SYMBOL))),
            });
        }

        loop {
            let Reverse((left_freq, left)) = heap.pop()?;
            let Some(Reverse((right_freq, right))) = heap.pop() else {
                return arena[left].take().map(|root| Self { root });
            };

            let merged = Node::Internal(Box::new(arena[left].take()?), Box::new(arena[right].take()?));
            heap.push(Reverse((left_freq + right_freq, arena.len())));
            arena.push(Some(merged));
        }
    }

    /// Wrap an existing root node.
    pub fn from_root(root: Node) -> Self {
        Self { root }
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Derive the code of every leaf by a depth-first walk.
    ///
    /// Left steps append `0`, right steps append `1`. A tree that is a lone
    /// leaf gets the code `0`. If two leaves share a value, the first one
    /// reached keeps its code.
    pub fn code_table(&self) -> CodeTable {
        fn walk(node: &Node, code: Code, codes: &mut [Option<Code>; 256]) {
            match node {
                Node::Leaf(value) => {
                    let slot = &mut codes[*value as usize];
                    if slot.is_none() {
                        *slot = Some(code);
                    }
                }
                Node::Internal(left, right) => {
                    walk(left, code.child(false), codes);
                    walk(right, code.child(true), codes);
                }
            }
        }

        let mut codes = [None; 256];
        match &self.root {
            Node::Leaf(value) => codes[*value as usize] = Some(Code { bits: 0, len: 1 }),
            root => walk(root, Code { bits: 0, len: 0 }, &mut codes),
        }
        CodeTable { codes }
    }

    /// Serialize the tree in preorder.
    pub fn write_to<W: ByteSink>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        fn write_node<W: ByteSink>(node: &Node, writer: &mut BitWriter<W>) -> Result<()> {
            match node {
                Node::Leaf(value) => {
                    writer.write_bit(true)?;
                    writer.write_byte(*value)
                }
                Node::Internal(left, right) => {
                    writer.write_bit(false)?;
                    write_node(left, writer)?;
                    write_node(right, writer)
                }
            }
        }

        write_node(&self.root, writer)
    }

    /// Deserialize a preorder tree.
    ///
    /// Returns `Ok(None)` if the stream ends before the tree is complete, and
    /// an error if the tree nests deeper than [`MAX_TREE_DEPTH`].
    pub fn read_from<R: ByteSource>(reader: &mut BitReader<R>) -> Result<Option<Self>> {
        fn read_node<R: ByteSource>(reader: &mut BitReader<R>, depth: usize) -> Result<Option<Node>> {
            if depth > MAX_TREE_DEPTH {
                return Err(BwtPackError::corrupted(
                    reader.bits_read(),
                    format!("Huffman tree deeper than {MAX_TREE_DEPTH} levels"),
                ));
            }

            let is_leaf = reader.read_bit()?;
            if reader.is_eof() {
                return Ok(None);
            }

            if is_leaf {
                let value = reader.read_byte()?;
                return Ok((!reader.is_eof()).then_some(Node::Leaf(value)));
            }

            let Some(left) = read_node(reader, depth + 1)? else {
                return Ok(None);
            };
            let Some(right) = read_node(reader, depth + 1)? else {
                return Ok(None);
            };
            Ok(Some(Node::Internal(Box::new(left), Box::new(right))))
        }

        Ok(read_node(reader, 0)?.map(|root| Self { root }))
    }

    /// Decode up to `count` symbols.
    ///
    /// Stops early, without error, when the stream is exhausted; callers
    /// compare the returned length with `count`.
    pub fn decode<R: ByteSource>(&self, reader: &mut BitReader<R>, count: usize) -> Result<Vec<u8>> {
        // Never trust a header-supplied count for the up-front allocation.
        let mut output = Vec::with_capacity(count.min(1 << 20));
        let mut node = &self.root;

        while output.len() < count {
            let bit = reader.read_bit()?;
            if reader.is_eof() {
                break;
            }

            if let Node::Internal(left, right) = node {
                node = if bit { &**right } else { &**left };
            }
            if let Node::Leaf(value) = node {
                output.push(*value);
                node = &self.root;
            }
        }

        Ok(output)
    }
}

//! Move-to-Front Transform.
//!
//! MTF replaces each byte with its position in a recency list, then moves
//! that byte to the front. After a BWT the input is full of short runs, so
//! the output is dominated by zeros and other small values.

/// Recency list of all 256 byte values, shared by both directions.
#[derive(Debug, Clone)]
struct RecencyList([u8; 256]);

impl RecencyList {
    /// Natural order `[0, 1, ..., 255]`.
    fn new() -> Self {
        let mut list = [0u8; 256];
        for (slot, value) in list.iter_mut().zip(0..=255u8) {
            *slot = value;
        }
        Self(list)
    }

    /// Current position of `byte`. Always found: the list is a permutation.
    fn position(&self, byte: u8) -> usize {
        self.0.iter().position(|&b| b == byte).unwrap_or_default()
    }

    fn get(&self, pos: u8) -> u8 {
        self.0[pos as usize]
    }

    fn move_to_front(&mut self, pos: usize) {
        if pos > 0 {
            self.0[..=pos].rotate_right(1);
        }
    }
}

/// Perform Move-to-Front transform.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut list = RecencyList::new();
    let mut result = Vec::with_capacity(data.len());

    for &byte in data {
        let pos = list.position(byte);
        result.push(pos as u8);
        list.move_to_front(pos);
    }

    result
}

/// Perform inverse Move-to-Front transform.
pub fn decode(data: &[u8]) -> Vec<u8> {
    let mut list = RecencyList::new();
    let mut result = Vec::with_capacity(data.len());

    for &pos in data {
        result.push(list.get(pos));
        list.move_to_front(pos as usize);
    }

    result
}

//! Burrows-Wheeler Transform.
//!
//! The BWT is a reversible permutation that groups bytes with similar
//! contexts together, making the data more compressible for the MTF and
//! RLE stages that follow.
//!
//! The forward transform sorts all cyclic rotations of the block. Rotations
//! that are fully identical (periodic blocks) keep their starting-index
//! order, so the output is deterministic regardless of the sorter used.

use crate::config::BwtAlgorithm;
use log::trace;
use std::cmp::Ordering;

/// Result of a forward transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BwtOutput {
    /// Last byte of every sorted rotation.
    pub transformed: Vec<u8>,
    /// Position, among the sorted rotations, of the rotation starting at 0.
    pub primary_index: usize,
}

/// Perform the Burrows-Wheeler Transform with the default sorter.
pub fn transform(data: &[u8]) -> BwtOutput {
    transform_with(data, BwtAlgorithm::default())
}

/// Perform the Burrows-Wheeler Transform with the given sorter.
pub fn transform_with(data: &[u8], algorithm: BwtAlgorithm) -> BwtOutput {
    if data.is_empty() {
        return BwtOutput {
            transformed: Vec::new(),
            primary_index: 0,
        };
    }

    trace!("BWT: sorting {} rotations with {:?}", data.len(), algorithm);
    let order = match algorithm {
        BwtAlgorithm::PrefixDoubling => sort_rotations_doubling(data),
        BwtAlgorithm::RotationSort => sort_rotations_direct(data),
    };

    let n = data.len();
    let mut primary_index = 0;
    let mut transformed = Vec::with_capacity(n);
    for (row, &start) in order.iter().enumerate() {
        if start == 0 {
            primary_index = row;
        }
        transformed.push(data[(start + n - 1) % n]);
    }

    BwtOutput {
        transformed,
        primary_index,
    }
}

/// Compare the rotations starting at `a` and `b` over the full block,
/// skipping the first `skip` bytes already known to be equal.
fn compare_rotations(data: &[u8], a: usize, b: usize, skip: usize) -> Ordering {
    let n = data.len();
    for i in skip..n {
        match data[(a + i) % n].cmp(&data[(b + i) % n]) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Direct comparator sort. The comparator borrows the block through its
/// closure, so concurrent transforms never share state.
fn sort_rotations_direct(data: &[u8]) -> Vec<usize> {
    let n = data.len();
    let mut indices: Vec<usize> = (0..n).collect();

    // Pre-compute the first few bytes of every rotation as a sort key.
    let key_len = n.min(4);
    let keys: Vec<u32> = (0..n)
        .map(|i| (0..key_len).fold(0u32, |key, j| (key << 8) | u32::from(data[(i + j) % n])))
        .collect();

    // Stable sort: identical rotations stay in ascending start order.
    indices.sort_by(|&a, &b| {
        keys[a]
            .cmp(&keys[b])
            .then_with(|| compare_rotations(data, a, b, key_len))
    });

    indices
}

/// Rank-doubling sort of cyclic rotations.
///
/// After round `k`, `rank[i]` orders rotation `i` by its first `2k` bytes.
/// Once `2k >= n` the ranks order complete rotations.
fn sort_rotations_doubling(data: &[u8]) -> Vec<usize> {
    let n = data.len();
    let mut order: Vec<usize> = (0..n).collect();
    let mut rank: Vec<usize> = data.iter().map(|&b| b as usize).collect();
    let mut next_rank = vec![0usize; n];
    let mut k = 1;
    let mut rounds = 0;

    loop {
        {
            let rank = &rank;
            let key = |i: usize| (rank[i], rank[(i + k) % n]);
            // Must be stable: ties keep the previous round's order, which is
            // ascending start index for rotations equal so far.
            sort_by_key_stable(&mut order, &key);

            next_rank[order[0]] = 0;
            for w in 1..n {
                let bump = usize::from(key(order[w - 1]) != key(order[w]));
                next_rank[order[w]] = next_rank[order[w - 1]] + bump;
            }
        }
        std::mem::swap(&mut rank, &mut next_rank);
        rounds += 1;

        if rank[order[n - 1]] == n - 1 || 2 * k >= n {
            break;
        }
        k *= 2;
    }

    trace!("BWT: doubling finished after {rounds} rounds");
    order
}

#[cfg(not(feature = "parallel"))]
fn sort_by_key_stable<K, F>(order: &mut [usize], key: F)
where
    K: Ord,
    F: Fn(usize) -> K,
{
    order.sort_by_key(|&i| key(i));
}

#[cfg(feature = "parallel")]
fn sort_by_key_stable<K, F>(order: &mut [usize], key: F)
where
    K: Ord + Send,
    F: Fn(usize) -> K + Sync,
{
    use rayon::prelude::*;

    // Below this the thread pool costs more than it saves.
    const PARALLEL_THRESHOLD: usize = 40_000;

    if order.len() > PARALLEL_THRESHOLD {
        order.par_sort_by_key(|&i| key(i));
    } else {
        order.sort_by_key(|&i| key(i));
    }
}

/// Perform the inverse Burrows-Wheeler Transform.
///
/// Returns an empty vector for empty input or an out-of-range
/// `primary_index`.
pub fn inverse_transform(data: &[u8], primary_index: usize) -> Vec<u8> {
    let n = data.len();
    if n == 0 || primary_index >= n {
        return Vec::new();
    }

    // Count occurrences of each byte
    let mut counts = [0usize; 256];
    for &byte in data {
        counts[byte as usize] += 1;
    }

    // start[c] = number of bytes strictly less than c
    let mut start = [0usize; 256];
    let mut total = 0;
    for (slot, &count) in start.iter_mut().zip(counts.iter()) {
        *slot = total;
        total += count;
    }

    // LF-mapping: row i ends with data[i]; next[i] is the row starting with it.
    let mut next = vec![0usize; n];
    for (i, &byte) in data.iter().enumerate() {
        next[i] = start[byte as usize];
        start[byte as usize] += 1;
    }

    // Walking from the primary row emits the block back to front.
    let mut result = Vec::with_capacity(n);
    let mut pos = primary_index;
    for _ in 0..n {
        result.push(data[pos]);
        pos = next[pos];
    }
    result.reverse();

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(data: &[u8]) -> BwtOutput {
        let n = data.len();
        let mut rotations: Vec<(Vec<u8>, usize)> = (0..n)
            .map(|i| {
                let rot: Vec<u8> = data[i..].iter().chain(&data[..i]).copied().collect();
                (rot, i)
            })
            .collect();
        rotations.sort();
        BwtOutput {
            transformed: rotations.iter().map(|(r, _)| r[n - 1]).collect(),
            primary_index: rotations.iter().position(|(_, i)| *i == 0).unwrap(),
        }
    }

    #[test]
    fn test_bwt_empty() {
        let out = transform(b"");
        assert!(out.transformed.is_empty());
        assert_eq!(out.primary_index, 0);
        assert!(inverse_transform(b"", 0).is_empty());
    }

    #[test]
    fn test_bwt_single() {
        let out = transform(b"a");
        assert_eq!(out.transformed, b"a");
        assert_eq!(out.primary_index, 0);
        assert_eq!(inverse_transform(&out.transformed, 0), b"a");
    }

    #[test]
    fn test_bwt_banana() {
        // Rotations of "banana" sorted: abanan, anaban, ananab, banana, nabana, nanaba
        let out = transform(b"banana");
        assert_eq!(out.transformed, b"nnbaaa");
        assert_eq!(out.primary_index, 3);
        assert_eq!(inverse_transform(&out.transformed, 3), b"banana");
    }

    #[test]
    fn test_bwt_roundtrip() {
        let test_cases = [
            b"hello world".as_slice(),
            b"abracadabra",
            b"mississippi",
            b"aaaaa",
            b"abababab",
            b"abcde",
            b"the quick brown fox jumps over the lazy dog",
            &[0xFF, 0x00, 0xFF, 0x00, 0x01],
        ];

        for data in test_cases {
            for algorithm in [BwtAlgorithm::PrefixDoubling, BwtAlgorithm::RotationSort] {
                let out = transform_with(data, algorithm);
                assert_eq!(out, naive(data), "Sorter mismatch for {:?}", data);
                let recovered = inverse_transform(&out.transformed, out.primary_index);
                assert_eq!(recovered, data, "Failed for: {:?}", data);
            }
        }
    }

    #[test]
    fn test_bwt_periodic_ties_by_start_index() {
        // Every rotation of "abab" is one of two strings; ties keep start order.
        let out = transform(b"abab");
        assert_eq!(out.transformed, b"bbaa");
        assert_eq!(out.primary_index, 0);

        let out = transform(&[9u8; 17]);
        assert_eq!(out.transformed, vec![9u8; 17]);
        assert_eq!(out.primary_index, 0);
        assert_eq!(inverse_transform(&out.transformed, 0), vec![9u8; 17]);
    }

    #[test]
    fn test_bwt_sorters_agree_on_pseudo_random() {
        let mut seed: u64 = 0x1234_5678_9ABC_DEF0;
        let data: Vec<u8> = (0..2000)
            .map(|_| {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
                // Small alphabet to force long shared prefixes.
                b"ACGT"[(seed >> 62) as usize]
            })
            .collect();

        let doubling = transform_with(&data, BwtAlgorithm::PrefixDoubling);
        let direct = transform_with(&data, BwtAlgorithm::RotationSort);
        assert_eq!(doubling, direct);
        assert_eq!(inverse_transform(&doubling.transformed, doubling.primary_index), data);
    }

    #[test]
    fn test_bwt_inverse_out_of_range() {
        assert!(inverse_transform(b"abc", 3).is_empty());
        assert!(inverse_transform(b"abc", usize::MAX).is_empty());
    }

    #[test]
    fn test_bwt_inverse_any_index_in_range() {
        // Every in-range index decodes to some rotation without panicking.
        let out = transform(b"mississippi");
        for idx in 0..out.transformed.len() {
            assert_eq!(inverse_transform(&out.transformed, idx).len(), 11);
        }
    }

    #[test]
    fn test_bwt_groups_similar() {
        let out = transform(b"abababab");
        let runs = 1 + out
            .transformed
            .windows(2)
            .filter(|w| w[0] != w[1])
            .count();
        assert!(runs <= 4, "BWT should group similar bytes");
    }
}

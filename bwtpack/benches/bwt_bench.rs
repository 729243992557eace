//! Timing comparison of the two forward BWT sorters.

use bwtpack::BwtAlgorithm;
use bwtpack::bwt::{inverse_transform, transform_with};
use std::time::{Duration, Instant};

fn main() {
    // The direct sorter degrades badly on periodic input, so repeated
    // cases stay small.
    let test_cases = vec![
        ("small_text", generate_text(1024)),
        ("medium_text", generate_text(64 * 1024)),
        ("small_random", generate_random(1024)),
        ("medium_random", generate_random(64 * 1024)),
        ("small_repeated", generate_repeated(1024)),
        ("medium_repeated", generate_repeated(8 * 1024)),
    ];

    println!("BWT sorter benchmarks");
    println!("=====================\n");

    for (name, data) in &test_cases {
        println!("Test: {} ({} bytes)", name, data.len());

        let mut reference = None;
        for algorithm in [BwtAlgorithm::PrefixDoubling, BwtAlgorithm::RotationSort] {
            let start = Instant::now();
            let out = transform_with(data, algorithm);
            let forward_time = start.elapsed();

            println!(
                "  {:<16} {:7.2} MB/s ({:8} µs)",
                format!("{algorithm:?}:"),
                throughput(data.len(), forward_time),
                forward_time.as_micros()
            );

            match &reference {
                None => reference = Some(out),
                Some(expected) => assert_eq!(&out, expected, "sorters disagree on {name}"),
            }
        }

        if let Some(out) = reference {
            let start = Instant::now();
            let reconstructed = inverse_transform(&out.transformed, out.primary_index);
            let inverse_time = start.elapsed();
            assert_eq!(reconstructed, *data, "BWT roundtrip failed for {name}");

            println!(
                "  {:<16} {:7.2} MB/s ({:8} µs)",
                "Inverse:",
                throughput(data.len(), inverse_time),
                inverse_time.as_micros()
            );
        }
        println!();
    }
}

fn throughput(len: usize, elapsed: Duration) -> f64 {
    len as f64 / elapsed.as_secs_f64().max(1e-9) / 1024.0 / 1024.0
}

fn generate_text(size: usize) -> Vec<u8> {
    let words: &[&[u8]] = &[
        b"block", b"sorting", b"moves", b"similar", b"contexts", b"together", b"so", b"the",
        b"front", b"list", b"sees", b"short", b"ranks", b"and", b"long", b"zero", b"runs",
    ];

    let mut data = Vec::with_capacity(size);
    let mut seed = 42u32;

    while data.len() < size {
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        data.extend_from_slice(words[(seed as usize) % words.len()]);
        data.push(b' ');
    }
    data.truncate(size);
    data
}

fn generate_random(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut seed = 12345u32;
    for _ in 0..size {
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        data.push((seed >> 16) as u8);
    }
    data
}

fn generate_repeated(size: usize) -> Vec<u8> {
    let pattern = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    pattern.iter().cycle().take(size).copied().collect()
}

//! Criterion benchmarks for the full compression pipeline.

use bwtpack::{BwtAlgorithm, EncodeOptions, compress, compress_with, decompress, mtf, rle};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

type PatternGenerator = fn(usize) -> Vec<u8>;

mod test_data {
    /// All bytes the same (collapses in the first RLE pass)
    pub fn uniform(size: usize) -> Vec<u8> {
        vec![0xAA; size]
    }

    /// LCG noise, close to incompressible
    pub fn random(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }

    /// Short period, long shared rotation prefixes
    pub fn repetitive(size: usize) -> Vec<u8> {
        b"TOBEORNOTTOBEORTOBEORNOT"
            .iter()
            .cycle()
            .take(size)
            .copied()
            .collect()
    }

    pub fn text_like(size: usize) -> Vec<u8> {
        let text = b"The quick brown fox jumps over the lazy dog. \
                     Pack my box with five dozen liquor jugs. \
                     How vexingly quick daft zebras jump! ";
        text.iter().cycle().take(size).copied().collect()
    }
}

mod data_sizes {
    pub const TINY: usize = 1024;
    pub const SMALL: usize = 10 * 1024;
    pub const MEDIUM: usize = 64 * 1024;
}

const PATTERNS: [(&str, PatternGenerator); 4] = [
    ("uniform", test_data::uniform as PatternGenerator),
    ("random", test_data::random as PatternGenerator),
    ("repetitive", test_data::repetitive as PatternGenerator),
    ("text", test_data::text_like as PatternGenerator),
];

fn bench_compression_data_types(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_data_types");
    let size = data_sizes::MEDIUM;

    for (pattern_name, generator) in PATTERNS {
        let data = generator(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(pattern_name),
            &data,
            |b, data| {
                b.iter(|| {
                    let compressed = compress(black_box(data)).unwrap();
                    black_box(compressed);
                });
            },
        );
    }

    group.finish();
}

fn bench_decompression_data_types(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompression_data_types");
    let size = data_sizes::MEDIUM;

    for (pattern_name, generator) in PATTERNS {
        let compressed = compress(&generator(size)).unwrap();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(pattern_name),
            &compressed,
            |b, compressed| {
                b.iter(|| {
                    let decompressed = decompress(black_box(compressed)).unwrap();
                    black_box(decompressed);
                });
            },
        );
    }

    group.finish();
}

fn bench_bwt_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("bwt_algorithms");

    // Text only: the direct sorter is quadratic on periodic input.
    for (size_name, size) in [("1KB", data_sizes::TINY), ("10KB", data_sizes::SMALL)] {
        let data = test_data::text_like(size);

        for algorithm in [BwtAlgorithm::PrefixDoubling, BwtAlgorithm::RotationSort] {
            let options = EncodeOptions::new().with_bwt_algorithm(algorithm);

            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("{algorithm:?}"), size_name),
                &data,
                |b, data| {
                    b.iter(|| {
                        let compressed = compress_with(black_box(data), &options).unwrap();
                        black_box(compressed);
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_mtf_rle_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("mtf_rle_stages");
    let data = test_data::random(data_sizes::MEDIUM);
    let ranks = mtf::encode(&data);

    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("mtf_encode", |b| {
        b.iter(|| black_box(mtf::encode(black_box(&data))));
    });
    group.bench_function("mtf_decode", |b| {
        b.iter(|| black_box(mtf::decode(black_box(&ranks))));
    });
    group.bench_function("rle_encode", |b| {
        b.iter(|| black_box(rle::encode(black_box(&ranks))));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_compression_data_types,
    bench_decompression_data_types,
    bench_bwt_algorithms,
    bench_mtf_rle_stages,
);
criterion_main!(benches);

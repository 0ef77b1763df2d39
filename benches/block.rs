//! Criterion benchmarks for streaming compression and decompression.
//!
//! Run with:
//!   cargo bench --bench block

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use lzu8::{lorem, Compressor, Decompressor, MatchStoreKind};

fn bench_compress_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream_compress_decompress");

    for &chunk_size in &[65_536usize, 262_144] {
        let text = lorem::text(chunk_size, 0xC0DE);
        let input = &text.as_bytes()[..chunk_size];

        for kind in [MatchStoreKind::Simple, MatchStoreKind::Packed] {
            group.throughput(Throughput::Bytes(chunk_size as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("compress_{kind:?}"), chunk_size),
                &input,
                |b, input| {
                    b.iter(|| Compressor::with_match_store(kind).compress_block(input))
                },
            );
        }

        let compressed = Compressor::new().compress_block(input);
        group.throughput(Throughput::Bytes(chunk_size as u64));
        group.bench_with_input(
            BenchmarkId::new("decompress", chunk_size),
            &compressed,
            |b, compressed| {
                b.iter(|| Decompressor::new().decompress_block(compressed).unwrap())
            },
        );
    }

    group.finish();
}

fn bench_streaming_small_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream_small_blocks");
    let text = lorem::text(262_144, 0xFEED);
    let input = text.as_bytes();

    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("compress_1k_blocks", |b| {
        b.iter(|| {
            let mut compressor = Compressor::new();
            let mut total = 0usize;
            for chunk in input.chunks(1024) {
                total += compressor.compress_block(chunk).len();
            }
            total
        })
    });

    let compressed = Compressor::new().compress_block(input);
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("decompress_1k_blocks", |b| {
        b.iter(|| {
            let mut decompressor = Decompressor::new();
            let mut total = 0usize;
            for chunk in compressed.chunks(1024) {
                total += decompressor.decompress_block(chunk).unwrap().len();
            }
            total
        })
    });

    group.finish();
}

criterion_group!(benches, bench_compress_decompress, bench_streaming_small_blocks);
criterion_main!(benches);

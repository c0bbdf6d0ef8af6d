//! One-shot and stream pump throughput.

use std::hint::black_box;
use std::io::Cursor;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use zstream_core::{
    compress, decompress, richmem_compress,
    params::LevelOrOption,
    stream::{compress_stream, decompress_stream, CompressParams, DecompressParams, PumpConfig},
};

fn text_like(size: usize) -> Vec<u8> {
    let text = b"The quick brown fox jumps over the lazy dog. \
                 Pack my box with five dozen liquor jugs. \
                 How vexingly quick daft zebras jump! ";
    text.iter().copied().cycle().take(size).collect()
}

fn bench_oneshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("oneshot");
    for size in [64 * 1024, 1024 * 1024] {
        let data = text_like(size);
        let level = LevelOrOption::Level(3);
        let frame = compress(&data, Some(&level), None).unwrap();
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("compress", size), &data, |b, data| {
            b.iter(|| compress(black_box(data), Some(&level), None).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("richmem_compress", size), &data, |b, data| {
            b.iter(|| richmem_compress(black_box(data), Some(&level), None).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("decompress", size), &frame, |b, frame| {
            b.iter(|| decompress(black_box(frame), None, None).unwrap())
        });
    }
    group.finish();
}

fn bench_pump(c: &mut Criterion) {
    let mut group = c.benchmark_group("pump");
    let size = 4 * 1024 * 1024;
    let data = text_like(size);
    let frame = compress(&data, None, None).unwrap();
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_function("compress_stream", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(size / 4);
            compress_stream(
                &mut Cursor::new(&data),
                Some(&mut out),
                &CompressParams::default(),
                &PumpConfig::compress(),
                None,
            )
            .unwrap();
            out
        })
    });
    group.bench_function("decompress_stream", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(size);
            decompress_stream(
                &mut Cursor::new(&frame),
                Some(&mut out),
                &DecompressParams::default(),
                &PumpConfig::decompress(),
                None,
            )
            .unwrap();
            out
        })
    });
    group.finish();
}

criterion_group!(benches, bench_oneshot, bench_pump);
criterion_main!(benches);

use std::hint::black_box;
use std::io::Read;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use dechunk_reader::ChunkedReader;
use dechunk_tests::frame_with_sizes;
use dechunk_wire::{ChunkIter, MAX_CHUNK_SIZE};

const PAYLOAD_LEN: usize = 4 * 1024 * 1024;

fn payload() -> Vec<u8> {
    (0..PAYLOAD_LEN).map(|i| (i % 251) as u8).collect()
}

fn bench_chunk_sizes(c: &mut Criterion) {
    let data = payload();
    let mut group = c.benchmark_group("read_to_end");
    group.throughput(Throughput::Bytes(PAYLOAD_LEN as u64));

    for chunk_size in [64, 1024, 16 * 1024, MAX_CHUNK_SIZE] {
        let wire = frame_with_sizes(&data, &[chunk_size]);
        group.bench_with_input(BenchmarkId::from_parameter(chunk_size), &wire, |b, wire| {
            b.iter(|| {
                let mut reader = ChunkedReader::new(&wire[..]);
                let mut out = Vec::with_capacity(PAYLOAD_LEN);
                reader.read_to_end(&mut out).unwrap();
                black_box(out)
            });
        });
    }

    group.finish();
}

fn bench_read_sizes(c: &mut Criterion) {
    let wire = frame_with_sizes(&payload(), &[MAX_CHUNK_SIZE]);
    let mut group = c.benchmark_group("read_into");
    group.throughput(Throughput::Bytes(PAYLOAD_LEN as u64));

    for read_size in [1, 512, 8 * 1024, 256 * 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(read_size), &read_size, |b, &size| {
            let mut buf = vec![0u8; size];
            b.iter(|| {
                let mut reader = ChunkedReader::new(&wire[..]);
                let mut total = 0;
                while let n @ 1.. = reader.read_into(&mut buf, 0, size).unwrap() {
                    total += n;
                }
                black_box(total)
            });
        });
    }

    group.finish();
}

fn bench_skip(c: &mut Criterion) {
    let wire = frame_with_sizes(&payload(), &[4096]);

    c.bench_function("skip_whole_stream", |b| {
        b.iter(|| {
            let mut reader = ChunkedReader::new(&wire[..]);
            black_box(reader.skip(u64::MAX).unwrap())
        });
    });
}

fn bench_chunk_iter(c: &mut Criterion) {
    let wire = frame_with_sizes(&payload(), &[4096]);

    c.bench_function("chunk_iter_walk", |b| {
        b.iter(|| {
            let total: usize = ChunkIter::new(&wire).map(|chunk| chunk.unwrap().len()).sum();
            black_box(total)
        });
    });
}

criterion_group!(
    benches,
    bench_chunk_sizes,
    bench_read_sizes,
    bench_skip,
    bench_chunk_iter
);
criterion_main!(benches);

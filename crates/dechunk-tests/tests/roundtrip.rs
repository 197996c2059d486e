//! Round-trip integration tests: frame a payload by hand, decode it with
//! [`ChunkedReader`], and check the bytes come back unchanged.
//!
//! The payload must survive every combination of chunk layout and read
//! pattern: one byte at a time, everything at once, fixed-size reads that
//! straddle chunk boundaries, randomised read sizes, and sources that
//! deliver only a few bytes per call.

use std::io::{BufRead, Read};

use dechunk_reader::ChunkedReader;
use dechunk_tests::{TrickleReader, frame, frame_with_sizes};
use dechunk_wire::MAX_CHUNK_SIZE;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn payload(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.r#gen()).collect()
}

/// Drain `reader` using `read_into` with a fixed request size.
fn read_in_steps<R: Read>(reader: &mut ChunkedReader<R>, step: usize) -> Vec<u8> {
    let mut out = Vec::new();
    let mut buf = vec![0u8; step];
    loop {
        let n = reader.read_into(&mut buf, 0, step).unwrap();
        if n == 0 {
            break;
        }
        out.extend_from_slice(&buf[..n]);
    }
    out
}

/// Chunk layouts exercised by every read pattern below.
const LAYOUTS: &[&[usize]] = &[
    &[1],
    &[7],
    &[1, 2, 3, 5, 8, 13],
    &[4096],
    &[MAX_CHUNK_SIZE],
    &[MAX_CHUNK_SIZE, 1],
];

// ── Read patterns ────────────────────────────────────────────────────────────

#[test]
fn byte_at_a_time() {
    let data = payload(10_000, 1);
    for sizes in LAYOUTS {
        let wire = frame_with_sizes(&data, sizes);
        let mut reader = ChunkedReader::new(&wire[..]);
        let mut out = Vec::new();
        while let Some(byte) = reader.read_byte().unwrap() {
            out.push(byte);
        }
        assert_eq!(out, data, "layout {sizes:?}");
    }
}

#[test]
fn all_at_once() {
    let data = payload(200_000, 2);
    for sizes in LAYOUTS {
        let wire = frame_with_sizes(&data, sizes);
        let mut reader = ChunkedReader::new(&wire[..]);

        let mut out = vec![0u8; data.len() + 10];
        let n = reader.read_into(&mut out, 0, data.len() + 10).unwrap();
        assert_eq!(n, data.len(), "layout {sizes:?}");
        assert_eq!(&out[..n], &data[..], "layout {sizes:?}");
        assert!(reader.is_finished());
    }
}

#[test]
fn fixed_steps_straddle_boundaries() {
    let data = payload(50_000, 3);
    for sizes in LAYOUTS {
        for step in [3, 64, 1000, 65_536] {
            let wire = frame_with_sizes(&data, sizes);
            let mut reader = ChunkedReader::new(&wire[..]);
            assert_eq!(
                read_in_steps(&mut reader, step),
                data,
                "layout {sizes:?}, step {step}"
            );
        }
    }
}

#[test]
fn random_read_sizes() {
    let data = payload(120_000, 4);
    let mut rng = StdRng::seed_from_u64(5);

    for sizes in LAYOUTS {
        let wire = frame_with_sizes(&data, sizes);
        let mut reader = ChunkedReader::new(&wire[..]);
        let mut out = Vec::new();
        let mut buf = vec![0u8; 70_000];

        loop {
            let len = rng.gen_range(1..=buf.len());
            let offset = rng.gen_range(0..=buf.len() - len);
            let n = reader.read_into(&mut buf, offset, len).unwrap();
            if n == 0 {
                break;
            }
            out.extend_from_slice(&buf[offset..offset + n]);
        }

        assert_eq!(out, data, "layout {sizes:?}");
    }
}

#[test]
fn random_chunk_layout() {
    let data = payload(300_000, 6);
    let mut rng = StdRng::seed_from_u64(7);
    let sizes: Vec<usize> = (0..64).map(|_| rng.gen_range(1..=MAX_CHUNK_SIZE)).collect();

    let wire = frame_with_sizes(&data, &sizes);
    let mut reader = ChunkedReader::new(&wire[..]);
    let mut out = Vec::new();
    reader.read_to_end(&mut out).unwrap();
    assert_eq!(out, data);
}

#[test]
fn mixed_read_byte_skip_and_bulk() {
    let data = payload(5_000, 8);
    let wire = frame_with_sizes(&data, &[100, 37]);
    let mut reader = ChunkedReader::new(&wire[..]);

    assert_eq!(reader.read_byte().unwrap(), Some(data[0]));
    assert_eq!(reader.skip(150).unwrap(), 150);

    let mut buf = [0u8; 300];
    assert_eq!(reader.read_into(&mut buf, 0, 300).unwrap(), 300);
    assert_eq!(&buf[..], &data[151..451]);

    let mut rest = Vec::new();
    reader.read_to_end(&mut rest).unwrap();
    assert_eq!(rest, &data[451..]);
}

#[test]
fn bufread_lines_across_chunks() {
    let text = b"alpha\nbeta\ngamma\ndelta";
    let wire = frame_with_sizes(text, &[3, 4]);
    let reader = ChunkedReader::new(&wire[..]);

    let lines: Vec<String> = reader.lines().collect::<Result<_, _>>().unwrap();
    assert_eq!(lines, ["alpha", "beta", "gamma", "delta"]);
}

// ── Short-read sources ───────────────────────────────────────────────────────

#[test]
fn trickling_source() {
    let data = payload(70_000, 9);
    for step in [1, 2, 3, 1024] {
        let source = TrickleReader::new(frame_with_sizes(&data, &[MAX_CHUNK_SIZE, 17]), step);
        let mut reader = ChunkedReader::new(source);
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, data, "source step {step}");
    }
}

#[test]
fn chunk_boundaries_are_invisible() {
    let wire = frame(&[b"The quick ", b"b", b"rown fox ", b"jumps"]);
    let mut reader = ChunkedReader::new(&wire[..]);

    let mut buf = [0u8; 25];
    assert_eq!(reader.read_into(&mut buf, 0, 25).unwrap(), 25);
    assert_eq!(&buf, b"The quick brown fox jumps");
    assert_eq!(reader.chunks_read(), 4);
}

// ── available() ──────────────────────────────────────────────────────────────

#[test]
fn available_after_refill_and_partial_consume() {
    for k in [1, 10, 4096, MAX_CHUNK_SIZE] {
        let data = payload(k, 10);
        let wire = frame(&[&data, b"next"]);
        let mut reader = ChunkedReader::new(&wire[..]);

        assert_eq!(reader.available(), 0);
        let first = reader.read_byte().unwrap();
        assert_eq!(first, Some(data[0]));
        assert_eq!(reader.available(), k - 1, "chunk of {k}");

        let j = (k - 1) / 2;
        let mut buf = vec![0u8; j];
        assert_eq!(reader.read_into(&mut buf, 0, j).unwrap(), j);
        assert_eq!(reader.available(), k - 1 - j, "chunk of {k}, consumed {j}");
    }
}

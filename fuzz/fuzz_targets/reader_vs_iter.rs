#![no_main]

use std::io::Read;

use libfuzzer_sys::fuzz_target;

use dechunk_reader::ChunkedReader;
use dechunk_wire::ChunkIter;

// Fuzz target: ChunkedReader must agree with ChunkIter.
//
// The first byte picks the read size; the rest is the framed stream.
// Both decoders must produce the same payload, and must agree on
// whether the stream is truncated.
fuzz_target!(|data: &[u8]| {
    let Some((&step, wire)) = data.split_first() else {
        return;
    };
    let step = usize::from(step).max(1);

    let expected: Result<Vec<u8>, _> = ChunkIter::new(wire)
        .collect::<Result<Vec<&[u8]>, _>>()
        .map(|chunks| chunks.concat());

    let mut reader = ChunkedReader::new(wire);
    let mut actual = Vec::new();
    let mut buf = vec![0u8; step];
    let outcome = loop {
        match reader.read(&mut buf) {
            Ok(0) => break Ok(()),
            Ok(n) => actual.extend_from_slice(&buf[..n]),
            Err(e) => break Err(e),
        }
    };

    match (expected, outcome) {
        (Ok(payload), Ok(())) => assert_eq!(payload, actual),
        (Err(_), Err(e)) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
        (expected, outcome) => panic!("decoders disagree: {expected:?} vs {outcome:?}"),
    }
});

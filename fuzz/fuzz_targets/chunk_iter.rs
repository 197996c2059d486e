#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: ChunkIter over arbitrary bytes.
//
// Catches bugs in:
// - Header decoding at every offset
// - Truncated payload detection
// - consumed() running past the end of the input
fuzz_target!(|data: &[u8]| {
    let mut iter = dechunk_wire::ChunkIter::new(data);
    for chunk in iter.by_ref() {
        if chunk.is_err() {
            break;
        }
    }
    assert!(iter.consumed() <= data.len());
    assert!(iter.next().is_none());
});

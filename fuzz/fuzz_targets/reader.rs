#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use dechunk_reader::ChunkedReader;

// Fuzz target: ChunkedReader driven by an arbitrary call sequence.
//
// Interleaves read_byte, read_into (with arbitrary windows), skip and
// BufRead calls over arbitrary input. Catches:
// - Panics from slicing the internal buffer or the caller's window
// - available() exceeding the chunk size
// - Reads returning data after the stream reported its end
#[derive(Debug, Arbitrary)]
enum Op {
    Byte,
    Into { offset: u8, length: u8 },
    Skip(u16),
    Fill,
}

#[derive(Debug, Arbitrary)]
struct Input {
    ops: Vec<Op>,
    wire: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let mut reader = ChunkedReader::new(&input.wire[..]);
    let mut buf = [0u8; 128];

    for op in &input.ops {
        let was_finished = reader.is_finished();
        let produced = match *op {
            Op::Byte => match reader.read_byte() {
                Ok(byte) => usize::from(byte.is_some()),
                Err(_) => return,
            },
            Op::Into { offset, length } => {
                match reader.read_into(&mut buf, usize::from(offset), usize::from(length)) {
                    Ok(n) => {
                        assert!(n <= usize::from(length));
                        n
                    }
                    Err(_) => continue,
                }
            }
            Op::Skip(n) => match reader.skip(u64::from(n)) {
                Ok(skipped) => {
                    assert!(skipped <= u64::from(n));
                    usize::try_from(skipped).unwrap()
                }
                Err(_) => return,
            },
            Op::Fill => match std::io::BufRead::fill_buf(&mut reader) {
                Ok(chunk) => chunk.len(),
                Err(_) => return,
            },
        };

        assert!(reader.available() <= dechunk_wire::MAX_CHUNK_SIZE);
        if was_finished {
            assert_eq!(produced, 0, "data after end of stream");
        }
    }
});

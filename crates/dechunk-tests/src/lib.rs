//! Fixture builders for the dechunk test suite and benches.
//!
//! The workspace deliberately ships no encoder, so streams are framed
//! here by hand: each chunk is a big-endian `u16` length followed by its
//! payload, and [`frame`] appends the `0x0000` terminator.

use std::io::{self, Read};

use dechunk_wire::{MAX_CHUNK_SIZE, TERMINATOR};

/// Frame `chunks` into a complete stream, terminator included.
///
/// # Panics
///
/// Panics if a chunk is empty or longer than `MAX_CHUNK_SIZE`: neither
/// can be expressed as a data chunk on the wire.
#[must_use]
pub fn frame(chunks: &[&[u8]]) -> Vec<u8> {
    let mut wire = frame_unterminated(chunks);
    wire.extend_from_slice(&TERMINATOR);
    wire
}

/// Like [`frame`] but without the terminator, for streams that end abruptly.
///
/// # Panics
///
/// Same as [`frame`].
#[must_use]
pub fn frame_unterminated(chunks: &[&[u8]]) -> Vec<u8> {
    let mut wire = Vec::new();
    for chunk in chunks {
        assert!(
            !chunk.is_empty() && chunk.len() <= MAX_CHUNK_SIZE,
            "cannot frame a chunk of {} bytes",
            chunk.len()
        );
        let len = u16::try_from(chunk.len()).unwrap_or(u16::MAX);
        wire.extend_from_slice(&len.to_be_bytes());
        wire.extend_from_slice(chunk);
    }
    wire
}

/// Split `payload` into chunks of the given sizes (cycled) and frame them.
///
/// # Panics
///
/// Panics if `sizes` is empty or contains a size outside `1..=MAX_CHUNK_SIZE`.
#[must_use]
pub fn frame_with_sizes(payload: &[u8], sizes: &[usize]) -> Vec<u8> {
    assert!(!sizes.is_empty(), "need at least one chunk size");
    let mut chunks = Vec::new();
    let mut rest = payload;
    for &size in sizes.iter().cycle() {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(size.min(rest.len()));
        chunks.push(head);
        rest = tail;
    }
    frame(&chunks)
}

/// Decode a hex fixture, ignoring whitespace.
///
/// # Panics
///
/// Panics on malformed hex; fixtures are test constants.
#[must_use]
pub fn hex_fixture(text: &str) -> Vec<u8> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&compact).unwrap_or_else(|e| panic!("bad hex fixture {text:?}: {e}"))
}

/// A source that never returns more than `step` bytes per `read` call.
///
/// Exercises the short-read handling in both header and payload reads.
#[derive(Debug)]
pub struct TrickleReader {
    data: Vec<u8>,
    pos: usize,
    step: usize,
}

impl TrickleReader {
    #[must_use]
    pub fn new(data: Vec<u8>, step: usize) -> Self {
        Self {
            data,
            pos: 0,
            step: step.max(1),
        }
    }

    /// Bytes handed out so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl Read for TrickleReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let end = (self.pos + self.step).min(self.data.len());
        let chunk = &self.data[self.pos..end];
        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        self.pos += n;
        Ok(n)
    }
}

/// A source that serves `data` and then fails with `kind` instead of
/// reporting end of input.
#[derive(Debug)]
pub struct FailingReader {
    data: io::Cursor<Vec<u8>>,
    kind: io::ErrorKind,
}

impl FailingReader {
    #[must_use]
    pub fn new(data: Vec<u8>, kind: io::ErrorKind) -> Self {
        Self {
            data: io::Cursor::new(data),
            kind,
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.read(buf)? {
            0 if !buf.is_empty() => Err(io::Error::new(self.kind, "source failed")),
            n => Ok(n),
        }
    }
}

use std::iter::FusedIterator;

use crate::error::WireError;
use crate::header::{ChunkHeader, LENGTH_PREFIX_SIZE};

/// Zero-copy iterator over the chunk payloads of an in-memory stream.
///
/// Yields each non-empty payload as a borrowed slice and stops at the
/// terminator or when the input runs out before a complete header. A
/// chunk whose payload is cut short yields one
/// [`WireError::TruncatedChunk`] and then the iterator is exhausted.
///
/// After iteration, [`consumed`](Self::consumed) tells how many input
/// bytes belonged to the stream, so anything past it is trailing data.
///
/// ```
/// use dechunk_wire::ChunkIter;
///
/// let wire = [0x00, 0x02, b'h', b'i', 0x00, 0x01, b'!', 0x00, 0x00];
/// let chunks: Vec<&[u8]> = ChunkIter::new(&wire).collect::<Result<_, _>>().unwrap();
/// assert_eq!(chunks, [&b"hi"[..], &b"!"[..]]);
/// ```
#[derive(Clone, Debug)]
pub struct ChunkIter<'a> {
    buf: &'a [u8],
    cursor: usize,
    done: bool,
}

impl<'a> ChunkIter<'a> {
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            cursor: 0,
            done: false,
        }
    }

    /// Bytes of input read so far, headers included.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    /// Whether the end of the stream (or an error) has been reached.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.done
    }
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = Result<&'a [u8], WireError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let rest = &self.buf[self.cursor..];
        let Some(raw) = rest.first_chunk::<LENGTH_PREFIX_SIZE>() else {
            // Half a header (or nothing) left: same as a terminator.
            self.cursor = self.buf.len();
            self.done = true;
            return None;
        };

        let header = ChunkHeader::decode(*raw);
        self.cursor += LENGTH_PREFIX_SIZE;
        if header.ends_stream() {
            self.done = true;
            return None;
        }

        let expected = header.payload_len();
        let body = &self.buf[self.cursor..];
        if body.len() < expected {
            self.cursor = self.buf.len();
            self.done = true;
            return Some(Err(WireError::TruncatedChunk {
                expected,
                actual: body.len(),
            }));
        }

        self.cursor += expected;
        Some(Ok(&body[..expected]))
    }
}

impl FusedIterator for ChunkIter<'_> {}

use std::fmt;
use std::io::{self, BufRead, Read};

use dechunk_wire::{ChunkHeader, MAX_CHUNK_SIZE, WireError, read_payload};
use tracing::{debug, trace};

use crate::error::DecodeError;

/// Reader state.
///
/// ```text
///   Active ──(0x0000 header, or source ends inside a header)──→ Finished
/// ```
///
/// `Finished` is terminal. Truncated chunks do not move the state: they
/// are errors, not an end of stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StreamState {
    Active,
    Finished,
}

/// Presents the payloads of a chunked stream as one continuous byte stream.
///
/// The source is read lazily, one chunk at a time, into a fixed
/// `MAX_CHUNK_SIZE` buffer. Reads are served from that buffer and a new
/// chunk is pulled only when it runs dry, so a single read can span any
/// number of chunk boundaries without the caller seeing them.
///
/// The reader is forward-only. It implements [`Read`] and [`BufRead`] but
/// not `Seek`, and [`mark`](Self::mark) / [`reset`](Self::reset) always
/// fail.
///
/// # Example
///
/// ```
/// use std::io::Read;
/// use dechunk_reader::ChunkedReader;
///
/// let wire: &[u8] = &[0x00, 0x03, b'f', b'o', b'o', 0x00, 0x03, b'b', b'a', b'r', 0x00, 0x00];
/// let mut reader = ChunkedReader::new(wire);
///
/// let mut out = String::new();
/// reader.read_to_string(&mut out).unwrap();
/// assert_eq!(out, "foobar");
/// ```
pub struct ChunkedReader<R> {
    inner: R,
    /// Payload of the current chunk. Bytes in `pos..limit` are unread.
    buf: Box<[u8]>,
    pos: usize,
    limit: usize,
    state: StreamState,
    chunks_read: u64,
}

impl<R: Read> ChunkedReader<R> {
    /// Wrap `inner`. Nothing is read until the first read call.
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: vec![0u8; MAX_CHUNK_SIZE].into_boxed_slice(),
            pos: 0,
            limit: 0,
            state: StreamState::Active,
            chunks_read: 0,
        }
    }

    /// Read a single byte, or `None` at end of stream.
    ///
    /// # Errors
    ///
    /// See [`read_into`](Self::read_into).
    pub fn read_byte(&mut self) -> Result<Option<u8>, DecodeError> {
        let mut byte = [0u8; 1];
        let n = self.read_into(&mut byte, 0, 1)?;
        Ok((n == 1).then_some(byte[0]))
    }

    /// Copy up to `length` payload bytes into `buf[offset..offset + length]`.
    ///
    /// Keeps pulling chunks until the window is full or the stream ends,
    /// so the count is short only at end of stream. Returns 0 once the
    /// stream is finished.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::InvalidWindow`] if the window does not fit in `buf`.
    /// - [`WireError::TruncatedChunk`] (wrapped) if a chunk's payload is
    ///   cut short by the source.
    /// - Any I/O error from the source.
    pub fn read_into(
        &mut self,
        buf: &mut [u8],
        offset: usize,
        length: usize,
    ) -> Result<usize, DecodeError> {
        let capacity = buf.len();
        let window = offset
            .checked_add(length)
            .and_then(|end| buf.get_mut(offset..end))
            .ok_or(DecodeError::InvalidWindow {
                offset,
                length,
                capacity,
            })?;

        let mut copied = 0;
        while copied < window.len() {
            if self.pos == self.limit && self.refill()? == 0 {
                break;
            }
            let n = (window.len() - copied).min(self.limit - self.pos);
            window[copied..copied + n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
            self.pos += n;
            copied += n;
        }

        Ok(copied)
    }

    /// Skip up to `n` payload bytes, returning how many were skipped.
    ///
    /// Fewer than `n` means the stream ended, and the reader is then at
    /// end of stream. Skipping stays inside the buffered chunk and only
    /// pulls the next chunk at a boundary.
    ///
    /// # Errors
    ///
    /// Same as [`read_into`](Self::read_into), minus the window check.
    pub fn skip(&mut self, n: u64) -> Result<u64, DecodeError> {
        let mut skipped = 0;
        while skipped < n {
            if self.pos == self.limit && self.refill()? == 0 {
                break;
            }
            let buffered = self.available();
            let step = usize::try_from(n - skipped).map_or(buffered, |rest| rest.min(buffered));
            self.pos += step;
            skipped += step as u64;
        }
        Ok(skipped)
    }

    /// Bytes left in the current chunk.
    ///
    /// This is a lower bound on what can be read without touching the
    /// source, not the remaining length of the stream.
    #[must_use]
    pub fn available(&self) -> usize {
        self.limit - self.pos
    }

    /// Whether the end of the stream has been seen.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == StreamState::Finished
    }

    /// Non-empty chunks decoded so far.
    #[must_use]
    pub fn chunks_read(&self) -> u64 {
        self.chunks_read
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Give back the source without draining it.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Drain the remaining chunks, then give back the source.
    ///
    /// The source is left positioned just past the terminator, so
    /// anything that follows the stream stays unread.
    ///
    /// # Errors
    ///
    /// A truncated chunk met while draining is returned rather than
    /// ignored, and the source is dropped.
    pub fn close(mut self) -> Result<R, DecodeError> {
        while self.state == StreamState::Active {
            self.refill()?;
        }
        Ok(self.inner)
    }

    /// Always fails: the stream cannot be replayed.
    ///
    /// # Errors
    ///
    /// Always [`DecodeError::Unsupported`].
    #[allow(clippy::unused_self)]
    pub fn mark(&mut self, _read_limit: usize) -> Result<(), DecodeError> {
        Err(DecodeError::Unsupported { operation: "mark" })
    }

    /// Always fails: the stream cannot be replayed.
    ///
    /// # Errors
    ///
    /// Always [`DecodeError::Unsupported`].
    #[allow(clippy::unused_self)]
    pub fn reset(&mut self) -> Result<(), DecodeError> {
        Err(DecodeError::Unsupported { operation: "reset" })
    }

    #[allow(clippy::unused_self)]
    #[must_use]
    pub fn mark_supported(&self) -> bool {
        false
    }

    /// Load the next chunk into the buffer.
    ///
    /// Returns the chunk size, or 0 once the stream is finished.
    fn refill(&mut self) -> Result<usize, DecodeError> {
        if self.state == StreamState::Finished {
            return Ok(0);
        }

        let header = ChunkHeader::read_from(&mut self.inner)?;
        if header.ends_stream() {
            debug!(?header, chunks = self.chunks_read, "chunked stream finished");
            self.state = StreamState::Finished;
            return Ok(0);
        }

        // Whatever was buffered is gone once the payload read starts.
        self.pos = 0;
        self.limit = 0;

        let expected = header.payload_len();
        let actual = read_payload(&mut self.inner, &mut self.buf[..expected])?;
        if actual < expected {
            debug!(expected, actual, "chunk truncated by end of source");
            return Err(WireError::TruncatedChunk { expected, actual }.into());
        }

        trace!(len = expected, "decoded chunk");
        self.chunks_read += 1;
        self.limit = expected;
        Ok(expected)
    }
}

/// Returns at most one chunk per call. A refill only happens before any
/// byte has been copied, so an error never discards delivered payload.
impl<R: Read> Read for ChunkedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let n = {
            let chunk = self.fill_buf()?;
            let n = chunk.len().min(buf.len());
            buf[..n].copy_from_slice(&chunk[..n]);
            n
        };
        self.consume(n);
        Ok(n)
    }
}

impl<R: Read> BufRead for ChunkedReader<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.pos == self.limit {
            self.refill()?;
        }
        Ok(&self.buf[self.pos..self.limit])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.limit);
    }
}

impl<R> fmt::Debug for ChunkedReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkedReader")
            .field("pos", &self.pos)
            .field("limit", &self.limit)
            .field("state", &self.state)
            .field("chunks_read", &self.chunks_read)
            .finish_non_exhaustive()
    }
}

use std::io::{ErrorKind, Read};
use std::num::NonZeroU16;

use crate::error::WireError;

/// Size of the length prefix in front of every chunk.
pub const LENGTH_PREFIX_SIZE: usize = 2;

/// Largest payload a single chunk can carry (the 16-bit length field's maximum).
pub const MAX_CHUNK_SIZE: usize = u16::MAX as usize;

/// The zero-length header that marks the logical end of a stream.
pub const TERMINATOR: [u8; LENGTH_PREFIX_SIZE] = [0x00, 0x00];

/// A decoded chunk length header.
///
/// ```text
/// ┌───────────────────────────┬──────────────────────────────┐
/// │ length (u16, big-endian)  │ payload [length bytes]       │
/// └───────────────────────────┴──────────────────────────────┘
/// ```
///
/// A length of zero is the terminator and carries no payload. A source
/// that ends before both header bytes are available is reported as
/// [`ChunkHeader::EndOfSource`], which callers treat exactly like the
/// terminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChunkHeader {
    /// A chunk with `len` payload bytes following the header.
    Data(NonZeroU16),

    /// Explicit `0x0000` terminator.
    Terminator,

    /// The source ended after `bytes_read` (0 or 1) header bytes.
    EndOfSource { bytes_read: usize },
}

impl ChunkHeader {
    /// Decode a complete two-byte header, most significant byte first.
    #[must_use]
    pub fn decode(raw: [u8; LENGTH_PREFIX_SIZE]) -> Self {
        match NonZeroU16::new(u16::from_be_bytes(raw)) {
            Some(len) => Self::Data(len),
            None => Self::Terminator,
        }
    }

    /// Read one header from `reader`.
    ///
    /// Never reads past the two header bytes. `Interrupted` errors are
    /// retried; any other I/O error is returned as [`WireError::Io`].
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Io`] if the source fails.
    pub fn read_from(reader: &mut impl Read) -> Result<Self, WireError> {
        let mut raw = [0u8; LENGTH_PREFIX_SIZE];
        let mut filled = 0;

        while filled < LENGTH_PREFIX_SIZE {
            match reader.read(&mut raw[filled..]) {
                Ok(0) => return Ok(Self::EndOfSource { bytes_read: filled }),
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(Self::decode(raw))
    }

    /// Number of payload bytes that follow this header.
    #[must_use]
    pub fn payload_len(self) -> usize {
        match self {
            Self::Data(len) => usize::from(len.get()),
            Self::Terminator | Self::EndOfSource { .. } => 0,
        }
    }

    /// True for the terminator and for a source that ran out mid-header.
    #[must_use]
    pub fn ends_stream(self) -> bool {
        !matches!(self, Self::Data(_))
    }
}

/// Fill `buf` from `reader`, tolerating short reads.
///
/// A single `read` call is not assumed to return everything asked for:
/// this keeps reading until `buf` is full or the source returns zero
/// bytes. The caller compares the returned count against `buf.len()` to
/// detect truncation.
///
/// # Errors
///
/// Returns [`WireError::Io`] if the source fails with anything other
/// than `Interrupted`.
pub fn read_payload(reader: &mut impl Read, buf: &mut [u8]) -> Result<usize, WireError> {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(total)
}

use std::io;

use dechunk_wire::WireError;

/// Errors surfaced by [`ChunkedReader`](crate::ChunkedReader).
///
/// ```text
///   DecodeError
///   ├── Wire(WireError)   ← truncated chunk, or source I/O during a refill
///   ├── InvalidWindow     ← offset/length outside the caller's buffer
///   ├── Unsupported       ← mark/reset on a forward-only stream
///   └── Io(io::Error)     ← any other failure from the source
/// ```
///
/// Clean end of stream is never an error: it shows up as `Ok(0)` or
/// `Ok(None)` from the read methods.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A framing error from `dechunk-wire`.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// The requested `offset..offset + length` window does not fit in a
    /// buffer of `capacity` bytes.
    #[error("read window {offset}+{length} exceeds buffer of {capacity} bytes")]
    InvalidWindow {
        offset: usize,
        length: usize,
        capacity: usize,
    },

    /// The stream is forward-only; positions cannot be marked or replayed.
    #[error("{operation} is not supported on a chunked stream")]
    Unsupported { operation: &'static str },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl DecodeError {
    /// True if this is a chunk whose payload was cut short.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Wire(WireError::TruncatedChunk { .. }))
    }
}

/// Lets `?` work inside `std::io::Read` impls.
///
/// Source I/O errors come back out unchanged. Everything else is wrapped
/// so callers can `downcast_ref::<DecodeError>()` the inner error.
impl From<DecodeError> for io::Error {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::Io(e) | DecodeError::Wire(WireError::Io(e)) => e,
            DecodeError::Wire(WireError::TruncatedChunk { .. }) => {
                io::Error::new(io::ErrorKind::UnexpectedEof, err)
            }
            DecodeError::InvalidWindow { .. } => io::Error::new(io::ErrorKind::InvalidInput, err),
            DecodeError::Unsupported { .. } => io::Error::new(io::ErrorKind::Unsupported, err),
        }
    }
}

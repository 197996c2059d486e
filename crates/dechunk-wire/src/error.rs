/// Errors raised while reading the chunked wire format.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// A chunk header declared `expected` payload bytes but the source
    /// ran dry after `actual` of them.
    ///
    /// Unlike a source that ends before (or inside) a length header, a
    /// chunk that has begun and is not fully delivered is a protocol
    /// violation, not a clean end of stream.
    #[error("truncated chunk: expected {expected} bytes, but got {actual}")]
    TruncatedChunk { expected: usize, actual: usize },

    /// I/O error from the underlying source.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

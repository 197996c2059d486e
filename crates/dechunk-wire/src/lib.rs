#![warn(clippy::pedantic)]

pub mod chunk_iter;
pub mod error;
pub mod header;

pub use chunk_iter::ChunkIter;
pub use error::WireError;
pub use header::{ChunkHeader, LENGTH_PREFIX_SIZE, MAX_CHUNK_SIZE, TERMINATOR, read_payload};

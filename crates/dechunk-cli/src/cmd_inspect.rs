/// Implementation of `dechunk inspect`.
///
/// Walks the chunks of a framed file without copying them and prints a
/// short report:
///
/// ```text
/// File:      capture.bin  (131089 bytes)
/// Chunks:    3  (min 17, max 65535 bytes)
/// Payload:   131087 bytes
/// Trailing:  0 bytes after end of stream
/// BLAKE3:    5f0c...e1
/// ```
///
/// With `--json` the same fields are printed as one JSON object.
use std::fs;

use anyhow::{Context, Result};
use dechunk_wire::{ChunkIter, WireError};
use serde::Serialize;

use crate::InspectArgs;

/// Chunk statistics for one framed stream.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    /// Size of the whole input.
    pub file_bytes: usize,
    /// Non-empty chunks before the end of the stream.
    pub chunks: usize,
    pub min_chunk: Option<usize>,
    pub max_chunk: Option<usize>,
    /// Sum of all chunk payloads.
    pub payload_bytes: u64,
    /// Input bytes left after the end of the stream.
    pub trailing_bytes: usize,
    /// BLAKE3 digest of the concatenated payload, hex encoded.
    pub blake3: String,
}

impl InspectReport {
    /// Build the report for an in-memory framed stream.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::TruncatedChunk`] if a chunk is cut short.
    pub fn from_wire(wire: &[u8]) -> Result<Self, WireError> {
        let mut iter = ChunkIter::new(wire);
        let mut hasher = blake3::Hasher::new();
        let mut chunks = 0;
        let mut min_chunk: Option<usize> = None;
        let mut max_chunk: Option<usize> = None;
        let mut payload_bytes = 0u64;

        for chunk in iter.by_ref() {
            let chunk = chunk?;
            chunks += 1;
            min_chunk = Some(min_chunk.map_or(chunk.len(), |m| m.min(chunk.len())));
            max_chunk = Some(max_chunk.map_or(chunk.len(), |m| m.max(chunk.len())));
            payload_bytes += chunk.len() as u64;
            hasher.update(chunk);
        }

        Ok(Self {
            file_bytes: wire.len(),
            chunks,
            min_chunk,
            max_chunk,
            payload_bytes,
            trailing_bytes: wire.len() - iter.consumed(),
            blake3: hasher.finalize().to_hex().to_string(),
        })
    }
}

/// Run the `dechunk inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or contains a truncated
/// chunk.
pub fn run(args: &InspectArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    let report = InspectReport::from_wire(&bytes)
        .with_context(|| format!("failed to inspect {}", args.file.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "File:      {}  ({} bytes)",
        args.file.display(),
        report.file_bytes
    );
    match (report.min_chunk, report.max_chunk) {
        (Some(min), Some(max)) => {
            println!("Chunks:    {}  (min {min}, max {max} bytes)", report.chunks);
        }
        _ => println!("Chunks:    0"),
    }
    println!("Payload:   {} bytes", report.payload_bytes);
    println!(
        "Trailing:  {} bytes after end of stream",
        report.trailing_bytes
    );
    println!("BLAKE3:    {}", report.blake3);

    Ok(())
}

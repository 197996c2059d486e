/// Implementation of `dechunk decode`.
///
/// Streams the input through [`ChunkedReader`] and writes the payload to
/// stdout or `-o <file>`. The input is never loaded whole, so this works
/// on pipes and on files larger than memory. After the payload, the
/// reader is closed, which drains the stream to its terminator and
/// reports a truncated final chunk as an error.
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};

use anyhow::{Context, Result};
use dechunk_reader::ChunkedReader;
use tracing::{debug, info};

use crate::DecodeArgs;

/// Run the `dechunk decode` command.
///
/// # Errors
///
/// Returns an error if the input cannot be opened, the output cannot be
/// written, or the stream contains a truncated chunk.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let source: Box<dyn Read> = if args.input.as_os_str() == "-" {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(&args.input)
            .with_context(|| format!("cannot open {}", args.input.display()))?;
        Box::new(file)
    };

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let written = decode_stream(source, sink, args.buffer_size as usize)
        .with_context(|| format!("failed to decode {}", args.input.display()))?;

    info!(bytes = written, "decode complete");
    Ok(())
}

/// Copy the de-chunked payload of `source` into `sink`, `buffer_size`
/// bytes per read. Returns the number of payload bytes written.
fn decode_stream<R: Read, W: Write>(source: R, mut sink: W, buffer_size: usize) -> Result<u64> {
    let mut reader = ChunkedReader::new(BufReader::new(source));
    let mut buf = vec![0u8; buffer_size];
    let mut total = 0u64;

    loop {
        let n = reader
            .read_into(&mut buf, 0, buffer_size)
            .context("failed to read chunked payload")?;
        if n == 0 {
            break;
        }
        sink.write_all(&buf[..n]).context("write failed")?;
        total += n as u64;
    }
    sink.flush().context("flush failed")?;

    let chunks = reader.chunks_read();
    reader.close().context("failed to drain stream")?;
    debug!(chunks, bytes = total, "stream drained");

    Ok(total)
}

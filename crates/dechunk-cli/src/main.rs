/// `dechunk` command-line tool: unwrap and inspect chunked byte streams.
///
/// ```text
/// dechunk <COMMAND> [OPTIONS]
///
/// Commands:
///   decode     Write the de-chunked payload to stdout or a file
///   inspect    Print chunk statistics for a framed file
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Raise log verbosity (repeatable: -v debug, -vv trace)
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// Logs go to stderr and honour `RUST_LOG` when it is set, so stdout
/// carries only the decoded bytes or the report.
///
/// # Exit codes
///
/// | Code | Meaning                                          |
/// |------|--------------------------------------------------|
/// | 0    | Success                                          |
/// | 1    | Error (I/O failure, truncated chunk, bad args)   |
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd_decode;
mod cmd_inspect;

// ── CLI root ──────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "dechunk", version, about = "Chunked byte-stream decoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the de-chunked payload to stdout or a file.
    Decode(DecodeArgs),
    /// Print chunk statistics for a framed file.
    Inspect(InspectArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `dechunk decode`.
///
/// ```text
/// ┌───────────────┬──────────────────────────────────────────────────┐
/// │ Flag          │ Effect                                           │
/// ├───────────────┼──────────────────────────────────────────────────┤
/// │ -o / --output │ write to file instead of stdout                  │
/// │ --buffer-size │ bytes requested per read (default 8192)          │
/// └───────────────┴──────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Framed input file, or `-` for stdin.
    pub input: PathBuf,

    /// Write the payload to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Bytes requested from the reader per call.
    #[arg(long, default_value_t = 8192, value_parser = clap::value_parser!(u32).range(1..))]
    pub buffer_size: u32,
}

/// Arguments for `dechunk inspect`.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Framed input file.
    pub file: PathBuf,

    /// Emit the report as JSON.
    #[arg(long)]
    pub json: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Decode(args) => cmd_decode::run(&args),
        Commands::Inspect(args) => cmd_inspect::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

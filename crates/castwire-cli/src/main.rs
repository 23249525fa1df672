//! castwire-decode
//!
//! Usage: `castwire-decode [--config <path>] [<input file>]`
//! - reads one base64 frame per line (file or stdin)
//! - prints one JSON record per line on stdout
//! - logs rejected frames and a final summary via tracing (RUST_LOG)

use std::fs::File;
use std::io::{self, BufReader};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use castwire_cli::args::Args;
use castwire_cli::config::{self, CliConfig};
use castwire_cli::run::decode_lines;
use castwire_core::error::{CastwireError, Result};

fn run(args: Args) -> Result<()> {
    let cfg = match &args.config {
        Some(path) => config::load_from_file(path)?,
        None => CliConfig::default(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = match &args.input {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                CastwireError::Io(format!("open {} failed: {e}", path.display()))
            })?;
            decode_lines(BufReader::new(file), &mut out, &cfg)?
        }
        None => decode_lines(io::stdin().lock(), &mut out, &cfg)?,
    };

    let s = &summary.stats;
    tracing::info!(
        lines = summary.lines,
        failed = summary.failed,
        records = summary.records_written,
        messages = s.messages,
        chat = s.chat,
        gift = s.gift,
        like = s.like,
        unknown = s.unknown,
        skipped = s.skipped,
        partial = s.partial,
        inflate_failures = s.inflate_failures,
        "castwire-decode finished"
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.code().as_str(), error = %e, "castwire-decode failed");
            ExitCode::FAILURE
        }
    }
}

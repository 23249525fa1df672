//! Command-line surface of `castwire-decode`.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "castwire-decode",
    version,
    about = "Decode base64 live-feed frames into JSON lines"
)]
pub struct Args {
    /// YAML config file (strict schema). Defaults apply when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Input file with one base64 frame per line. Reads stdin when omitted.
    pub input: Option<PathBuf>,
}

//! Strato CLI - Inspect Stratocast capture files
//!
//! # Commands
//!
//! - `strato inspect` - Validate a capture file and print its stats
//! - `strato decode` - Print every tick of a capture in readable form
//!
//! # Usage
//!
//! ```bash
//! # Check a capture before queueing it for the uplink
//! strato inspect keystroke_0001_2026-08-26_14-02-11.scap
//!
//! # Dump the first 40 ticks
//! strato decode keystroke_0001_2026-08-26_14-02-11.scap --limit 40
//! ```

mod decode;
mod inspect;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strato CLI - Inspect Stratocast capture files
#[derive(Parser)]
#[command(name = "strato")]
#[command(about = "Inspect Stratocast capture files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a capture file and print its stats
    Inspect {
        /// Capture file to inspect (.scap)
        file: PathBuf,
    },

    /// Print every tick of a capture in readable form
    Decode {
        /// Capture file to decode (.scap)
        file: PathBuf,

        /// Stop after this many ticks
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { file } => inspect::execute(file),
        Commands::Decode { file, limit } => decode::execute(file, limit),
    }
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// framesync — developer tooling for the cross-frame editor sync protocol.
#[derive(Parser, Debug)]
#[command(name = "framesync", version, about)]
pub struct Args {
    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compress JSON text into the base64 wire form.
    Compress {
        /// Input file; reads stdin when omitted.
        input: Option<PathBuf>,
    },
    /// Decode a wire content string (compressed or legacy JSON) to JSON text.
    Decompress {
        /// Input file; reads stdin when omitted.
        input: Option<PathBuf>,
    },
    /// Replay a newline-delimited transcript of message events against a
    /// stub in-memory editor, printing every outbound envelope to stdout.
    Replay {
        /// Transcript file; reads stdin when omitted.
        input: Option<PathBuf>,
    },
}

pub fn parse() -> Args {
    Args::parse()
}

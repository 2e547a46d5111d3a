//! # CLI Interface
//!
//! Defines the command-line argument structure for `tangle` using `clap`
//! derive. Supports four subcommands: `decode`, `encode`, `inspect`, and
//! `version`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Tangle block codec.
///
/// Converts blocks between their canonical binary form (as hex) and JSON,
/// and prints human-readable summaries of raw blocks.
#[derive(Parser, Debug)]
#[command(
    name = "tangle",
    about = "Decode, encode and inspect Tangle blocks",
    version,
    propagate_version = true
)]
pub struct TangleCli {
    /// Log filter used when `RUST_LOG` is not set, e.g. `debug` or
    /// `tangle_protocol=trace`.
    #[arg(long, global = true, env = "TANGLE_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log output format.
    #[arg(long, global = true, env = "TANGLE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the `tangle` binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a hex-encoded block and print it as JSON.
    Decode(DecodeArgs),
    /// Encode a JSON block and print its canonical bytes as hex.
    Encode(InputArgs),
    /// Decode a hex-encoded block and print a short summary.
    Inspect(InputArgs),
    /// Print version information and exit.
    Version,
}

/// Where the command reads its input from.
///
/// The inline value wins, then `--file`; with neither, stdin is read to
/// the end.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Inline input (hex for decode/inspect, JSON for encode).
    #[arg(conflicts_with = "file")]
    pub input: Option<String>,

    /// Read the input from a file instead.
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,
}

/// Arguments for the `decode` subcommand.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub source: InputArgs,

    /// Print the JSON on a single line.
    #[arg(long)]
    pub compact: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        TangleCli::command().debug_assert();
    }

    #[test]
    fn inline_input_and_file_conflict() {
        let parsed = TangleCli::try_parse_from(["tangle", "decode", "00", "--file", "block.hex"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn parses_global_log_flags_after_subcommand() {
        let cli = TangleCli::try_parse_from([
            "tangle",
            "inspect",
            "--log-format",
            "json",
            "--log-level",
            "debug",
            "0x00",
        ])
        .unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.log_level, "debug");
        match cli.command {
            Commands::Inspect(args) => assert_eq!(args.input.as_deref(), Some("0x00")),
            other => panic!("unexpected command {other:?}"),
        }
    }
}

// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Tangle CLI
//!
//! Entry point for the `tangle` binary. Parses CLI arguments, initializes
//! logging, and runs one codec operation over a single block.
//!
//! The binary supports four subcommands:
//!
//! - `decode`  : hex block to JSON
//! - `encode`  : JSON block to hex
//! - `inspect` : hex block to a one-screen summary
//! - `version` : print build version information

mod cli;
mod inspect;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;

use tangle_protocol::serde_helpers::{from_prefixed_hex, to_prefixed_hex};
use tangle_protocol::{Block, WireCodec};

use cli::{Commands, DecodeArgs, InputArgs, TangleCli};

fn main() -> Result<()> {
    let cli = TangleCli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);

    match cli.command {
        Commands::Decode(args) => decode_block(args),
        Commands::Encode(args) => encode_block(args),
        Commands::Inspect(args) => inspect_block(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Decodes a hex block and prints it as JSON.
fn decode_block(args: DecodeArgs) -> Result<()> {
    let bytes = read_hex(&args.source)?;
    let block = Block::from_bytes(&bytes).context("failed to decode block")?;
    tracing::info!(size = bytes.len(), parents = block.parents.len(), "block decoded");

    let json = if args.compact {
        serde_json::to_string(&block)
    } else {
        serde_json::to_string_pretty(&block)
    }
    .context("failed to render block as JSON")?;
    println!("{json}");
    Ok(())
}

/// Parses a JSON block and prints its canonical encoding as hex.
fn encode_block(args: InputArgs) -> Result<()> {
    let text = read_input(&args)?;
    let block: Block = serde_json::from_str(&text).context("failed to parse block JSON")?;
    let bytes = block.to_bytes().context("failed to encode block")?;
    tracing::info!(size = bytes.len(), "block encoded");
    println!("{}", to_prefixed_hex(&bytes));
    Ok(())
}

/// Decodes a hex block and prints a human-readable summary.
fn inspect_block(args: InputArgs) -> Result<()> {
    let bytes = read_hex(&args)?;
    let block = Block::from_bytes(&bytes).context("failed to decode block")?;
    print!("{}", inspect::summarize(&block, bytes.len()));
    Ok(())
}

/// Reads the raw input text: inline argument, then file, then stdin.
fn read_input(args: &InputArgs) -> Result<String> {
    if let Some(input) = &args.input {
        return Ok(input.clone());
    }
    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file: {}", path.display()));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read stdin")?;
    Ok(buf)
}

/// Reads the input and decodes it as hex, ignoring surrounding whitespace.
fn read_hex(args: &InputArgs) -> Result<Vec<u8>> {
    let text = read_input(args)?;
    from_prefixed_hex(text.trim()).context("input is not valid hex")
}

/// Prints version information to stdout.
fn print_version() {
    println!("tangle   {}", env!("CARGO_PKG_VERSION"));
    println!(
        "protocol {}",
        tangle_protocol::config::DEFAULT_PROTOCOL_VERSION
    );
}

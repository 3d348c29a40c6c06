//! # profdump - Main Entry Point
//!
//! Decodes and dumps two trace files in sequence. Each file is decoded
//! independently; the first file that cannot be opened or decoded fails the
//! run with a non-zero exit code.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::io::{self, Write};
use std::path::Path;

use profdump::cli::Args;
use profdump::decode::decode_file;
use profdump::report;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            EXIT_ERROR
        }
    });
}

fn run() -> Result<()> {
    let args = Args::parse();

    dump_file(&args.first, args.quiet)?;
    println!();
    dump_file(&args.second, args.quiet)?;

    Ok(())
}

/// Decode one trace file and write its report to stdout.
fn dump_file(path: &Path, quiet: bool) -> Result<()> {
    let profile = decode_file(path)
        .with_context(|| format!("failed to decode \"{}\"", path.display()))?;

    info!(
        "decoded \"{}\": {} descriptors, {} thread sections",
        path.display(),
        profile.descriptors.len(),
        profile.thread_sections.len()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if !quiet {
        writeln!(out, "File: {}", path.display())?;
    }
    report::write_profile(&mut out, &profile)?;
    Ok(())
}

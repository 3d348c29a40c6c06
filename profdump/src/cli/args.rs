//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "profdump",
    about = "Dump two binary profiler trace files as comparable text reports",
    after_help = "\
EXAMPLES:
    profdump before.prof after.prof          Dump both traces for comparison
    profdump -q before.prof after.prof       Reports only, no file banners
    RUST_LOG=warn profdump a.prof b.prof     Surface decoder consistency warnings"
)]
pub struct Args {
    /// First trace file to decode and dump
    #[arg(value_name = "FILE1")]
    pub first: PathBuf,

    /// Second trace file to decode and dump
    #[arg(value_name = "FILE2")]
    pub second: PathBuf,

    /// Suppress the per-file banner line
    #[arg(short, long)]
    pub quiet: bool,
}

//! Structured error types for profdump
//!
//! Using thiserror for automatic Display implementation and error chaining.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while decoding a trace file.
///
/// Every variant is fatal to the current file's decode: each record's offset
/// depends on having consumed the previous one correctly, so there is no
/// partial-record or partial-section recovery.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("failed to open \"{path}\" for reading: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("truncated stream: needed {needed} bytes at offset {offset}, only {available} remain")]
    TruncatedStream { offset: u64, needed: u64, available: u64 },

    #[error("invalid {record} record: declared size {size} cannot cover {needed} fixed and declared bytes")]
    InvalidLength { record: &'static str, size: u16, needed: u32 },

    #[error(transparent)]
    Io(#[from] io::Error),
}

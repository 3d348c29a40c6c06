//! Binary trace decoding
//!
//! The format is sequential and self-describing: a fixed global header, a
//! count-prefixed descriptor table, then thread sections until end-of-stream.
//! Every variable-length record derives its trailing byte counts from an
//! explicit leading size field, so each field's offset depends on the fields
//! before it — one decode, one cursor, strictly forward (besides the single
//! length probe at cursor construction).

pub mod cursor;
pub mod descriptors;
pub mod header;
pub mod threads;

pub use cursor::ByteCursor;

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use crate::domain::DecodeError;
use crate::trace_data::ProfileData;

/// Decode one complete trace stream into a [`ProfileData`].
///
/// Returns the first failure encountered; nothing past a failed record is
/// decoded, since its offset would be meaningless.
pub fn decode_profile<R: Read + Seek>(reader: R) -> Result<ProfileData, DecodeError> {
    let mut cursor = ByteCursor::new(reader)?;
    let header = header::decode_header(&mut cursor)?;
    let descriptors = descriptors::decode_descriptor_table(&mut cursor, &header)?;
    let thread_sections = threads::decode_thread_sections(&mut cursor)?;
    Ok(ProfileData { header, descriptors, thread_sections })
}

/// Open and decode a trace file.
///
/// The handle is held exclusively for the duration of the decode and released
/// by scope on every exit path, success or failure.
pub fn decode_file(path: impl AsRef<Path>) -> Result<ProfileData, DecodeError> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|source| DecodeError::FileOpen { path: path.to_path_buf(), source })?;
    decode_profile(BufReader::new(file))
}

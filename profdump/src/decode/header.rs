//! File header decoding
//!
//! The wire order is a fixed protocol detail and does not match a
//! padding-friendly in-memory layout: the block and descriptor counters are
//! interleaved with the memory-usage counters after the contiguous leading
//! fields. Each field is read individually, in the documented wire sequence.

use std::io::{Read, Seek};

use crate::decode::cursor::ByteCursor;
use crate::domain::DecodeError;
use crate::trace_data::{FileHeader, FileVersion};

/// Wire size of the header in bytes.
pub const HEADER_WIRE_SIZE: u64 = 64;

/// Consume the fixed-layout file header.
///
/// Fails with [`DecodeError::TruncatedStream`] on any short read; no partial
/// header is ever exposed.
pub fn decode_header<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> Result<FileHeader, DecodeError> {
    let signature = cursor.read_u32()?;
    // Version is stored low-to-high: patch, minor, major.
    let patch = cursor.read_u16()?;
    let minor = cursor.read_u8()?;
    let major = cursor.read_u8()?;
    let process_id = cursor.read_u64()?;
    let cpu_frequency_ratio = cursor.read_i64()?;
    let begin_time = cursor.read_u64()?;
    let end_time = cursor.read_u64()?;
    let num_blocks = cursor.read_u32()?;
    let blocks_memory_usage = cursor.read_u64()?;
    let num_descriptors = cursor.read_u32()?;
    let descriptors_memory_usage = cursor.read_u64()?;

    Ok(FileHeader {
        signature,
        version: FileVersion { major, minor, patch },
        process_id,
        cpu_frequency_ratio,
        begin_time,
        end_time,
        num_blocks,
        blocks_memory_usage,
        num_descriptors,
        descriptors_memory_usage,
    })
}

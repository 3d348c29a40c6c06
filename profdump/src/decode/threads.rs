//! Thread section decoding
//!
//! There is no count field for thread sections: they run until the measured
//! end of the stream, which the cursor established with its one length probe.
//! Each section is a thread-info prefix followed by two count-prefixed lists
//! of sized records, context switches then blocks.

use std::io::{Read, Seek};

use crate::decode::cursor::ByteCursor;
use crate::domain::{DecodeError, ThreadId};
use crate::trace_data::{Block, ContextSwitch, ThreadInfo, ThreadSection};

/// Fixed part of a context-switch record: begin, end, target thread id.
pub const CONTEXT_SWITCH_FIXED_SIZE: u16 = 24;

/// Fixed part of a block record: begin, end, block id.
pub const BLOCK_FIXED_SIZE: u16 = 20;

/// Old writers emitted a zero size for block records; it stands for the
/// default record length (fixed part plus a one-byte runtime name). Real
/// trace files depend on this substitution.
pub const LEGACY_ZERO_BLOCK_SIZE: u16 = 21;

/// Consume thread sections until end-of-stream.
///
/// Sections are not independently recoverable: any short read or length
/// underflow aborts the whole decode, since every later offset depends on
/// having consumed the current record correctly.
pub fn decode_thread_sections<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
) -> Result<Vec<ThreadSection>, DecodeError> {
    let mut sections = Vec::new();
    while cursor.position() < cursor.total_len() {
        sections.push(decode_thread_section(cursor)?);
    }
    Ok(sections)
}

fn decode_thread_section<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
) -> Result<ThreadSection, DecodeError> {
    let thread_id = cursor.read_u64()?;
    let name_length = cursor.read_u16()?;
    let name = cursor.read_bytes(usize::from(name_length))?;
    let info = ThreadInfo { thread_id: ThreadId(thread_id), name };

    let num_context_switches = cursor.read_u32()?;
    let mut context_switches = Vec::with_capacity(num_context_switches as usize);
    for _ in 0..num_context_switches {
        context_switches.push(decode_context_switch(cursor)?);
    }

    let num_blocks = cursor.read_u32()?;
    let mut blocks = Vec::with_capacity(num_blocks as usize);
    for _ in 0..num_blocks {
        blocks.push(decode_block(cursor)?);
    }

    Ok(ThreadSection { info, context_switches, blocks })
}

fn decode_context_switch<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
) -> Result<ContextSwitch, DecodeError> {
    let size = cursor.read_u16()?;
    let begin_time = cursor.read_u64()?;
    let end_time = cursor.read_u64()?;
    let target_thread_id = cursor.read_u64()?;

    if size < CONTEXT_SWITCH_FIXED_SIZE {
        return Err(DecodeError::InvalidLength {
            record: "context switch",
            size,
            needed: u32::from(CONTEXT_SWITCH_FIXED_SIZE),
        });
    }
    let process_info = cursor.read_bytes(usize::from(size - CONTEXT_SWITCH_FIXED_SIZE))?;

    Ok(ContextSwitch {
        begin_time,
        end_time,
        target_thread_id: ThreadId(target_thread_id),
        process_info,
    })
}

fn decode_block<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> Result<Block, DecodeError> {
    let mut size = cursor.read_u16()?;
    if size == 0 {
        // Legacy writer bug: zero means "default size", not an empty record.
        size = LEGACY_ZERO_BLOCK_SIZE;
    }

    let begin_time = cursor.read_u64()?;
    let end_time = cursor.read_u64()?;
    let id = cursor.read_u32()?;

    if size < BLOCK_FIXED_SIZE {
        return Err(DecodeError::InvalidLength {
            record: "block",
            size,
            needed: u32::from(BLOCK_FIXED_SIZE),
        });
    }
    let runtime_name = cursor.read_bytes(usize::from(size - BLOCK_FIXED_SIZE))?;

    Ok(Block { begin_time, end_time, id, runtime_name })
}

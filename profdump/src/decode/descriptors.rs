//! Descriptor table decoding
//!
//! The table is count-prefixed by the header (`num_descriptors`); each record
//! is a sized record whose trailing `name`/`fileName` split is derived from
//! the declared size and an explicit name length. Strings carry no terminator
//! on the wire, so exactly the declared byte counts are consumed.

use log::warn;
use std::io::{Read, Seek};

use crate::decode::cursor::ByteCursor;
use crate::domain::{DecodeError, DescriptorId};
use crate::trace_data::{Descriptor, FileHeader};

/// Fixed part of a descriptor record that its declared size accounts for.
pub const DESCRIPTOR_FIXED_SIZE: u16 = 20;

/// Consume exactly `header.num_descriptors` descriptor records.
pub fn decode_descriptor_table<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    header: &FileHeader,
) -> Result<Vec<Descriptor>, DecodeError> {
    let table_start = cursor.position();
    let mut descriptors = Vec::with_capacity(header.num_descriptors as usize);
    for _ in 0..header.num_descriptors {
        descriptors.push(decode_descriptor(cursor)?);
    }

    // The header carries a derived section size that writers never validated;
    // mismatches are worth flagging but not fatal.
    let consumed = cursor.position() - table_start;
    let declared = header.descriptor_section_size();
    if consumed != declared {
        warn!("descriptor table consumed {consumed} bytes, header metadata implies {declared}");
    }

    Ok(descriptors)
}

fn decode_descriptor<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> Result<Descriptor, DecodeError> {
    let size = cursor.read_u16()?;
    let id = cursor.read_u32()?;
    let line = cursor.read_u32()?;
    let color = cursor.read_u32()?;
    let kind = cursor.read_u8()?;
    let status = cursor.read_u8()?;
    let name_length = cursor.read_u16()?;

    // Checked before subtracting: a size smaller than the fixed part plus the
    // declared name length must not wrap into a huge unsigned length.
    let needed = u32::from(DESCRIPTOR_FIXED_SIZE) + u32::from(name_length);
    if u32::from(size) < needed {
        return Err(DecodeError::InvalidLength { record: "descriptor", size, needed });
    }
    let file_name_length = u32::from(size) - needed;

    let name = cursor.read_bytes(usize::from(name_length))?;
    let file_name = cursor.read_bytes(file_name_length as usize)?;

    Ok(Descriptor { id: DescriptorId(id), line, color, kind, status, name, file_name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace_data::FileVersion;
    use std::io::Cursor;

    fn header_with_descriptors(num_descriptors: u32) -> FileHeader {
        FileHeader {
            signature: 0,
            version: FileVersion { major: 0, minor: 0, patch: 0 },
            process_id: 0,
            cpu_frequency_ratio: 1,
            begin_time: 0,
            end_time: 0,
            num_blocks: 0,
            blocks_memory_usage: 0,
            num_descriptors,
            descriptors_memory_usage: 0,
        }
    }

    fn wire_descriptor(name: &[u8], file_name: &[u8]) -> Vec<u8> {
        let size = DESCRIPTOR_FIXED_SIZE + name.len() as u16 + file_name.len() as u16;
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&size.to_le_bytes());
        bytes.extend_from_slice(&11u32.to_le_bytes()); // id
        bytes.extend_from_slice(&42u32.to_le_bytes()); // line
        bytes.extend_from_slice(&0x8000_FF00u32.to_le_bytes()); // color
        bytes.push(1); // type
        bytes.push(2); // status
        bytes.extend_from_slice(&(name.len() as u16).to_le_bytes());
        bytes.extend_from_slice(name);
        bytes.extend_from_slice(file_name);
        bytes
    }

    #[test]
    fn test_decode_descriptor_splits_trailing_strings() {
        let bytes = wire_descriptor(b"update", b"src/game.rs");
        let mut cursor = ByteCursor::new(Cursor::new(bytes)).unwrap();
        let descriptors =
            decode_descriptor_table(&mut cursor, &header_with_descriptors(1)).unwrap();

        assert_eq!(descriptors.len(), 1);
        let descriptor = &descriptors[0];
        assert_eq!(descriptor.id, DescriptorId(11));
        assert_eq!(descriptor.line, 42);
        assert_eq!(descriptor.kind, 1);
        assert_eq!(descriptor.status, 2);
        assert_eq!(descriptor.name, b"update");
        assert_eq!(descriptor.file_name, b"src/game.rs");
    }

    #[test]
    fn test_name_length_exceeding_size_is_invalid_length() {
        // size only covers the fixed part, yet a 10-byte name is declared
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&DESCRIPTOR_FIXED_SIZE.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 14]); // id, line, color, type, status
        bytes.extend_from_slice(&10u16.to_le_bytes()); // name length
        bytes.extend_from_slice(&[0u8; 64]); // padding the decoder must not reach

        let mut cursor = ByteCursor::new(Cursor::new(bytes)).unwrap();
        let err = decode_descriptor_table(&mut cursor, &header_with_descriptors(1)).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidLength { record: "descriptor", size: 20, needed: 30 }
        ));
    }

    #[test]
    fn test_size_below_fixed_part_is_invalid_length() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&10u16.to_le_bytes()); // size < fixed part
        bytes.extend_from_slice(&[0u8; 16]); // fixed prefix, zero name length

        let mut cursor = ByteCursor::new(Cursor::new(bytes)).unwrap();
        let err = decode_descriptor_table(&mut cursor, &header_with_descriptors(1)).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidLength { size: 10, .. }));
    }

    #[test]
    fn test_truncation_inside_name_run_fails() {
        let mut bytes = wire_descriptor(b"update", b"src/game.rs");
        bytes.truncate(bytes.len() - 14); // cut inside "update"
        let mut cursor = ByteCursor::new(Cursor::new(bytes)).unwrap();
        let err = decode_descriptor_table(&mut cursor, &header_with_descriptors(1)).unwrap_err();
        assert!(matches!(err, DecodeError::TruncatedStream { .. }));
    }

    #[test]
    fn test_reads_exactly_count_records() {
        let mut bytes = wire_descriptor(b"a", b"b");
        bytes.extend_from_slice(&wire_descriptor(b"c", b"d"));
        let mut cursor = ByteCursor::new(Cursor::new(bytes)).unwrap();
        let descriptors =
            decode_descriptor_table(&mut cursor, &header_with_descriptors(2)).unwrap();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[1].name, b"c");
        assert_eq!(cursor.remaining(), 0);
    }
}

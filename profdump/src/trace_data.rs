//! In-memory model of a decoded profiler trace
//!
//! These structs are the decoder's sole output and the report renderer's sole
//! input. Every variable-length byte field is a uniquely owned `Vec<u8>`; no
//! two records alias trailing bytes. Name fields are raw bytes on the wire
//! (no terminator guaranteed), so display goes through the lossy helpers.

// Tick-to-time conversion loses precision for display; channel extraction
// truncates on purpose
#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]

use std::borrow::Cow;
use std::fmt;

use crate::domain::{DescriptorId, ThreadId};

/// Trace file format version.
///
/// Wire order is patch, minor, major (low to high).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u16,
}

impl fmt::Display for FileVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Fixed-layout global file header, parsed once and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    /// 4-byte magic, opaque; see [`FileHeader::signature_ascii`] for display.
    pub signature: u32,
    pub version: FileVersion,
    pub process_id: u64,
    /// Divides tick deltas to get wall time. May legitimately be zero in a
    /// damaged file, so duration computation validates it first.
    pub cpu_frequency_ratio: i64,
    pub begin_time: u64,
    pub end_time: u64,
    pub num_blocks: u32,
    pub blocks_memory_usage: u64,
    pub num_descriptors: u32,
    pub descriptors_memory_usage: u64,
}

impl FileHeader {
    /// The magic bytes rendered as ASCII, with non-printable bytes dotted out.
    #[must_use]
    pub fn signature_ascii(&self) -> String {
        self.signature
            .to_le_bytes()
            .iter()
            .map(|&b| if b.is_ascii_graphic() { b as char } else { '.' })
            .collect()
    }

    /// Total profiled wall time in milliseconds.
    ///
    /// Returns `None` when `cpu_frequency_ratio` is zero rather than dividing
    /// by it.
    #[must_use]
    pub fn duration_ms(&self) -> Option<f64> {
        if self.cpu_frequency_ratio == 0 {
            return None;
        }
        let ticks = self.end_time.wrapping_sub(self.begin_time) as f64;
        Some(100.0 * ticks / self.cpu_frequency_ratio as f64)
    }

    /// Size in bytes the header claims the descriptor table occupies.
    ///
    /// Metadata only; the descriptor decoder compares it against the bytes it
    /// actually consumed and warns on mismatch.
    #[must_use]
    pub fn descriptor_section_size(&self) -> u64 {
        u64::from(self.num_descriptors) * 2 + self.descriptors_memory_usage
    }
}

/// A named source-code trace point definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub id: DescriptorId,
    pub line: u32,
    /// Packed display color; byte order blue, green, red, alpha from least to
    /// most significant.
    pub color: u32,
    pub kind: u8,
    pub status: u8,
    pub name: Vec<u8>,
    pub file_name: Vec<u8>,
}

impl Descriptor {
    #[must_use]
    pub fn blue(&self) -> u8 {
        (self.color & 0xff) as u8
    }

    #[must_use]
    pub fn green(&self) -> u8 {
        ((self.color >> 8) & 0xff) as u8
    }

    #[must_use]
    pub fn red(&self) -> u8 {
        ((self.color >> 16) & 0xff) as u8
    }

    #[must_use]
    pub fn alpha(&self) -> u8 {
        ((self.color >> 24) & 0xff) as u8
    }

    #[must_use]
    pub fn name_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    #[must_use]
    pub fn file_name_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.file_name)
    }
}

/// Identity of one profiled thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadInfo {
    pub thread_id: ThreadId,
    pub name: Vec<u8>,
}

impl ThreadInfo {
    #[must_use]
    pub fn name_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }
}

/// A recorded interval during which the thread was switched out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextSwitch {
    pub begin_time: u64,
    pub end_time: u64,
    pub target_thread_id: ThreadId,
    /// Opaque echo of process-level context, kept verbatim.
    pub process_info: Vec<u8>,
}

impl ContextSwitch {
    #[must_use]
    pub fn duration(&self) -> u64 {
        self.end_time.wrapping_sub(self.begin_time)
    }
}

/// One recorded timed execution span tied to a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub begin_time: u64,
    pub end_time: u64,
    pub id: u32,
    /// Runtime-overridable display name.
    pub runtime_name: Vec<u8>,
}

impl Block {
    #[must_use]
    pub fn duration(&self) -> u64 {
        self.end_time.wrapping_sub(self.begin_time)
    }

    #[must_use]
    pub fn runtime_name_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.runtime_name)
    }
}

/// The contiguous run of records belonging to one profiled thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadSection {
    pub info: ThreadInfo,
    pub context_switches: Vec<ContextSwitch>,
    pub blocks: Vec<Block>,
}

/// A fully decoded trace file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileData {
    pub header: FileHeader,
    pub descriptors: Vec<Descriptor>,
    pub thread_sections: Vec<ThreadSection>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> FileHeader {
        FileHeader {
            signature: u32::from_le_bytes(*b"EPRF"),
            version: FileVersion { major: 1, minor: 3, patch: 0 },
            process_id: 4242,
            cpu_frequency_ratio: 10,
            begin_time: 1000,
            end_time: 2000,
            num_blocks: 0,
            blocks_memory_usage: 0,
            num_descriptors: 3,
            descriptors_memory_usage: 90,
        }
    }

    #[test]
    fn test_signature_ascii() {
        assert_eq!(sample_header().signature_ascii(), "EPRF");
    }

    #[test]
    fn test_signature_ascii_dots_out_non_printable() {
        let header = FileHeader { signature: 0x0000_1F41, ..sample_header() };
        assert_eq!(header.signature_ascii(), "A...");
    }

    #[test]
    fn test_duration_ms() {
        // 1000 ticks at ratio 10 -> 100 per tick-unit convention
        let ms = sample_header().duration_ms().unwrap();
        assert!((ms - 10_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_duration_ms_zero_ratio() {
        let header = FileHeader { cpu_frequency_ratio: 0, ..sample_header() };
        assert_eq!(header.duration_ms(), None);
    }

    #[test]
    fn test_descriptor_section_size() {
        assert_eq!(sample_header().descriptor_section_size(), 96);
    }

    #[test]
    fn test_color_channel_unpacking() {
        let descriptor = Descriptor {
            id: crate::domain::DescriptorId(1),
            line: 1,
            color: 0xAABB_CCDD,
            kind: 0,
            status: 0,
            name: Vec::new(),
            file_name: Vec::new(),
        };
        assert_eq!(descriptor.blue(), 0xDD);
        assert_eq!(descriptor.green(), 0xCC);
        assert_eq!(descriptor.red(), 0xBB);
        assert_eq!(descriptor.alpha(), 0xAA);
    }

    #[test]
    fn test_lossy_name_display() {
        let info = ThreadInfo { thread_id: ThreadId(1), name: b"render\xFFloop".to_vec() };
        assert_eq!(info.name_lossy(), "render\u{FFFD}loop");
    }
}

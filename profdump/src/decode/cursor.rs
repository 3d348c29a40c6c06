//! Little-endian cursor over a seekable byte stream

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Read, Seek, SeekFrom};

use crate::domain::DecodeError;

/// Sequential reader over one trace stream.
///
/// Construction performs the single length probe the format needs (seek to
/// end, record the total length, seek back); afterwards every read moves the
/// cursor forward and any short read surfaces as
/// [`DecodeError::TruncatedStream`], never as a silently short buffer.
pub struct ByteCursor<R> {
    inner: R,
    position: u64,
    total_len: u64,
}

impl<R: Read + Seek> ByteCursor<R> {
    /// Wrap a stream, measuring its total length with one end-seek.
    ///
    /// The cursor is restored to where it started; the probe exists only so
    /// the thread-section loop knows when to stop.
    pub fn new(mut inner: R) -> Result<Self, DecodeError> {
        let position = inner.stream_position()?;
        let total_len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(position))?;
        Ok(Self { inner, position, total_len })
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }

    #[must_use]
    pub fn total_len(&self) -> u64 {
        self.total_len
    }

    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.total_len.saturating_sub(self.position)
    }

    fn short_read(&self, needed: u64, err: io::Error) -> DecodeError {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            DecodeError::TruncatedStream {
                offset: self.position,
                needed,
                available: self.remaining(),
            }
        } else {
            DecodeError::Io(err)
        }
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let value = self.inner.read_u8().map_err(|e| self.short_read(1, e))?;
        self.position += 1;
        Ok(value)
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let value = self.inner.read_u16::<LittleEndian>().map_err(|e| self.short_read(2, e))?;
        self.position += 2;
        Ok(value)
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let value = self.inner.read_u32::<LittleEndian>().map_err(|e| self.short_read(4, e))?;
        self.position += 4;
        Ok(value)
    }

    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        let value = self.inner.read_u64::<LittleEndian>().map_err(|e| self.short_read(8, e))?;
        self.position += 8;
        Ok(value)
    }

    pub fn read_i64(&mut self) -> Result<i64, DecodeError> {
        let value = self.inner.read_i64::<LittleEndian>().map_err(|e| self.short_read(8, e))?;
        self.position += 8;
        Ok(value)
    }

    /// Read exactly `len` bytes into an owned buffer.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, DecodeError> {
        let mut buf = vec![0u8; len];
        self.inner.read_exact(&mut buf).map_err(|e| self.short_read(len as u64, e))?;
        self.position += len as u64;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_length_probe_restores_position() {
        let cursor = ByteCursor::new(Cursor::new(vec![1u8, 2, 3, 4])).unwrap();
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.total_len(), 4);
        assert_eq!(cursor.remaining(), 4);
    }

    #[test]
    fn test_reads_are_little_endian_and_advance() {
        let mut cursor = ByteCursor::new(Cursor::new(vec![0x34, 0x12, 0xFF])).unwrap();
        assert_eq!(cursor.read_u16().unwrap(), 0x1234);
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.read_u8().unwrap(), 0xFF);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_read_i64_sign() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(-5i64).to_le_bytes());
        let mut cursor = ByteCursor::new(Cursor::new(bytes)).unwrap();
        assert_eq!(cursor.read_i64().unwrap(), -5);
    }

    #[test]
    fn test_short_fixed_read_is_truncated_stream() {
        let mut cursor = ByteCursor::new(Cursor::new(vec![0xABu8])).unwrap();
        let err = cursor.read_u32().unwrap_err();
        match err {
            DecodeError::TruncatedStream { offset, needed, available } => {
                assert_eq!(offset, 0);
                assert_eq!(needed, 4);
                assert_eq!(available, 1);
            }
            other => panic!("expected TruncatedStream, got {other:?}"),
        }
    }

    #[test]
    fn test_short_variable_read_is_truncated_stream() {
        let mut cursor = ByteCursor::new(Cursor::new(vec![1u8, 2, 3])).unwrap();
        let err = cursor.read_bytes(10).unwrap_err();
        assert!(matches!(err, DecodeError::TruncatedStream { needed: 10, .. }));
    }

    #[test]
    fn test_read_bytes_exact() {
        let mut cursor = ByteCursor::new(Cursor::new(b"abcdef".to_vec())).unwrap();
        assert_eq!(cursor.read_bytes(3).unwrap(), b"abc");
        assert_eq!(cursor.read_bytes(0).unwrap(), b"");
        assert_eq!(cursor.position(), 3);
    }
}

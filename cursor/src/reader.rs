//! Big-endian byte reader with bounded operations.

use crate::error::{CursorError, CursorResult};

/// A byte reader for decoding network-order data.
///
/// All read operations are bounds-checked. A failed read consumes nothing,
/// so the position still points at the field that could not be read.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    pub fn read_u8(&mut self) -> CursorResult<u8> {
        let [value] = self.read_array::<1>()?;
        Ok(value)
    }

    pub fn read_i8(&mut self) -> CursorResult<i8> {
        Ok(i8::from_be_bytes(self.read_array()?))
    }

    pub fn read_u16(&mut self) -> CursorResult<u16> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    pub fn read_i16(&mut self) -> CursorResult<i16> {
        Ok(i16::from_be_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> CursorResult<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub fn read_i32(&mut self) -> CursorResult<i32> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> CursorResult<u64> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    pub fn read_i64(&mut self) -> CursorResult<i64> {
        Ok(i64::from_be_bytes(self.read_array()?))
    }

    pub fn read_f32(&mut self) -> CursorResult<f32> {
        Ok(f32::from_be_bytes(self.read_array()?))
    }

    pub fn read_f64(&mut self) -> CursorResult<f64> {
        Ok(f64::from_be_bytes(self.read_array()?))
    }

    /// Reads a run of `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> CursorResult<&'a [u8]> {
        self.ensure_bytes(len)?;
        let data: &'a [u8] = self.data;
        let out = &data[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    /// Skips `len` bytes without interpreting them.
    pub fn skip(&mut self, len: usize) -> CursorResult<()> {
        self.ensure_bytes(len)?;
        self.pos += len;
        Ok(())
    }

    fn ensure_bytes(&self, len: usize) -> CursorResult<()> {
        let available = self.remaining();
        if len > available {
            return Err(CursorError::TruncatedInput {
                requested: len,
                available,
            });
        }
        Ok(())
    }

    fn read_array<const N: usize>(&mut self) -> CursorResult<[u8; N]> {
        self.ensure_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reader() {
        let reader = ByteReader::new(&[]);
        assert!(reader.is_empty());
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn read_from_empty_fails() {
        let mut reader = ByteReader::new(&[]);
        let result = reader.read_u8();
        assert_eq!(
            result,
            Err(CursorError::TruncatedInput {
                requested: 1,
                available: 0
            })
        );
    }

    #[test]
    fn reads_big_endian_integers() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0xFF, 0xFE];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_u16().unwrap(), 0x0102);
        assert_eq!(reader.read_u32().unwrap(), 0x0304_0506);
        assert_eq!(reader.read_i16().unwrap(), -2);
        assert!(reader.is_empty());
    }

    #[test]
    fn failed_read_consumes_nothing() {
        let data = [0xAA, 0xBB, 0xCC];
        let mut reader = ByteReader::new(&data);
        reader.read_u8().unwrap();

        let err = reader.read_u32().unwrap_err();
        assert_eq!(
            err,
            CursorError::TruncatedInput {
                requested: 4,
                available: 2
            }
        );
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.read_u16().unwrap(), 0xBBCC);
    }

    #[test]
    fn read_bytes_returns_borrowed_slice() {
        let data = [1, 2, 3, 4, 5];
        let mut reader = ByteReader::new(&data);
        reader.skip(1).unwrap();
        assert_eq!(reader.read_bytes(3).unwrap(), &[2, 3, 4]);
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn read_bytes_past_end_fails() {
        let mut reader = ByteReader::new(&[1, 2]);
        assert!(matches!(
            reader.read_bytes(3),
            Err(CursorError::TruncatedInput {
                requested: 3,
                available: 2
            })
        ));
    }

    #[test]
    fn reads_float_bit_patterns() {
        let data = [0x3F, 0x80, 0x00, 0x00, 0xC0, 0, 0, 0, 0, 0, 0, 0];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_f32().unwrap().to_bits(), 1.0f32.to_bits());
        assert_eq!(reader.read_f64().unwrap().to_bits(), (-2.0f64).to_bits());
    }

    #[test]
    fn skip_past_end_fails() {
        let mut reader = ByteReader::new(&[0; 4]);
        assert!(reader.skip(5).is_err());
        assert_eq!(reader.position(), 0);
    }
}

//! Big-endian byte writer.

/// A growable writer that appends values in network byte order.
///
/// Writes never fail; call [`finish`](Self::finish) to take the buffer.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    bytes: Vec<u8>,
}

impl ByteWriter {
    /// Creates a new empty `ByteWriter`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `ByteWriter` with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u16(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i16(&mut self, value: i16) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes an IEEE-754 single as its big-endian bit pattern.
    pub fn write_f32(&mut self, value: f32) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes an IEEE-754 double as its big-endian bit pattern.
    pub fn write_f64(&mut self, value: f64) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes a raw byte run verbatim.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Writes `count` zero bytes.
    pub fn write_zeros(&mut self, count: usize) {
        self.bytes.resize(self.bytes.len() + count, 0);
    }

    /// Finishes writing and returns the byte buffer.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_writer() {
        let writer = ByteWriter::new();
        assert_eq!(writer.position(), 0);
        assert!(writer.is_empty());
        assert!(writer.finish().is_empty());
    }

    #[test]
    fn integers_are_big_endian() {
        let mut writer = ByteWriter::new();
        writer.write_u16(0x0102);
        writer.write_u32(0x0304_0506);
        writer.write_i16(-2);
        assert_eq!(
            writer.finish(),
            vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0xFF, 0xFE]
        );
    }

    #[test]
    fn u64_is_big_endian() {
        let mut writer = ByteWriter::new();
        writer.write_u64(0x0102_0304_0506_0708);
        assert_eq!(writer.finish(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn floats_write_ieee_bit_patterns() {
        let mut writer = ByteWriter::new();
        writer.write_f32(1.0);
        writer.write_f64(-2.0);
        let bytes = writer.finish();
        assert_eq!(&bytes[..4], &[0x3F, 0x80, 0x00, 0x00]);
        assert_eq!(&bytes[4..], &[0xC0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn zero_float_is_all_zero_bits() {
        let mut writer = ByteWriter::new();
        writer.write_f32(0.0);
        writer.write_f64(0.0);
        assert_eq!(writer.finish(), vec![0u8; 12]);
    }

    #[test]
    fn write_zeros_advances_position() {
        let mut writer = ByteWriter::with_capacity(8);
        writer.write_u8(7);
        writer.write_zeros(3);
        assert_eq!(writer.position(), 4);
        assert_eq!(writer.as_slice(), &[7, 0, 0, 0]);
    }

    #[test]
    fn write_bytes_verbatim() {
        let mut writer = ByteWriter::new();
        writer.write_bytes(b"DIS");
        writer.write_i8(-1);
        assert_eq!(writer.finish(), vec![b'D', b'I', b'S', 0xFF]);
    }
}

//! Common PDU header layout.

use cursor::{ByteReader, ByteWriter};

use crate::error::{WireError, WireResult};
use crate::pdu_type::{PduType, ProtocolFamily, ProtocolVersion};

/// Size of the common header shared by every PDU.
pub const HEADER_SIZE: usize = 1 + 1 + 1 + 1 + 4 + 2 + 2;

/// Byte offset of the protocol version.
pub const VERSION_OFFSET: usize = 0;

/// Byte offset of the PDU type discriminant.
pub const PDU_TYPE_OFFSET: usize = 2;

/// Byte offset of the protocol family.
pub const FAMILY_OFFSET: usize = 3;

/// Byte offset of the declared total PDU length.
pub const LENGTH_OFFSET: usize = 8;

/// The 12-byte header every PDU begins with.
///
/// `length` is the total encoded size of the PDU, header included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PduHeader {
    pub protocol_version: u8,
    pub exercise_id: u8,
    pub pdu_type: u8,
    pub protocol_family: u8,
    pub timestamp: u32,
    pub length: u16,
    pub padding: u16,
}

impl PduHeader {
    /// Creates a header for `pdu_type` with the current protocol version and
    /// the type's family. `length` is left at zero for the encoder to fill.
    #[must_use]
    pub const fn for_type(pdu_type: PduType) -> Self {
        Self {
            protocol_version: ProtocolVersion::CURRENT.raw(),
            exercise_id: 0,
            pdu_type: pdu_type.raw(),
            protocol_family: pdu_type.family().raw(),
            timestamp: 0,
            length: 0,
            padding: 0,
        }
    }

    /// Reads the header from the start of `buf` without consuming the body.
    pub fn peek(buf: &[u8]) -> WireResult<Self> {
        if buf.len() < HEADER_SIZE {
            return Err(WireError::PduTooSmall {
                actual: buf.len(),
                required: HEADER_SIZE,
            });
        }
        let mut reader = ByteReader::new(buf);
        Self::read(&mut reader)
    }

    /// Reads the header from the reader's current position.
    pub fn read(reader: &mut ByteReader<'_>) -> WireResult<Self> {
        Ok(Self {
            protocol_version: reader.read_u8()?,
            exercise_id: reader.read_u8()?,
            pdu_type: reader.read_u8()?,
            protocol_family: reader.read_u8()?,
            timestamp: reader.read_u32()?,
            length: reader.read_u16()?,
            padding: reader.read_u16()?,
        })
    }

    /// Writes the header fields in wire order.
    pub fn write(&self, writer: &mut ByteWriter) {
        writer.write_u8(self.protocol_version);
        writer.write_u8(self.exercise_id);
        writer.write_u8(self.pdu_type);
        writer.write_u8(self.protocol_family);
        writer.write_u32(self.timestamp);
        writer.write_u16(self.length);
        writer.write_u16(self.padding);
    }

    /// Returns the PDU type if the discriminant is a defined one.
    #[must_use]
    pub const fn kind(&self) -> Option<PduType> {
        PduType::from_raw(self.pdu_type)
    }

    #[must_use]
    pub const fn version(&self) -> Option<ProtocolVersion> {
        ProtocolVersion::from_raw(self.protocol_version)
    }

    #[must_use]
    pub const fn family(&self) -> Option<ProtocolFamily> {
        ProtocolFamily::from_raw(self.protocol_family)
    }
}

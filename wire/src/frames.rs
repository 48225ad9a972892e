//! Splitting a datagram that carries several PDUs back to back.

use crate::error::{LimitKind, WireError, WireResult};
use crate::header::{PduHeader, HEADER_SIZE};
use crate::limits::Limits;

/// One PDU's bytes inside a datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PduFrame<'a> {
    pub header: PduHeader,
    /// Offset of the frame within the datagram.
    pub offset: usize,
    /// The whole PDU, header included.
    pub bytes: &'a [u8],
}

/// Iterator over the PDUs framed in a datagram.
///
/// Each frame spans the length its header declares. Iteration stops after
/// the first error.
#[derive(Debug, Clone)]
pub struct PduFrames<'a> {
    data: &'a [u8],
    offset: usize,
    yielded: usize,
    limits: Limits,
    failed: bool,
}

impl<'a> PduFrames<'a> {
    #[must_use]
    pub fn new(data: &'a [u8], limits: &Limits) -> Self {
        Self {
            data,
            offset: 0,
            yielded: 0,
            limits: limits.clone(),
            failed: false,
        }
    }

    fn next_frame(&mut self) -> WireResult<PduFrame<'a>> {
        let rest = &self.data[self.offset..];
        let header = PduHeader::peek(rest)?;
        let declared = usize::from(header.length);
        if declared < HEADER_SIZE {
            return Err(WireError::InvalidDeclaredLength {
                declared: header.length,
            });
        }
        if declared > self.limits.max_pdu_bytes {
            return Err(WireError::LimitsExceeded {
                kind: LimitKind::PduBytes,
                limit: self.limits.max_pdu_bytes,
                actual: declared,
            });
        }
        if declared > rest.len() {
            return Err(WireError::DeclaredLengthExceedsBuffer {
                declared,
                available: rest.len(),
            });
        }
        if self.yielded >= self.limits.max_pdus_per_datagram {
            return Err(WireError::LimitsExceeded {
                kind: LimitKind::PdusPerDatagram,
                limit: self.limits.max_pdus_per_datagram,
                actual: self.yielded + 1,
            });
        }
        let frame = PduFrame {
            header,
            offset: self.offset,
            bytes: &rest[..declared],
        };
        self.offset += declared;
        self.yielded += 1;
        Ok(frame)
    }
}

impl<'a> Iterator for PduFrames<'a> {
    type Item = WireResult<PduFrame<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.data.len() {
            return None;
        }
        let result = self.next_frame();
        self.failed = result.is_err();
        Some(result)
    }
}

/// Splits `data` into PDU frames, failing on the first malformed header.
pub fn split_datagram<'a>(data: &'a [u8], limits: &Limits) -> WireResult<Vec<PduFrame<'a>>> {
    PduFrames::new(data, limits).collect()
}

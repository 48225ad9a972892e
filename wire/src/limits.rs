//! Configurable limits for bounded datagram framing.

/// Wire-level limits for splitting datagrams into PDUs.
///
/// These limits are enforced before any PDU body is decoded. Record-level
/// limits (list lengths, nesting depth) belong to the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum size of a single PDU in bytes.
    pub max_pdu_bytes: usize,

    /// Maximum number of PDUs carried in one datagram.
    pub max_pdus_per_datagram: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // The header length field is 16 bits wide
            max_pdu_bytes: usize::from(u16::MAX),
            max_pdus_per_datagram: 64,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_pdu_bytes: 1500,
            max_pdus_per_datagram: 8,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_pdu_bytes: usize::MAX,
            max_pdus_per_datagram: usize::MAX,
        }
    }
}

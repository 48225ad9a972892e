//! Limits for record decoding.

/// Bounds enforced while decoding untrusted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum number of elements in one counted list.
    pub max_list_len: usize,
    /// Maximum nesting depth of composite and list records.
    pub max_depth: usize,
    /// Maximum size of one encoded PDU.
    pub max_pdu_bytes: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_list_len: 65_535,
            max_depth: 16,
            max_pdu_bytes: usize::from(u16::MAX),
        }
    }
}

impl DecodeLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_list_len: 256,
            max_depth: 8,
            max_pdu_bytes: 1500,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_list_len: usize::MAX,
            max_depth: usize::MAX,
            max_pdu_bytes: usize::MAX,
        }
    }
}

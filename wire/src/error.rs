//! Error types for PDU framing.

use std::fmt;

use cursor::CursorError;

/// Result type for wire framing operations.
pub type WireResult<T> = Result<T, WireError>;

/// Framing errors found while reading PDU headers out of a datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WireError {
    /// Buffer is too small to contain the common PDU header.
    PduTooSmall { actual: usize, required: usize },

    /// Header declares a total length smaller than the header itself.
    InvalidDeclaredLength { declared: u16 },

    /// Header declares more bytes than the buffer holds.
    DeclaredLengthExceedsBuffer { declared: usize, available: usize },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Specific wire limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    PduBytes,
    PdusPerDatagram,
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PduTooSmall { actual, required } => {
                write!(f, "pdu too small: {actual} bytes, need at least {required}")
            }
            Self::InvalidDeclaredLength { declared } => {
                write!(f, "invalid declared pdu length: {declared}")
            }
            Self::DeclaredLengthExceedsBuffer {
                declared,
                available,
            } => {
                write!(
                    f,
                    "declared pdu length {declared} exceeds {available} available bytes"
                )
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PduBytes => "pdu bytes",
            Self::PdusPerDatagram => "pdus per datagram",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for WireError {}

impl From<CursorError> for WireError {
    fn from(err: CursorError) -> Self {
        match err {
            CursorError::TruncatedInput {
                requested,
                available,
            } => Self::PduTooSmall {
                actual: available,
                required: requested,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_pdu_too_small() {
        let err = WireError::PduTooSmall {
            actual: 5,
            required: 12,
        };
        let msg = err.to_string();
        assert!(msg.contains('5'), "should mention actual size");
        assert!(msg.contains("12"), "should mention required size");
    }

    #[test]
    fn error_display_declared_length() {
        let err = WireError::DeclaredLengthExceedsBuffer {
            declared: 144,
            available: 100,
        };
        let msg = err.to_string();
        assert!(msg.contains("144"), "should mention declared length");
        assert!(msg.contains("100"), "should mention available bytes");
    }

    #[test]
    fn error_display_limits_exceeded() {
        let err = WireError::LimitsExceeded {
            kind: LimitKind::PdusPerDatagram,
            limit: 4,
            actual: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("pdus per datagram"));
        assert!(msg.contains("5 > 4"));
    }

    #[test]
    fn cursor_truncation_maps_to_pdu_too_small() {
        let err: WireError = CursorError::TruncatedInput {
            requested: 12,
            available: 3,
        }
        .into();
        assert_eq!(
            err,
            WireError::PduTooSmall {
                actual: 3,
                required: 12
            }
        );
    }
}

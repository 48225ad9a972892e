//! Error types for codec operations.

use std::fmt;

use cursor::CursorError;
use schema::ScalarType;
use wire::WireError;

/// Result type for encode operations and checked record mutation.
pub type StructuralResult<T> = Result<T, StructuralError>;

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for registry construction.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// A record does not fit its schema.
///
/// These are programming errors on the sending side: the record was built
/// with values the schema cannot carry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StructuralError {
    /// A fixed array holds the wrong number of elements.
    ArrayLengthMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    /// A composite or list element uses a different schema than declared.
    WrongElementSchema {
        field: String,
        expected: String,
        found: String,
    },

    /// A list is too long for its count field.
    CountOverflow {
        field: String,
        count: u64,
        width: ScalarType,
    },

    /// A record is too long for its length field.
    LengthOverflow {
        field: String,
        length: usize,
        width: ScalarType,
    },

    /// A value has the wrong shape or scalar type for its field.
    ValueKindMismatch {
        field: String,
        expected: String,
        found: String,
    },

    /// The schema has no field with this name.
    UnknownField { schema: String, field: String },

    /// The record does not begin with the common PDU header.
    MissingHeader { schema: String },
}

/// Bytes could not be decoded into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// Input ended before the schema was satisfied.
    TruncatedInput { requested: usize, available: usize },

    /// A declared length disagrees with the bytes it covers.
    LengthMismatch { declared: usize, actual: usize },

    /// No schema is registered for this discriminant.
    UnknownPduType(u8),

    /// The header's protocol version is not one the registry decodes for
    /// this discriminant.
    UnsupportedVersion { version: u8, pdu_type: u8 },

    /// Decoding limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// Bytes remained after the record was decoded.
    TrailingData { remaining: usize },

    /// Datagram framing error.
    Wire(WireError),
}

/// Specific decode limit that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    ListLength,
    Depth,
    PduBytes,
}

/// A registration was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegistryError {
    /// The discriminant is already registered.
    DuplicatePduType(u8),

    /// The schema does not begin with the common PDU header.
    MissingHeader { schema: String },

    /// The factory builds a record of a different schema.
    FactoryMismatch {
        pdu_type: u8,
        expected: String,
        found: String,
    },

    /// The factory fills in a different discriminant.
    PduTypeMismatch { pdu_type: u8, produced: u8 },
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArrayLengthMismatch {
                field,
                expected,
                actual,
            } => {
                write!(f, "array {field} needs {expected} elements, has {actual}")
            }
            Self::WrongElementSchema {
                field,
                expected,
                found,
            } => {
                write!(f, "field {field} expects {expected} records, found {found}")
            }
            Self::CountOverflow {
                field,
                count,
                width,
            } => {
                write!(f, "count {field} value {count} does not fit in {width}")
            }
            Self::LengthOverflow {
                field,
                length,
                width,
            } => {
                write!(f, "length {field} value {length} does not fit in {width}")
            }
            Self::ValueKindMismatch {
                field,
                expected,
                found,
            } => {
                write!(f, "field {field} expects {expected}, found {found}")
            }
            Self::UnknownField { schema, field } => {
                write!(f, "schema {schema} has no field {field}")
            }
            Self::MissingHeader { schema } => {
                write!(f, "schema {schema} does not begin with the PDU header")
            }
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedInput {
                requested,
                available,
            } => {
                write!(
                    f,
                    "truncated input: need {requested} bytes, have {available}"
                )
            }
            Self::LengthMismatch { declared, actual } => {
                write!(f, "declared length {declared} but found {actual} bytes")
            }
            Self::UnknownPduType(pdu_type) => write!(f, "unknown PDU type {pdu_type}"),
            Self::UnsupportedVersion { version, pdu_type } => {
                write!(
                    f,
                    "protocol version {version} not supported for PDU type {pdu_type}"
                )
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
            Self::TrailingData { remaining } => {
                write!(f, "{remaining} trailing bytes after record")
            }
            Self::Wire(e) => write!(f, "wire error: {e}"),
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ListLength => "list length",
            Self::Depth => "nesting depth",
            Self::PduBytes => "PDU bytes",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicatePduType(pdu_type) => {
                write!(f, "PDU type {pdu_type} is already registered")
            }
            Self::MissingHeader { schema } => {
                write!(f, "schema {schema} does not begin with the PDU header")
            }
            Self::FactoryMismatch {
                pdu_type,
                expected,
                found,
            } => {
                write!(
                    f,
                    "factory for PDU type {pdu_type} builds {found}, expected {expected}"
                )
            }
            Self::PduTypeMismatch { pdu_type, produced } => {
                write!(f, "factory for PDU type {pdu_type} fills in type {produced}")
            }
        }
    }
}

impl std::error::Error for StructuralError {}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wire(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for RegistryError {}

impl From<CursorError> for DecodeError {
    fn from(err: CursorError) -> Self {
        match err {
            CursorError::TruncatedInput {
                requested,
                available,
            } => Self::TruncatedInput {
                requested,
                available,
            },
        }
    }
}

impl From<WireError> for DecodeError {
    fn from(err: WireError) -> Self {
        Self::Wire(err)
    }
}

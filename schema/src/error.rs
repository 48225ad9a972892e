//! Schema validation errors.

use std::fmt;

use crate::scalar::ScalarType;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur when building or validating a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaError {
    /// Schema name is empty.
    EmptyName,

    /// A field has an empty name.
    EmptyFieldName { schema: String },

    /// Two fields share a name.
    DuplicateField { schema: String, field: String },

    /// Fixed arrays must hold at least one element.
    ZeroLengthArray { field: String },

    /// Count and length fields must be unsigned integers.
    InvalidCountWidth { field: String, width: ScalarType },

    /// A bit-measured count needs a nonzero element size.
    InvalidCountUnit { field: String },

    /// Alignment boundary must be a power of two.
    InvalidBoundary { field: String, boundary: usize },

    /// A list names a count field that does not exist.
    UnknownCountField { list: String, count: String },

    /// A list names a count field that is not a count of that list.
    CountFieldMismatch { list: String, count: String },

    /// A list's count field must precede the list.
    CountAfterList { list: String, count: String },

    /// A count field is not used by the list it names.
    UnclaimedCountField { count: String, list: String },

    /// At most one length field per schema.
    MultipleLengthFields { schema: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "schema name is empty"),
            Self::EmptyFieldName { schema } => {
                write!(f, "schema {schema} has a field with an empty name")
            }
            Self::DuplicateField { schema, field } => {
                write!(f, "schema {schema} declares field {field} twice")
            }
            Self::ZeroLengthArray { field } => {
                write!(f, "fixed array {field} has zero length")
            }
            Self::InvalidCountWidth { field, width } => {
                write!(f, "field {field} needs an unsigned width, found {width}")
            }
            Self::InvalidCountUnit { field } => {
                write!(f, "count {field} measures zero bits per element")
            }
            Self::InvalidBoundary { field, boundary } => {
                write!(f, "padding {field} boundary {boundary} is not a power of two")
            }
            Self::UnknownCountField { list, count } => {
                write!(f, "list {list} names unknown count field {count}")
            }
            Self::CountFieldMismatch { list, count } => {
                write!(f, "field {count} is not a count of list {list}")
            }
            Self::CountAfterList { list, count } => {
                write!(f, "count {count} must precede list {list}")
            }
            Self::UnclaimedCountField { count, list } => {
                write!(f, "count {count} names {list}, which does not use it")
            }
            Self::MultipleLengthFields { schema } => {
                write!(f, "schema {schema} declares more than one length field")
            }
        }
    }
}

impl std::error::Error for SchemaError {}

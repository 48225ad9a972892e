//! Error type for the catalog conveniences.

use std::fmt;

use codec::{DecodeError, RegistryError, StructuralError};
use schema::SchemaError;
use wire::PduType;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CatalogError {
    /// A catalog schema failed validation.
    Schema(SchemaError),

    /// A catalog schema could not be registered.
    Registry(RegistryError),

    /// The catalog has no schema for this PDU type.
    Unregistered(PduType),

    /// A PDU did not fit its schema while encoding.
    Structural(StructuralError),

    /// Bytes could not be decoded as a catalog PDU.
    Decode(DecodeError),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema(err) => write!(f, "invalid catalog schema: {err}"),
            Self::Registry(err) => write!(f, "catalog registration failed: {err}"),
            Self::Unregistered(pdu_type) => {
                write!(f, "{pdu_type} PDUs are not in the catalog")
            }
            Self::Structural(err) => write!(f, "encode failed: {err}"),
            Self::Decode(err) => write!(f, "decode failed: {err}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Schema(err) => Some(err),
            Self::Registry(err) => Some(err),
            Self::Structural(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Unregistered(_) => None,
        }
    }
}

impl From<SchemaError> for CatalogError {
    fn from(err: SchemaError) -> Self {
        Self::Schema(err)
    }
}

impl From<RegistryError> for CatalogError {
    fn from(err: RegistryError) -> Self {
        Self::Registry(err)
    }
}

impl From<StructuralError> for CatalogError {
    fn from(err: StructuralError) -> Self {
        Self::Structural(err)
    }
}

impl From<DecodeError> for CatalogError {
    fn from(err: DecodeError) -> Self {
        Self::Decode(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn wrapped_errors_keep_their_source() {
        let err = CatalogError::from(DecodeError::UnknownPduType(99));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("99"));
    }

    #[test]
    fn unregistered_names_the_type() {
        let err = CatalogError::Unregistered(PduType::Tspi);
        assert_eq!(err.to_string(), "Tspi PDUs are not in the catalog");
        assert!(err.source().is_none());
    }
}

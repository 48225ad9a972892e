//! Field kinds and definitions.

use std::sync::Arc;

use crate::scalar::{Scalar, ScalarType};
use crate::schema::Schema;

/// Shared, immutable handle to a schema.
pub type SchemaRef = Arc<Schema>;

/// How a count field measures its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CountUnit {
    /// Number of elements.
    Elements,
    /// Number of bits, each element occupying `bits_per_element` bits.
    /// Decoding rounds a partial element up and remembers the bits left
    /// over, so the count re-encodes unchanged.
    Bits(u32),
}

/// Where a counted list's element count lives on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CountSource {
    /// Written immediately before the elements, at this width.
    Inline(ScalarType),
    /// Written at an earlier [`FieldKind::Count`] field with this name.
    Field(String),
}

/// Element shape of a counted list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ListElement {
    Record(SchemaRef),
    Scalar(ScalarType),
}

impl ListElement {
    /// Smallest possible encoded size of one element.
    #[must_use]
    pub fn min_size(&self) -> usize {
        match self {
            Self::Record(schema) => schema.min_size(),
            Self::Scalar(ty) => ty.width(),
        }
    }
}

/// The wire shape of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FieldKind {
    /// A fixed-width primitive.
    Scalar(ScalarType),

    /// Exactly `len` primitives.
    FixedArray { element: ScalarType, len: usize },

    /// An embedded sub-record.
    Composite(SchemaRef),

    /// A variable-length sequence.
    CountedList {
        element: ListElement,
        count: CountSource,
    },

    /// Element count of `list`, computed from the list when encoding.
    Count {
        width: ScalarType,
        list: String,
        unit: CountUnit,
    },

    /// Total encoded size in bytes of the record holding this field.
    Length(ScalarType),

    /// Zero bytes up to the next multiple of `boundary`, measured from the
    /// start of the outermost record being encoded.
    PaddingTo { boundary: usize },

    /// A fixed value, written on encode and discarded on decode.
    Constant(Scalar),
}

impl FieldKind {
    #[must_use]
    pub const fn scalar(ty: ScalarType) -> Self {
        Self::Scalar(ty)
    }

    #[must_use]
    pub const fn fixed_array(element: ScalarType, len: usize) -> Self {
        Self::FixedArray { element, len }
    }

    #[must_use]
    pub fn composite(schema: &SchemaRef) -> Self {
        Self::Composite(Arc::clone(schema))
    }

    /// A list of records whose count is held by the field `count_field`.
    #[must_use]
    pub fn list(element: &SchemaRef, count_field: impl Into<String>) -> Self {
        Self::CountedList {
            element: ListElement::Record(Arc::clone(element)),
            count: CountSource::Field(count_field.into()),
        }
    }

    /// A list of records with its count written just before it.
    #[must_use]
    pub fn inline_list(element: &SchemaRef, width: ScalarType) -> Self {
        Self::CountedList {
            element: ListElement::Record(Arc::clone(element)),
            count: CountSource::Inline(width),
        }
    }

    #[must_use]
    pub fn count(width: ScalarType, list: impl Into<String>) -> Self {
        Self::Count {
            width,
            list: list.into(),
            unit: CountUnit::Elements,
        }
    }

    /// Returns `true` for fields the encoder computes rather than reads
    /// from the record.
    #[must_use]
    pub const fn is_derived(&self) -> bool {
        matches!(
            self,
            Self::Count { .. } | Self::Length(_) | Self::PaddingTo { .. } | Self::Constant(_)
        )
    }

    /// Encoded size when it does not depend on record contents or position.
    #[must_use]
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            Self::Scalar(ty) | Self::Length(ty) => Some(ty.width()),
            Self::Count { width, .. } => Some(width.width()),
            Self::Constant(value) => Some(value.ty().width()),
            Self::FixedArray { element, len } => Some(element.width() * len),
            Self::Composite(schema) => schema.fixed_size(),
            Self::CountedList { .. } | Self::PaddingTo { .. } => None,
        }
    }

    /// Smallest possible encoded size.
    #[must_use]
    pub fn min_size(&self) -> usize {
        match self {
            Self::Composite(schema) => schema.min_size(),
            Self::CountedList { count, .. } => match count {
                CountSource::Inline(width) => width.width(),
                CountSource::Field(_) => 0,
            },
            Self::PaddingTo { .. } => 0,
            other => other.fixed_size().unwrap_or(0),
        }
    }
}

/// A named field within a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldDef {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity_id() -> SchemaRef {
        Arc::new(
            Schema::builder("EntityID")
                .u16("site")
                .u16("application")
                .u16("entity")
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn derived_kinds() {
        assert!(FieldKind::count(ScalarType::U8, "items").is_derived());
        assert!(FieldKind::Length(ScalarType::U16).is_derived());
        assert!(FieldKind::PaddingTo { boundary: 4 }.is_derived());
        assert!(FieldKind::Constant(Scalar::U8(0)).is_derived());
        assert!(!FieldKind::scalar(ScalarType::U8).is_derived());
        assert!(!FieldKind::composite(&entity_id()).is_derived());
    }

    #[test]
    fn fixed_sizes() {
        assert_eq!(FieldKind::scalar(ScalarType::F64).fixed_size(), Some(8));
        assert_eq!(
            FieldKind::fixed_array(ScalarType::U8, 11).fixed_size(),
            Some(11)
        );
        assert_eq!(FieldKind::composite(&entity_id()).fixed_size(), Some(6));
        assert_eq!(FieldKind::list(&entity_id(), "n").fixed_size(), None);
        assert_eq!(FieldKind::PaddingTo { boundary: 8 }.fixed_size(), None);
    }

    #[test]
    fn min_sizes_count_inline_width_only() {
        assert_eq!(
            FieldKind::inline_list(&entity_id(), ScalarType::U16).min_size(),
            2
        );
        assert_eq!(FieldKind::list(&entity_id(), "n").min_size(), 0);
        assert_eq!(ListElement::Record(entity_id()).min_size(), 6);
        assert_eq!(ListElement::Scalar(ScalarType::U8).min_size(), 1);
    }
}

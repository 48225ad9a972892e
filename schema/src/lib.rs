//! Record layouts for the DIS PDU codec.
//!
//! A [`Schema`] is an ordered list of named fields describing how a record
//! is laid out on the wire:
//! - Fixed-width scalars and fixed arrays of scalars
//! - Embedded sub-records
//! - Counted lists, with the count written inline or at an earlier field
//! - Derived fields (counts, lengths, alignment padding, constants) that the
//!   encoder computes rather than reads from the record
//!
//! Schemas are validated once when built and shared by `Arc` afterwards.
//!
//! # Design Principles
//!
//! - **Runtime schemas** - Layouts are data, built with [`SchemaBuilder`].
//! - **Validated links** - Every count field is bound to exactly one list at build time.
//! - **Deterministic hashing** - [`schema_hash`] is stable given the same definition.
//!
//! ```
//! use schema::{Schema, ScalarType};
//!
//! let entity_id = Schema::builder("EntityID")
//!     .u16("site")
//!     .u16("application")
//!     .u16("entity")
//!     .build_ref()
//!     .unwrap();
//! let group = Schema::builder("Group")
//!     .count("number_of_entities", ScalarType::U8, "entities")
//!     .list("entities", &entity_id, "number_of_entities")
//!     .build()
//!     .unwrap();
//! assert_eq!(entity_id.fixed_size(), Some(6));
//! assert_eq!(group.min_size(), 1);
//! ```

mod error;
mod field;
mod hash;
mod scalar;
mod schema;

pub use error::{SchemaError, SchemaResult};
pub use field::{CountSource, CountUnit, FieldDef, FieldKind, ListElement, SchemaRef};
pub use hash::schema_hash;
pub use scalar::{Scalar, ScalarType};
pub use schema::{Schema, SchemaBuilder};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        // Verify all expected items are exported
        let _ = FieldKind::scalar(ScalarType::U8);
        let _ = CountUnit::Bits(64);
        let _ = CountSource::Inline(ScalarType::U16);
        let _ = Scalar::U8(0);
        let schema = Schema::builder("Empty").build().unwrap();
        let _ = schema_hash(&schema);

        let _: SchemaResult<()> = Ok(());
    }

    #[test]
    fn empty_schema_has_zero_size() {
        let schema = Schema::builder("Empty").build().unwrap();
        assert!(schema.is_empty());
        assert_eq!(schema.fixed_size(), Some(0));
        assert_eq!(schema.min_size(), 0);
    }

    #[test]
    fn schema_ref_shares_layout() {
        let inner = Schema::builder("Inner").u32("x").build_ref().unwrap();
        let a = Schema::builder("A").composite("i", &inner).build().unwrap();
        let b = Schema::builder("B").list("is", &inner, "n").build();
        assert!(b.is_err());
        match &a.fields()[0].kind {
            FieldKind::Composite(schema) => assert!(SchemaRef::ptr_eq(schema, &inner)),
            other => panic!("unexpected kind {other:?}"),
        }
    }
}

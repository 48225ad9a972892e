//! Deterministic schema hashing.

use blake3::Hasher;

use crate::field::{CountSource, CountUnit, FieldKind, ListElement};
use crate::scalar::{Scalar, ScalarType};
use crate::schema::Schema;

/// Computes a deterministic hash of a schema's wire layout.
///
/// Field names and nested layouts participate, so two peers agree on the hash
/// exactly when they would marshal the same values identically.
#[must_use]
pub fn schema_hash(schema: &Schema) -> u64 {
    let mut hasher = Hasher::new();
    write_schema(&mut hasher, schema);
    let hash = hasher.finalize();
    let mut out = [0u8; 8];
    out.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(out)
}

fn write_schema(hasher: &mut Hasher, schema: &Schema) {
    write_str(hasher, schema.name());
    write_u32(hasher, schema.len() as u32);
    for field in schema.fields() {
        write_str(hasher, &field.name);
        write_kind(hasher, &field.kind);
    }
}

fn write_kind(hasher: &mut Hasher, kind: &FieldKind) {
    match kind {
        FieldKind::Scalar(ty) => {
            write_u8(hasher, 0);
            write_type(hasher, *ty);
        }
        FieldKind::FixedArray { element, len } => {
            write_u8(hasher, 1);
            write_type(hasher, *element);
            write_u32(hasher, *len as u32);
        }
        FieldKind::Composite(schema) => {
            write_u8(hasher, 2);
            write_schema(hasher, schema);
        }
        FieldKind::CountedList { element, count } => {
            write_u8(hasher, 3);
            match element {
                ListElement::Record(schema) => {
                    write_u8(hasher, 0);
                    write_schema(hasher, schema);
                }
                ListElement::Scalar(ty) => {
                    write_u8(hasher, 1);
                    write_type(hasher, *ty);
                }
            }
            match count {
                CountSource::Inline(width) => {
                    write_u8(hasher, 0);
                    write_type(hasher, *width);
                }
                CountSource::Field(name) => {
                    write_u8(hasher, 1);
                    write_str(hasher, name);
                }
            }
        }
        FieldKind::Count { width, list, unit } => {
            write_u8(hasher, 4);
            write_type(hasher, *width);
            write_str(hasher, list);
            match unit {
                CountUnit::Elements => write_u8(hasher, 0),
                CountUnit::Bits(bits) => {
                    write_u8(hasher, 1);
                    write_u32(hasher, *bits);
                }
            }
        }
        FieldKind::Length(width) => {
            write_u8(hasher, 5);
            write_type(hasher, *width);
        }
        FieldKind::PaddingTo { boundary } => {
            write_u8(hasher, 6);
            write_u32(hasher, *boundary as u32);
        }
        FieldKind::Constant(value) => {
            write_u8(hasher, 7);
            write_scalar(hasher, *value);
        }
    }
}

fn write_type(hasher: &mut Hasher, ty: ScalarType) {
    write_u8(hasher, ty.tag());
}

fn write_scalar(hasher: &mut Hasher, value: Scalar) {
    write_type(hasher, value.ty());
    hasher.update(&value.to_bits().to_le_bytes());
}

fn write_str(hasher: &mut Hasher, value: &str) {
    write_u32(hasher, value.len() as u32);
    hasher.update(value.as_bytes());
}

fn write_u8(hasher: &mut Hasher, value: u8) {
    hasher.update(&[value]);
}

fn write_u32(hasher: &mut Hasher, value: u32) {
    hasher.update(&value.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::SchemaRef;

    fn entity_id() -> SchemaRef {
        Schema::builder("EntityID")
            .u16("site")
            .u16("application")
            .u16("entity")
            .build_ref()
            .unwrap()
    }

    fn attached(name: &str) -> Schema {
        Schema::builder(name)
            .count("number_of_entities", ScalarType::U16, "entities")
            .list("entities", &entity_id(), "number_of_entities")
            .build()
            .unwrap()
    }

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(schema_hash(&attached("A")), schema_hash(&attached("A")));
    }

    #[test]
    fn hash_covers_schema_name() {
        assert_ne!(schema_hash(&attached("A")), schema_hash(&attached("B")));
    }

    #[test]
    fn hash_changes_with_scalar_type() {
        let a = Schema::builder("S").u16("x").build().unwrap();
        let b = Schema::builder("S").i16("x").build().unwrap();
        assert_ne!(schema_hash(&a), schema_hash(&b));
    }

    #[test]
    fn hash_changes_with_nested_layout() {
        let inner_a = entity_id();
        let inner_b = Schema::builder("EntityID")
            .u16("site")
            .u16("application")
            .u32("entity")
            .build_ref()
            .unwrap();
        let a = Schema::builder("Outer").composite("id", &inner_a).build().unwrap();
        let b = Schema::builder("Outer").composite("id", &inner_b).build().unwrap();
        assert_ne!(schema_hash(&a), schema_hash(&b));
    }

    #[test]
    fn hash_changes_with_count_unit() {
        let chunk = Schema::builder("Chunk")
            .array("data", ScalarType::U8, 8)
            .build_ref()
            .unwrap();
        let elements = Schema::builder("Datum")
            .count("length", ScalarType::U32, "chunks")
            .list("chunks", &chunk, "length")
            .build()
            .unwrap();
        let bits = Schema::builder("Datum")
            .bit_count("length", ScalarType::U32, "chunks", 64)
            .list("chunks", &chunk, "length")
            .build()
            .unwrap();
        assert_ne!(schema_hash(&elements), schema_hash(&bits));
    }

    #[test]
    fn hash_distinguishes_field_order() {
        let a = Schema::builder("S").u8("x").u16("y").build().unwrap();
        let b = Schema::builder("S").u16("y").u8("x").build().unwrap();
        assert_ne!(schema_hash(&a), schema_hash(&b));
    }
}

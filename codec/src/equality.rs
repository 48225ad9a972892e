//! Structural equality and hashing of records.

use std::hash::{Hash, Hasher};

use blake3::Hasher as Blake3;
use schema::Scalar;

use crate::value::{same_schema, Record, Value};

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
            || (same_schema(self.schema(), other.schema()) && self.values() == other.values())
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
        self.values().hash(state);
    }
}

impl Record {
    /// Deterministic 64-bit digest of the schema name and every value.
    ///
    /// Unlike [`Hash`], the result is the same across processes and
    /// platforms, so it can key deduplication caches shared between hosts.
    #[must_use]
    pub fn stable_hash(&self) -> u64 {
        let mut hasher = Blake3::new();
        write_record(&mut hasher, self);
        let hash = hasher.finalize();
        let mut out = [0u8; 8];
        out.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(out)
    }
}

fn write_record(hasher: &mut Blake3, record: &Record) {
    let name = record.name();
    write_len(hasher, name.len());
    hasher.update(name.as_bytes());
    for value in record.values() {
        write_value(hasher, value);
    }
}

fn write_value(hasher: &mut Blake3, value: &Value) {
    match value {
        Value::Scalar(scalar) => {
            hasher.update(&[0]);
            write_scalar(hasher, *scalar);
        }
        Value::Array(items) => {
            hasher.update(&[1]);
            write_len(hasher, items.len());
            for item in items {
                write_scalar(hasher, *item);
            }
        }
        Value::Record(record) => {
            hasher.update(&[2]);
            write_record(hasher, record);
        }
        Value::List(items) => {
            hasher.update(&[3]);
            write_len(hasher, items.len());
            for item in items {
                write_record(hasher, item);
            }
        }
        Value::Derived => {
            hasher.update(&[4]);
        }
        Value::UnusedBits(bits) => {
            hasher.update(&[5]);
            hasher.update(&bits.to_le_bytes());
        }
    }
}

fn write_scalar(hasher: &mut Blake3, value: Scalar) {
    hasher.update(value.ty().name().as_bytes());
    hasher.update(&value.to_bits().to_le_bytes());
}

fn write_len(hasher: &mut Blake3, len: usize) {
    hasher.update(&(len as u64).to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::{ScalarType, Schema, SchemaRef};
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn vector() -> SchemaRef {
        Schema::builder("Vector3Float")
            .f32("x")
            .f32("y")
            .f32("z")
            .build_ref()
            .unwrap()
    }

    fn path() -> SchemaRef {
        Schema::builder("Path")
            .count("n", ScalarType::U8, "points")
            .list("points", &vector(), "n")
            .build_ref()
            .unwrap()
    }

    fn point(x: f32) -> Record {
        Record::new(&vector()).with("x", Scalar::F32(x)).unwrap()
    }

    fn hash_of(record: &Record) -> u64 {
        let mut hasher = DefaultHasher::new();
        record.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn equal_records_hash_equal() {
        let a = point(1.5);
        let b = point(1.5);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(a.stable_hash(), b.stable_hash());
    }

    #[test]
    fn signed_zero_is_distinct() {
        assert_ne!(point(0.0), point(-0.0));
        assert_ne!(point(0.0).stable_hash(), point(-0.0).stable_hash());
    }

    #[test]
    fn nan_equals_itself() {
        let a = point(f32::NAN);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn list_order_is_significant() {
        let mut a = Record::new(&path());
        a.push("points", point(1.0)).unwrap();
        a.push("points", point(2.0)).unwrap();
        let mut b = Record::new(&path());
        b.push("points", point(2.0)).unwrap();
        b.push("points", point(1.0)).unwrap();
        assert_ne!(a, b);
        assert_ne!(a.stable_hash(), b.stable_hash());
    }

    #[test]
    fn list_length_is_significant() {
        let mut a = Record::new(&path());
        a.push("points", point(1.0)).unwrap();
        let mut b = a.clone();
        b.push("points", point(1.0)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn different_schemas_are_unequal() {
        let other = Schema::builder("Other")
            .f32("x")
            .f32("y")
            .f32("z")
            .build_ref()
            .unwrap();
        assert_ne!(Record::new(&vector()), Record::new(&other));
    }

    #[test]
    fn records_dedupe_in_hash_sets() {
        let set: HashSet<Record> = [point(1.0), point(1.0), point(2.0)].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn stable_hash_is_reproducible() {
        let mut a = Record::new(&path());
        a.push("points", point(3.25)).unwrap();
        let first = a.stable_hash();
        for _ in 0..4 {
            assert_eq!(a.clone().stable_hash(), first);
        }
    }
}

//! Schema-driven encoding, decoding and dispatch of DIS PDUs.
//!
//! This is the main codec crate. It ties together cursor, wire, and schema
//! to turn [`Record`] trees into big-endian bytes and back:
//!
//! - Encoding with derived counts, lengths, padding and constants
//! - Bounded decoding that never trusts a count for allocation
//! - Exact size computation without I/O
//! - A [`Registry`] mapping header discriminants to schemas and factories
//! - Structural equality, hashing and a stable cross-process digest
//!
//! # Design Principles
//!
//! - **Correctness first** - Every count and length on the wire is derived, never stored.
//! - **Two error kinds** - Encoding fails only with [`StructuralError`], a caller bug;
//!   decoding fails with [`DecodeError`], an input problem.
//! - **Stateless** - Each call is a single pass over its input.

mod decode;
mod encode;
mod equality;
mod error;
mod limits;
mod pdu;
mod registry;
mod size;
mod value;

pub use decode::{decode_record, decode_record_from, decode_record_with_limits};
pub use encode::{encode_record, encode_record_into};
pub use error::{
    DecodeError, DecodeResult, LimitKind, RegistryError, RegistryResult, StructuralError,
    StructuralResult,
};
pub use limits::DecodeLimits;
pub use pdu::{encode, has_pdu_header, pdu_factory, pdu_header_fields, Pdu, HEADER_FIELD_COUNT};
pub use registry::{Factory, Registry, RegistryBuilder};
pub use size::marshalled_size;
pub use value::{Record, Value};
pub use wire::Limits as WireLimits;

#[cfg(test)]
mod tests {
    use super::*;
    use schema::{Scalar, ScalarType, Schema};

    #[test]
    fn public_api_exports() {
        // Verify all expected items are exported
        let _ = DecodeLimits::default();
        let _ = WireLimits::default();
        let _ = Registry::builder().build();
        let _ = pdu_header_fields();

        // Error types
        let _: StructuralResult<()> = Ok(());
        let _: DecodeResult<()> = Ok(());
        let _: RegistryResult<()> = Ok(());
    }

    #[test]
    fn size_matches_encoding() {
        let item = Schema::builder("Item")
            .u8("kind")
            .f64("value")
            .build_ref()
            .unwrap();
        let schema = Schema::builder("Bag")
            .length("length", ScalarType::U16)
            .count("n", ScalarType::U16, "items")
            .u8("tag")
            .padding_to("align", 8)
            .list("items", &item, "n")
            .build_ref()
            .unwrap();
        let mut record = Record::new(&schema);
        for value in [1.0, 2.0, 3.0] {
            let element = Record::new(&item).with("value", Scalar::F64(value)).unwrap();
            record.push("items", element).unwrap();
        }
        let bytes = encode_record(&record).unwrap();
        assert_eq!(marshalled_size(&record), bytes.len());
        assert_eq!(bytes.len(), 8 + 3 * 9);
        assert_eq!(decode_record(&schema, &bytes).unwrap(), record);
    }
}

use codec::{
    encode, pdu_factory, pdu_header_fields, DecodeError, DecodeLimits, LimitKind, Pdu, Registry,
    WireLimits,
};
use schema::{Scalar, ScalarType, Schema, SchemaRef};
use wire::{PduHeader, PduType, WireError, HEADER_SIZE};

fn entity_id() -> SchemaRef {
    Schema::builder("EntityID")
        .u16("site")
        .u16("application")
        .u16("entity")
        .build_ref()
        .unwrap()
}

fn is_group_of_schema() -> SchemaRef {
    Schema::builder("GroupPdu")
        .fields(pdu_header_fields())
        .composite("group_entity_id", &entity_id())
        .count("number_of_members", ScalarType::U8, "members")
        .u8("pad")
        .list("members", &entity_id(), "number_of_members")
        .build_ref()
        .unwrap()
}

fn comment_schema() -> SchemaRef {
    Schema::builder("NotePdu")
        .fields(pdu_header_fields())
        .u32("note")
        .build_ref()
        .unwrap()
}

fn registry() -> Registry {
    let mut builder = Registry::builder().limits(DecodeLimits::for_testing());
    builder
        .register_schema(PduType::IsGroupOf, is_group_of_schema())
        .unwrap();
    builder
        .register_schema(PduType::Comment, comment_schema())
        .unwrap();
    builder.build()
}

fn member(entity: u16) -> codec::Record {
    codec::Record::new(&entity_id())
        .with("entity", Scalar::U16(entity))
        .unwrap()
}

fn group_pdu(members: u16) -> Pdu {
    let mut pdu = registry().create(PduType::IsGroupOf.raw()).unwrap();
    for entity in 0..members {
        pdu.push("members", member(entity)).unwrap();
    }
    pdu
}

#[test]
fn integration_count_is_derived_from_list() {
    let mut pdu = group_pdu(3);
    pdu.set_scalar("number_of_members", 250u8).unwrap();
    let bytes = encode(&pdu).unwrap();
    assert_eq!(bytes[HEADER_SIZE + 6], 3);

    let decoded = registry().dispatch_decode(&bytes).unwrap();
    assert_eq!(decoded.list("members").map(<[codec::Record]>::len), Some(3));
    assert_eq!(decoded, pdu);
}

#[test]
fn integration_header_length_is_total_size() {
    let pdu = group_pdu(2);
    let bytes = encode(&pdu).unwrap();
    assert_eq!(bytes.len(), HEADER_SIZE + 6 + 2 + 12);
    let header = PduHeader::peek(&bytes).unwrap();
    assert_eq!(usize::from(header.length), bytes.len());
    assert_eq!(pdu.header().length, header.length);
}

#[test]
fn integration_dispatch_selects_schema_by_discriminant() {
    let group_bytes = encode(&group_pdu(1)).unwrap();
    let mut note = registry().create(PduType::Comment.raw()).unwrap();
    note.set_scalar("note", 42u32).unwrap();
    let note_bytes = encode(&note).unwrap();

    let registry = registry();
    assert_eq!(
        registry.dispatch_decode(&group_bytes).unwrap().name(),
        "GroupPdu"
    );
    let decoded = registry.dispatch_decode(&note_bytes).unwrap();
    assert_eq!(decoded.name(), "NotePdu");
    assert_eq!(decoded.scalar("note"), Some(Scalar::U32(42)));
}

#[test]
fn integration_every_prefix_is_truncated() {
    let bytes = encode(&group_pdu(2)).unwrap();
    let registry = registry();
    for len in 0..bytes.len() {
        let err = registry.dispatch_decode(&bytes[..len]).unwrap_err();
        assert!(
            matches!(err, DecodeError::TruncatedInput { .. }),
            "prefix {len} gave {err:?}"
        );
    }
}

#[test]
fn integration_unregistered_type_is_unknown() {
    let mut bytes = encode(&group_pdu(0)).unwrap();
    bytes[2] = PduType::Fire.raw();
    assert_eq!(
        registry().dispatch_decode(&bytes).unwrap_err(),
        DecodeError::UnknownPduType(2)
    );
}

#[test]
fn integration_inflated_count_fails_cleanly() {
    let mut bytes = encode(&group_pdu(1)).unwrap();
    bytes[HEADER_SIZE + 6] = 200;
    let err = registry().dispatch_decode(&bytes).unwrap_err();
    assert!(matches!(err, DecodeError::TruncatedInput { .. }));
}

#[test]
fn integration_list_limit_applies_to_dispatch() {
    let mut builder = Registry::builder().limits(DecodeLimits {
        max_list_len: 1,
        ..DecodeLimits::for_testing()
    });
    builder
        .register_schema(PduType::IsGroupOf, is_group_of_schema())
        .unwrap();
    let registry = builder.build();
    let bytes = encode(&group_pdu(2)).unwrap();
    let err = registry.dispatch_decode(&bytes).unwrap_err();
    assert_eq!(
        err,
        DecodeError::LimitsExceeded {
            kind: LimitKind::ListLength,
            limit: 1,
            actual: 2,
        }
    );
}

#[test]
fn integration_datagram_of_mixed_pdus() {
    let mut datagram = encode(&group_pdu(2)).unwrap();
    let mut note = registry().create(PduType::Comment.raw()).unwrap();
    note.set_scalar("note", 7u32).unwrap();
    datagram.extend(encode(&note).unwrap());

    let pdus = registry()
        .decode_datagram(&datagram, &WireLimits::for_testing())
        .unwrap();
    let kinds: Vec<_> = pdus.iter().map(Pdu::kind).collect();
    assert_eq!(kinds, vec![Some(PduType::IsGroupOf), Some(PduType::Comment)]);
}

#[test]
fn integration_datagram_framing_errors_surface() {
    let mut datagram = encode(&group_pdu(0)).unwrap();
    datagram.extend_from_slice(&[6, 0, 22]);
    let err = registry()
        .decode_datagram(&datagram, &WireLimits::for_testing())
        .unwrap_err();
    assert!(matches!(
        err,
        DecodeError::Wire(WireError::PduTooSmall { .. })
    ));
}

#[test]
fn integration_custom_factory_header() {
    let schema = comment_schema();
    let header = PduHeader {
        exercise_id: 9,
        ..PduHeader::for_type(PduType::Comment)
    };
    let mut builder = Registry::builder();
    builder
        .register(PduType::Comment.raw(), SchemaRef::clone(&schema), pdu_factory(schema, header))
        .unwrap();
    let pdu = builder.build().create(PduType::Comment.raw()).unwrap();
    let bytes = encode(&pdu).unwrap();
    assert_eq!(bytes[1], 9);
}

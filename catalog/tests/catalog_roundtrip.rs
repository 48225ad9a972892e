use catalog::CatalogError;
use codec::{marshalled_size, DecodeError, Pdu, Record, Value};
use proptest::prelude::*;
use schema::{FieldKind, ListElement, Scalar, ScalarType, SchemaRef};
use wire::{PduType, HEADER_SIZE};

fn scalar_strategy(ty: ScalarType) -> BoxedStrategy<Scalar> {
    match ty {
        ScalarType::U8 => any::<u8>().prop_map(Scalar::U8).boxed(),
        ScalarType::U16 => any::<u16>().prop_map(Scalar::U16).boxed(),
        ScalarType::U32 => any::<u32>().prop_map(Scalar::U32).boxed(),
        ScalarType::U64 => any::<u64>().prop_map(Scalar::U64).boxed(),
        ScalarType::I8 => any::<i8>().prop_map(Scalar::I8).boxed(),
        ScalarType::I16 => any::<i16>().prop_map(Scalar::I16).boxed(),
        ScalarType::I32 => any::<i32>().prop_map(Scalar::I32).boxed(),
        ScalarType::I64 => any::<i64>().prop_map(Scalar::I64).boxed(),
        ScalarType::F32 => any::<u32>()
            .prop_map(|bits| Scalar::F32(f32::from_bits(bits)))
            .boxed(),
        ScalarType::F64 => any::<u64>()
            .prop_map(|bits| Scalar::F64(f64::from_bits(bits)))
            .boxed(),
    }
}

fn value_strategy(kind: &FieldKind) -> BoxedStrategy<Value> {
    match kind {
        FieldKind::Scalar(ty) => scalar_strategy(*ty).prop_map(Value::Scalar).boxed(),
        FieldKind::FixedArray { element, len } => {
            prop::collection::vec(scalar_strategy(*element), *len)
                .prop_map(Value::Array)
                .boxed()
        }
        FieldKind::Composite(schema) => record_strategy(schema).prop_map(Value::Record).boxed(),
        FieldKind::CountedList {
            element: ListElement::Record(schema),
            ..
        } => prop::collection::vec(record_strategy(schema), 0..3)
            .prop_map(Value::List)
            .boxed(),
        FieldKind::CountedList {
            element: ListElement::Scalar(ty),
            ..
        } => prop::collection::vec(scalar_strategy(*ty), 0..9)
            .prop_map(Value::Array)
            .boxed(),
        _ => Just(Value::Derived).boxed(),
    }
}

fn record_strategy(schema: &SchemaRef) -> BoxedStrategy<Record> {
    let fields: Vec<_> = schema
        .fields()
        .iter()
        .map(|field| value_strategy(&field.kind))
        .collect();
    let schema = SchemaRef::clone(schema);
    fields
        .prop_map(move |values| {
            let mut record = Record::new(&schema);
            for (field, value) in schema.fields().iter().zip(values) {
                if !field.kind.is_derived() {
                    record.set(&field.name, value).unwrap();
                }
            }
            record
        })
        .boxed()
}

fn registered() -> Vec<(u8, SchemaRef)> {
    catalog::registry()
        .unwrap()
        .schemas()
        .map(|(pdu_type, schema)| (pdu_type, SchemaRef::clone(schema)))
        .collect()
}

/// A random PDU of any registered type, with a header naming that type.
fn catalog_pdu() -> impl Strategy<Value = Pdu> {
    prop::sample::select(registered()).prop_flat_map(|(pdu_type, schema)| {
        record_strategy(&schema).prop_map(move |mut record| {
            record.set_scalar("protocol_version", 6u8).unwrap();
            record.set_scalar("pdu_type", pdu_type).unwrap();
            Pdu::new(record).unwrap()
        })
    })
}

#[test]
fn every_default_pdu_roundtrips() {
    let registry = catalog::registry().unwrap();
    for (pdu_type, schema) in registry.schemas() {
        let pdu = registry.create(pdu_type).unwrap();
        let bytes = catalog::encode(&pdu).unwrap();
        assert_eq!(bytes.len(), schema.min_size(), "{}", schema.name());
        assert_eq!(bytes.len(), pdu.marshalled_size());
        let decoded = catalog::decode(&bytes).unwrap();
        assert_eq!(decoded, pdu, "{}", schema.name());
        assert_eq!(decoded.schema().name(), schema.name());
    }
}

#[test]
fn every_default_pdu_rejects_prefixes() {
    let registry = catalog::registry().unwrap();
    for (pdu_type, schema) in registry.schemas() {
        let bytes = catalog::encode(&registry.create(pdu_type).unwrap()).unwrap();
        for len in [0, HEADER_SIZE - 1, HEADER_SIZE, bytes.len() - 1] {
            let err = catalog::decode(&bytes[..len]).unwrap_err();
            assert!(
                matches!(
                    err,
                    CatalogError::Decode(DecodeError::TruncatedInput { .. })
                ),
                "{} prefix of {len}: {err}",
                schema.name()
            );
        }
    }
}

#[test]
fn other_protocol_versions_are_rejected() {
    let mut bytes = catalog::encode(&catalog::create(PduType::Fire).unwrap()).unwrap();
    for version in [5, 7, 200] {
        bytes[0] = version;
        assert_eq!(
            catalog::decode(&bytes).unwrap_err(),
            CatalogError::Decode(DecodeError::UnsupportedVersion {
                version,
                pdu_type: PduType::Fire.raw(),
            })
        );
    }
}

#[test]
fn signal_keeps_partial_byte_data_length() {
    let mut pdu = catalog::create(PduType::Signal).unwrap();
    pdu.push_scalar("data", 0xABu8).unwrap();
    pdu.push_scalar("data", 0xC0u8).unwrap();
    let mut bytes = catalog::encode(&pdu).unwrap();
    assert_eq!(bytes.len(), 36);
    assert_eq!(&bytes[28..30], &[0, 16]);

    // 12 bits of samples still occupy two bytes on the wire.
    bytes[28..30].copy_from_slice(&[0, 12]);
    let decoded = catalog::decode(&bytes).unwrap();
    assert_eq!(decoded.scalar("data_length"), Some(Scalar::U16(12)));
    assert_eq!(
        decoded.array("data"),
        Some(&[Scalar::U8(0xAB), Scalar::U8(0xC0)][..])
    );
    assert_eq!(catalog::encode(&decoded).unwrap(), bytes);
}

#[test]
fn live_entity_types_are_unknown() {
    let mut bytes = vec![0u8; HEADER_SIZE];
    bytes[0] = 6;
    bytes[2] = PduType::Tspi.raw();
    bytes[3] = 11;
    bytes[9] = HEADER_SIZE as u8;
    assert_eq!(
        catalog::decode(&bytes).unwrap_err(),
        CatalogError::Decode(DecodeError::UnknownPduType(46))
    );
}

#[test]
fn entity_state_with_articulation_parameters() {
    let mut pdu = catalog::create(PduType::EntityState).unwrap();
    let schema = match pdu.schema().field("articulation_parameters").map(|f| &f.kind) {
        Some(FieldKind::CountedList {
            element: ListElement::Record(schema),
            ..
        }) => SchemaRef::clone(schema),
        other => panic!("unexpected field kind {other:?}"),
    };
    for value in [1.0, 2.0] {
        let part = Record::new(&schema)
            .with("parameter_value", Scalar::F64(value))
            .unwrap();
        pdu.push("articulation_parameters", part).unwrap();
    }
    // A stale count is ignored: the list length wins.
    pdu.set_scalar("number_of_articulation_parameters", 9u8).unwrap();

    let bytes = catalog::encode(&pdu).unwrap();
    assert_eq!(bytes.len(), 144 + 2 * 16);
    assert_eq!(bytes[HEADER_SIZE + 7], 2);
    let decoded = catalog::decode(&bytes).unwrap();
    assert_eq!(
        decoded.list("articulation_parameters").map(<[Record]>::len),
        Some(2)
    );
    assert_eq!(decoded, pdu);
}

#[test]
fn datagram_of_mixed_pdus() {
    let registry = catalog::registry().unwrap();
    let kinds = [PduType::Fire, PduType::Comment, PduType::Signal];
    let mut datagram = Vec::new();
    for kind in kinds {
        let pdu = registry.create(kind.raw()).unwrap();
        datagram.extend(catalog::encode(&pdu).unwrap());
    }
    let pdus = registry
        .decode_datagram(&datagram, &wire::Limits::default())
        .unwrap();
    let decoded: Vec<_> = pdus.iter().map(Pdu::kind).collect();
    assert_eq!(decoded, kinds.map(Some).to_vec());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn random_pdus_roundtrip(pdu in catalog_pdu()) {
        let bytes = catalog::encode(&pdu).unwrap();
        prop_assert_eq!(bytes.len(), marshalled_size(&pdu));
        prop_assert_eq!(usize::from(pdu.header().length), bytes.len());
        let decoded = catalog::decode(&bytes).unwrap();
        prop_assert_eq!(&decoded, &pdu);
        prop_assert_eq!(&catalog::encode(&decoded).unwrap(), &bytes);
        for len in 0..bytes.len() {
            let err = catalog::decode(&bytes[..len]).unwrap_err();
            prop_assert!(
                matches!(err, CatalogError::Decode(DecodeError::TruncatedInput { .. })),
                "prefix of {}: {}",
                len,
                err
            );
        }
    }

    #[test]
    fn random_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = catalog::decode(&bytes);
    }
}

//! Entity management PDUs: aggregates, groups, transfer and part-of.

use schema::{ScalarType, SchemaRef, SchemaResult};
use wire::PduType;

use crate::family::pdu;
use crate::records::Records;

pub(crate) fn schemas(r: &Records) -> SchemaResult<Vec<(PduType, SchemaRef)>> {
    Ok(vec![
        (PduType::AggregateState, aggregate_state(r)?),
        (PduType::IsGroupOf, is_group_of(r)?),
        (PduType::TransferControl, transfer_control(r)?),
        (PduType::IsPartOf, is_part_of(r)?),
    ])
}

fn aggregate_state(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::AggregateState, r)
        .composite("aggregate_id", &r.aggregate_id)
        .u8("force_id")
        .u8("aggregate_state")
        .composite("aggregate_type", &r.entity_type)
        .u32("formation")
        .composite("aggregate_marking", &r.aggregate_marking)
        .composite("dimensions", &r.vector3_float)
        .composite("orientation", &r.orientation)
        .composite("center_of_mass", &r.vector3_double)
        .composite("velocity", &r.vector3_float)
        .count("number_of_dis_aggregates", ScalarType::U16, "aggregate_id_list")
        .count("number_of_dis_entities", ScalarType::U16, "entity_id_list")
        .count(
            "number_of_silent_aggregate_types",
            ScalarType::U16,
            "silent_aggregate_system_list",
        )
        .count(
            "number_of_silent_entity_types",
            ScalarType::U16,
            "silent_entity_system_list",
        )
        .list("aggregate_id_list", &r.aggregate_id, "number_of_dis_aggregates")
        .list("entity_id_list", &r.entity_id, "number_of_dis_entities")
        // Six-byte identifiers leave the id lists on a 16-bit boundary.
        .padding_to("pad2", 4)
        .list(
            "silent_aggregate_system_list",
            &r.entity_type,
            "number_of_silent_aggregate_types",
        )
        .list(
            "silent_entity_system_list",
            &r.entity_type,
            "number_of_silent_entity_types",
        )
        .count(
            "number_of_variable_datum_records",
            ScalarType::U32,
            "variable_datum_list",
        )
        .list(
            "variable_datum_list",
            &r.variable_datum,
            "number_of_variable_datum_records",
        )
        .build_ref()
}

fn is_group_of(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::IsGroupOf, r)
        .composite("group_entity_id", &r.entity_id)
        .u8("grouped_entity_category")
        .count(
            "number_of_grouped_entities",
            ScalarType::U8,
            "grouped_entity_descriptions",
        )
        .u32("pad2")
        .f64("latitude")
        .f64("longitude")
        .list(
            "grouped_entity_descriptions",
            &r.variable_datum,
            "number_of_grouped_entities",
        )
        .build_ref()
}

fn transfer_control(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::TransferControl, r)
        .composite("originating_entity_id", &r.entity_id)
        .composite("receiving_entity_id", &r.entity_id)
        .u32("request_id")
        .u8("required_reliability_service")
        .u8("transfer_type")
        .composite("transfer_entity_id", &r.entity_id)
        .count("number_of_record_sets", ScalarType::U8, "record_sets")
        .list("record_sets", &r.record_set, "number_of_record_sets")
        .build_ref()
}

fn is_part_of(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::IsPartOf, r)
        .composite("originating_entity_id", &r.entity_id)
        .composite("receiving_entity_id", &r.entity_id)
        .composite("relationship", &r.relationship)
        .composite("part_location", &r.vector3_float)
        .composite("named_location_id", &r.named_location)
        .composite("part_entity_type", &r.entity_type)
        .build_ref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use codec::{encode_record, marshalled_size, Record};

    #[test]
    fn aggregate_state_aligns_after_id_lists() {
        let records = Records::new().unwrap();
        let schema = aggregate_state(&records).unwrap();
        let base = marshalled_size(&Record::new(&schema));
        assert_eq!(base, 136);

        let mut record = Record::new(&schema);
        record
            .push("entity_id_list", Record::new(&records.entity_id))
            .unwrap();
        // 132 + 6 bytes of ids, padded to 140, then the datum count.
        assert_eq!(encode_record(&record).unwrap().len(), 144);
    }

    #[test]
    fn fixed_layouts() {
        let records = Records::new().unwrap();
        assert_eq!(is_part_of(&records).unwrap().fixed_size(), Some(52));
        assert_eq!(is_group_of(&records).unwrap().min_size(), 40);
        assert_eq!(transfer_control(&records).unwrap().min_size(), 37);
    }
}

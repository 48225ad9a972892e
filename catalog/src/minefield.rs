//! Minefield PDUs.

use schema::{ScalarType, SchemaRef, SchemaResult};
use wire::PduType;

use crate::family::pdu;
use crate::records::Records;

pub(crate) fn schemas(r: &Records) -> SchemaResult<Vec<(PduType, SchemaRef)>> {
    Ok(vec![
        (PduType::MinefieldState, minefield_state(r)?),
        (PduType::MinefieldQuery, minefield_query(r)?),
        (PduType::MinefieldData, minefield_data(r)?),
        (PduType::MinefieldResponseNak, minefield_response_nak(r)?),
    ])
}

fn minefield_state(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::MinefieldState, r)
        .composite("minefield_id", &r.entity_id)
        .u16("minefield_sequence")
        .u8("force_id")
        .count("number_of_perimeter_points", ScalarType::U8, "perimeter_points")
        .composite("minefield_type", &r.entity_type)
        .count("number_of_mine_types", ScalarType::U16, "mine_type")
        .composite("minefield_location", &r.vector3_double)
        .composite("minefield_orientation", &r.orientation)
        .u16("appearance")
        .u16("protocol_mode")
        .list("perimeter_points", &r.point, "number_of_perimeter_points")
        .list("mine_type", &r.entity_type, "number_of_mine_types")
        .build_ref()
}

fn minefield_query(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::MinefieldQuery, r)
        .composite("minefield_id", &r.entity_id)
        .composite("requesting_entity_id", &r.entity_id)
        .u8("request_id")
        .count(
            "number_of_perimeter_points",
            ScalarType::U8,
            "requested_perimeter_points",
        )
        .u8("pad2")
        .count("number_of_sensor_types", ScalarType::U8, "sensor_types")
        .u32("data_filter")
        .composite("requested_mine_type", &r.entity_type)
        .list(
            "requested_perimeter_points",
            &r.point,
            "number_of_perimeter_points",
        )
        .scalar_list("sensor_types", ScalarType::U16, "number_of_sensor_types")
        .build_ref()
}

fn minefield_data(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::MinefieldData, r)
        .composite("minefield_id", &r.entity_id)
        .composite("requesting_entity_id", &r.entity_id)
        .u16("minefield_sequence_number")
        .u8("request_id")
        .u8("pdu_sequence_number")
        .u8("number_of_pdus")
        .count("number_of_mines_in_this_pdu", ScalarType::U8, "mine_location")
        .count("number_of_sensor_types", ScalarType::U8, "sensor_types")
        .u8("pad2")
        .u32("data_filter")
        .composite("mine_type", &r.entity_type)
        .scalar_list("sensor_types", ScalarType::U16, "number_of_sensor_types")
        .padding_to("pad3", 4)
        .list(
            "mine_location",
            &r.vector3_float,
            "number_of_mines_in_this_pdu",
        )
        .build_ref()
}

fn minefield_response_nak(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::MinefieldResponseNak, r)
        .composite("minefield_id", &r.entity_id)
        .composite("requesting_entity_id", &r.entity_id)
        .u8("request_id")
        .count(
            "number_of_missing_pdus",
            ScalarType::U8,
            "missing_pdu_sequence_numbers",
        )
        .list(
            "missing_pdu_sequence_numbers",
            &r.eight_byte_chunk,
            "number_of_missing_pdus",
        )
        .build_ref()
}

//! Warfare PDUs.

use schema::{ScalarType, SchemaRef, SchemaResult};
use wire::PduType;

use crate::family::pdu;
use crate::records::Records;

pub(crate) fn schemas(r: &Records) -> SchemaResult<Vec<(PduType, SchemaRef)>> {
    Ok(vec![
        (PduType::Fire, fire(r)?),
        (PduType::Detonation, detonation(r)?),
    ])
}

fn fire(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::Fire, r)
        .composite("munition_id", &r.entity_id)
        .composite("event_id", &r.event_id)
        .u32("fire_mission_index")
        .composite("location_in_world_coordinates", &r.vector3_double)
        .composite("burst_descriptor", &r.burst_descriptor)
        .composite("velocity", &r.vector3_float)
        .f32("range")
        .build_ref()
}

fn detonation(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::Detonation, r)
        .composite("munition_id", &r.entity_id)
        .composite("event_id", &r.event_id)
        .composite("velocity", &r.vector3_float)
        .composite("location_in_world_coordinates", &r.vector3_double)
        .composite("burst_descriptor", &r.burst_descriptor)
        .composite("location_in_entity_coordinates", &r.vector3_float)
        .u8("detonation_result")
        .count(
            "number_of_articulation_parameters",
            ScalarType::U8,
            "articulation_parameters",
        )
        .i16("pad")
        .list(
            "articulation_parameters",
            &r.articulation_parameter,
            "number_of_articulation_parameters",
        )
        .build_ref()
}

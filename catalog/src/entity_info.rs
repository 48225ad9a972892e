//! Entity information and interaction PDUs.

use schema::{ScalarType, SchemaRef, SchemaResult};
use wire::PduType;

use crate::family::pdu;
use crate::records::Records;

pub(crate) fn schemas(r: &Records) -> SchemaResult<Vec<(PduType, SchemaRef)>> {
    Ok(vec![
        (PduType::EntityState, entity_state(r)?),
        (PduType::Collision, collision(r)?),
        (PduType::CollisionElastic, collision_elastic(r)?),
        (PduType::EntityStateUpdate, entity_state_update(r)?),
    ])
}

fn entity_state(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::EntityState, r)
        .composite("entity_id", &r.entity_id)
        .u8("force_id")
        .count(
            "number_of_articulation_parameters",
            ScalarType::U8,
            "articulation_parameters",
        )
        .composite("entity_type", &r.entity_type)
        .composite("alternative_entity_type", &r.entity_type)
        .composite("entity_linear_velocity", &r.vector3_float)
        .composite("entity_location", &r.vector3_double)
        .composite("entity_orientation", &r.orientation)
        .i32("entity_appearance")
        .composite("dead_reckoning_parameters", &r.dead_reckoning_parameter)
        .composite("marking", &r.marking)
        .i32("capabilities")
        .list(
            "articulation_parameters",
            &r.articulation_parameter,
            "number_of_articulation_parameters",
        )
        .build_ref()
}

fn collision(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::Collision, r)
        .composite("issuing_entity_id", &r.entity_id)
        .composite("colliding_entity_id", &r.entity_id)
        .composite("event_id", &r.event_id)
        .u8("collision_type")
        .i8("pad")
        .composite("velocity", &r.vector3_float)
        .f32("mass")
        .composite("location", &r.vector3_float)
        .build_ref()
}

fn collision_elastic(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::CollisionElastic, r)
        .composite("issuing_entity_id", &r.entity_id)
        .composite("colliding_entity_id", &r.entity_id)
        .composite("collision_event_id", &r.event_id)
        .i16("pad")
        .composite("contact_velocity", &r.vector3_float)
        .f32("mass")
        .composite("location", &r.vector3_float)
        .f32("collision_result_xx")
        .f32("collision_result_xy")
        .f32("collision_result_xz")
        .f32("collision_result_yy")
        .f32("collision_result_yz")
        .f32("collision_result_zz")
        .composite("unit_surface_normal", &r.vector3_float)
        .f32("coefficient_of_restitution")
        .build_ref()
}

fn entity_state_update(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::EntityStateUpdate, r)
        .composite("entity_id", &r.entity_id)
        .i8("padding1")
        .count(
            "number_of_articulation_parameters",
            ScalarType::U8,
            "articulation_parameters",
        )
        .composite("entity_linear_velocity", &r.vector3_float)
        .composite("entity_location", &r.vector3_double)
        .composite("entity_orientation", &r.orientation)
        .i32("entity_appearance")
        .list(
            "articulation_parameters",
            &r.articulation_parameter,
            "number_of_articulation_parameters",
        )
        .build_ref()
}

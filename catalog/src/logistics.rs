//! Logistics PDUs: service requests, resupply and repair.

use schema::{ScalarType, SchemaBuilder, SchemaRef, SchemaResult};
use wire::PduType;

use crate::family::pdu;
use crate::records::Records;

pub(crate) fn schemas(r: &Records) -> SchemaResult<Vec<(PduType, SchemaRef)>> {
    Ok(vec![
        (PduType::ServiceRequest, service_request(r)?),
        (PduType::ResupplyOffer, resupply(PduType::ResupplyOffer, r)?),
        (
            PduType::ResupplyReceived,
            resupply(PduType::ResupplyReceived, r)?,
        ),
        (PduType::ResupplyCancel, resupply_cancel(r)?),
        (PduType::RepairComplete, repair_complete(r)?),
        (PduType::RepairResponse, repair_response(r)?),
    ])
}

fn supplies(builder: SchemaBuilder, r: &Records) -> SchemaBuilder {
    builder.list("supplies", &r.supply_quantity, "number_of_supply_types")
}

fn service_request(r: &Records) -> SchemaResult<SchemaRef> {
    let builder = pdu(PduType::ServiceRequest, r)
        .composite("requesting_entity_id", &r.entity_id)
        .composite("servicing_entity_id", &r.entity_id)
        .u8("service_type_requested")
        .count("number_of_supply_types", ScalarType::U8, "supplies")
        .i16("service_request_padding");
    supplies(builder, r).build_ref()
}

/// Offer and receipt share one layout.
fn resupply(pdu_type: PduType, r: &Records) -> SchemaResult<SchemaRef> {
    let builder = pdu(pdu_type, r)
        .composite("receiving_entity_id", &r.entity_id)
        .composite("supplying_entity_id", &r.entity_id)
        .count("number_of_supply_types", ScalarType::U8, "supplies")
        .i16("padding1")
        .i8("padding2");
    supplies(builder, r).build_ref()
}

fn resupply_cancel(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::ResupplyCancel, r)
        .composite("receiving_entity_id", &r.entity_id)
        .composite("supplying_entity_id", &r.entity_id)
        .build_ref()
}

fn repair_complete(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::RepairComplete, r)
        .composite("receiving_entity_id", &r.entity_id)
        .composite("repairing_entity_id", &r.entity_id)
        .u16("repair")
        .i16("padding2")
        .build_ref()
}

fn repair_response(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::RepairResponse, r)
        .composite("receiving_entity_id", &r.entity_id)
        .composite("repairing_entity_id", &r.entity_id)
        .u8("repair_result")
        .i16("padding1")
        .i8("padding2")
        .build_ref()
}

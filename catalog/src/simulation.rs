//! Simulation management PDUs.

use schema::{SchemaRef, SchemaResult};
use wire::PduType;

use crate::family::{datums, pdu};
use crate::records::Records;

pub(crate) fn schemas(r: &Records) -> SchemaResult<Vec<(PduType, SchemaRef)>> {
    Ok(vec![
        (PduType::CreateEntity, request(PduType::CreateEntity, r)?),
        (PduType::RemoveEntity, request(PduType::RemoveEntity, r)?),
        (PduType::StartResume, start_resume(r)?),
        (PduType::StopFreeze, stop_freeze(r)?),
        (PduType::Acknowledge, acknowledge(PduType::Acknowledge, r)?),
        (PduType::ActionRequest, action_request(r)?),
        (PduType::ActionResponse, action_response(r)?),
        (PduType::DataQuery, data_query(r)?),
        (PduType::SetData, padded_datums(PduType::SetData, "request_id", r)?),
        (PduType::Data, padded_datums(PduType::Data, "request_id", r)?),
        (
            PduType::EventReport,
            padded_datums(PduType::EventReport, "event_type", r)?,
        ),
        (PduType::Comment, comment(PduType::Comment, r)?),
    ])
}

/// Create and remove carry only a request id.
fn request(pdu_type: PduType, r: &Records) -> SchemaResult<SchemaRef> {
    pdu(pdu_type, r).u32("request_id").build_ref()
}

fn start_resume(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::StartResume, r)
        .composite("real_world_time", &r.clock_time)
        .composite("simulation_time", &r.clock_time)
        .u32("request_id")
        .build_ref()
}

fn stop_freeze(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::StopFreeze, r)
        .composite("real_world_time", &r.clock_time)
        .u8("reason")
        .u8("frozen_behavior")
        .i16("padding1")
        .u32("request_id")
        .build_ref()
}

pub(crate) fn acknowledge(pdu_type: PduType, r: &Records) -> SchemaResult<SchemaRef> {
    pdu(pdu_type, r)
        .u16("acknowledge_flag")
        .u16("response_flag")
        .u32("request_id")
        .build_ref()
}

fn action_request(r: &Records) -> SchemaResult<SchemaRef> {
    let builder = pdu(PduType::ActionRequest, r)
        .u32("request_id")
        .u32("action_id");
    datums(builder, r).build_ref()
}

fn action_response(r: &Records) -> SchemaResult<SchemaRef> {
    let builder = pdu(PduType::ActionResponse, r)
        .u32("request_id")
        .u32("request_status");
    datums(builder, r).build_ref()
}

fn data_query(r: &Records) -> SchemaResult<SchemaRef> {
    let builder = pdu(PduType::DataQuery, r)
        .u32("request_id")
        .u32("time_interval");
    datums(builder, r).build_ref()
}

/// Set data, data and event report: one 32-bit field, 32 bits of padding,
/// then the datum lists.
fn padded_datums(pdu_type: PduType, lead: &str, r: &Records) -> SchemaResult<SchemaRef> {
    let builder = pdu(pdu_type, r).u32(lead).u32("padding1");
    datums(builder, r).build_ref()
}

pub(crate) fn comment(pdu_type: PduType, r: &Records) -> SchemaResult<SchemaRef> {
    datums(pdu(pdu_type, r), r).build_ref()
}

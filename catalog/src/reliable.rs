//! Simulation management PDUs with reliability service.

use schema::{ScalarType, SchemaBuilder, SchemaRef, SchemaResult};
use wire::PduType;

use crate::family::{datums, pdu};
use crate::records::Records;
use crate::simulation::{acknowledge, comment};

pub(crate) fn schemas(r: &Records) -> SchemaResult<Vec<(PduType, SchemaRef)>> {
    Ok(vec![
        (PduType::CreateEntityR, request(PduType::CreateEntityR, r)?),
        (PduType::RemoveEntityR, request(PduType::RemoveEntityR, r)?),
        (PduType::StartResumeR, start_resume(r)?),
        (PduType::StopFreezeR, stop_freeze(r)?),
        (PduType::AcknowledgeR, acknowledge(PduType::AcknowledgeR, r)?),
        (PduType::ActionRequestR, action_request(r)?),
        (PduType::ActionResponseR, action_response(r)?),
        (PduType::DataQueryR, data_query(r)?),
        (PduType::SetDataR, set_data(r)?),
        (PduType::DataR, data(r)?),
        (PduType::EventReportR, event_report(r)?),
        (PduType::CommentR, comment(PduType::CommentR, r)?),
        (PduType::RecordR, record(r)?),
        (PduType::SetRecordR, set_record(r)?),
        (PduType::RecordQueryR, record_query(r)?),
    ])
}

/// Required reliability service byte padded out to 32 bits.
fn reliability(builder: SchemaBuilder) -> SchemaBuilder {
    builder
        .u8("required_reliability_service")
        .u16("pad1")
        .u8("pad2")
}

fn request(pdu_type: PduType, r: &Records) -> SchemaResult<SchemaRef> {
    reliability(pdu(pdu_type, r)).u32("request_id").build_ref()
}

fn start_resume(r: &Records) -> SchemaResult<SchemaRef> {
    let builder = pdu(PduType::StartResumeR, r)
        .composite("real_world_time", &r.clock_time)
        .composite("simulation_time", &r.clock_time);
    reliability(builder).u32("request_id").build_ref()
}

fn stop_freeze(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::StopFreezeR, r)
        .composite("real_world_time", &r.clock_time)
        .u8("reason")
        .u8("frozen_behavior")
        .u8("required_reliability_service")
        .u8("pad1")
        .u32("request_id")
        .build_ref()
}

fn action_request(r: &Records) -> SchemaResult<SchemaRef> {
    let builder = reliability(pdu(PduType::ActionRequestR, r))
        .u32("request_id")
        .u32("action_id");
    datums(builder, r).build_ref()
}

fn action_response(r: &Records) -> SchemaResult<SchemaRef> {
    let builder = pdu(PduType::ActionResponseR, r)
        .u32("request_id")
        .u32("response_status");
    datums(builder, r).build_ref()
}

fn data_query(r: &Records) -> SchemaResult<SchemaRef> {
    let builder = reliability(pdu(PduType::DataQueryR, r))
        .u32("request_id")
        .u32("time_interval");
    datums(builder, r).build_ref()
}

fn set_data(r: &Records) -> SchemaResult<SchemaRef> {
    let builder = reliability(pdu(PduType::SetDataR, r)).u32("request_id");
    datums(builder, r).build_ref()
}

fn data(r: &Records) -> SchemaResult<SchemaRef> {
    let builder = reliability(pdu(PduType::DataR, r).u32("request_id"));
    datums(builder, r).build_ref()
}

fn event_report(r: &Records) -> SchemaResult<SchemaRef> {
    let builder = pdu(PduType::EventReportR, r)
        .u16("event_type")
        .u32("pad1");
    datums(builder, r).build_ref()
}

fn record(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::RecordR, r)
        .u32("request_id")
        .u8("required_reliability_service")
        .u8("pad1")
        .u16("event_type")
        .u32("response_serial_number")
        .count("number_of_record_sets", ScalarType::U32, "record_sets")
        .list("record_sets", &r.record_set, "number_of_record_sets")
        .build_ref()
}

fn set_record(r: &Records) -> SchemaResult<SchemaRef> {
    reliability(pdu(PduType::SetRecordR, r).u32("request_id"))
        .count("number_of_record_sets", ScalarType::U32, "record_sets")
        .list("record_sets", &r.record_set, "number_of_record_sets")
        .build_ref()
}

fn record_query(r: &Records) -> SchemaResult<SchemaRef> {
    reliability(pdu(PduType::RecordQueryR, r).u32("request_id"))
        .u16("event_type")
        .u32("time")
        .count("number_of_records", ScalarType::U32, "record_ids")
        .scalar_list("record_ids", ScalarType::U32, "number_of_records")
        .build_ref()
}

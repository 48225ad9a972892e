//! Radio communications PDUs.

use schema::{ScalarType, SchemaRef, SchemaResult};
use wire::PduType;

use crate::family::pdu;
use crate::records::Records;

pub(crate) fn schemas(r: &Records) -> SchemaResult<Vec<(PduType, SchemaRef)>> {
    Ok(vec![
        (PduType::Transmitter, transmitter(r)?),
        (PduType::Signal, signal(r)?),
        (PduType::Receiver, receiver(r)?),
        (PduType::IntercomSignal, intercom_signal(r)?),
        (PduType::IntercomControl, intercom_control(r)?),
    ])
}

fn transmitter(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::Transmitter, r)
        .composite("radio_entity_type", &r.radio_entity_type)
        .u8("transmit_state")
        .u8("input_source")
        .u16("padding1")
        .composite("antenna_location", &r.vector3_double)
        .composite("relative_antenna_location", &r.vector3_float)
        .u16("antenna_pattern_type")
        .count("antenna_pattern_count", ScalarType::U16, "antenna_patterns")
        .u64("frequency")
        .f32("transmit_frequency_bandwidth")
        .f32("power")
        .composite("modulation_type", &r.modulation_type)
        .u16("crypto_system")
        .u16("crypto_key_id")
        .count(
            "modulation_parameter_count",
            ScalarType::U8,
            "modulation_parameters",
        )
        .u16("padding2")
        .u8("padding3")
        .list(
            "modulation_parameters",
            &r.vector3_float,
            "modulation_parameter_count",
        )
        .list("antenna_patterns", &r.vector3_float, "antenna_pattern_count")
        .build_ref()
}

/// The data length is in bits. Samples are whole bytes, and the PDU is
/// padded to a 32-bit boundary after them.
fn signal(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::Signal, r)
        .u16("encoding_scheme")
        .u16("tdl_type")
        .u32("sample_rate")
        .bit_count("data_length", ScalarType::U16, "data", 8)
        .u16("samples")
        .scalar_list("data", ScalarType::U8, "data_length")
        .padding_to("data_padding", 4)
        .build_ref()
}

fn receiver(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::Receiver, r)
        .u16("receiver_state")
        .u16("padding1")
        .f32("received_power")
        .composite("transmitter_entity_id", &r.entity_id)
        .u16("transmitter_radio_id")
        .build_ref()
}

fn intercom_signal(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::IntercomSignal, r)
        .composite("entity_id", &r.entity_id)
        .u16("communications_device_id")
        .u16("encoding_scheme")
        .u16("tdl_type")
        .u32("sample_rate")
        .count("data_length", ScalarType::U16, "data")
        .u16("samples")
        .scalar_list("data", ScalarType::U8, "data_length")
        .padding_to("data_padding", 4)
        .build_ref()
}

fn intercom_control(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::IntercomControl, r)
        .u8("control_type")
        .u8("communications_channel_type")
        .composite("source_entity_id", &r.entity_id)
        .u8("source_communications_device_id")
        .u8("source_line_id")
        .u8("transmit_priority")
        .u8("transmit_line_state")
        .u8("command")
        .composite("master_entity_id", &r.entity_id)
        .u16("master_communications_device_id")
        .count(
            "intercom_parameters_length",
            ScalarType::U32,
            "intercom_parameters",
        )
        .list(
            "intercom_parameters",
            &r.intercom_communications_parameters,
            "intercom_parameters_length",
        )
        .build_ref()
}

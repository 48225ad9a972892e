//! Header and family prefix shared by the PDUs of one protocol family.

use codec::pdu_header_fields;
use schema::{ScalarType, Schema, SchemaBuilder};
use wire::{ProtocolFamily, PduType};

use crate::records::Records;

/// Starts the schema for `pdu_type`: the common header followed by the
/// fields its family places before the PDU body.
pub(crate) fn pdu(pdu_type: PduType, records: &Records) -> SchemaBuilder {
    let builder = Schema::builder(format!("{}Pdu", pdu_type.name())).fields(pdu_header_fields());
    match pdu_type.family() {
        ProtocolFamily::Warfare => builder
            .composite("firing_entity_id", &records.entity_id)
            .composite("target_entity_id", &records.entity_id),
        ProtocolFamily::SimulationManagement
        | ProtocolFamily::SimulationManagementWithReliability => builder
            .composite("originating_entity_id", &records.entity_id)
            .composite("receiving_entity_id", &records.entity_id),
        // Intercom PDUs share the family but carry no radio prefix.
        ProtocolFamily::RadioCommunications
            if matches!(
                pdu_type,
                PduType::Transmitter | PduType::Signal | PduType::Receiver
            ) =>
        {
            builder
                .composite("entity_id", &records.entity_id)
                .scalar("radio_id", ScalarType::U16)
        }
        _ => builder,
    }
}

/// Appends the fixed and variable datum counts and their lists.
pub(crate) fn datums(builder: SchemaBuilder, records: &Records) -> SchemaBuilder {
    builder
        .count("number_of_fixed_datum_records", ScalarType::U32, "fixed_datums")
        .count(
            "number_of_variable_datum_records",
            ScalarType::U32,
            "variable_datums",
        )
        .list(
            "fixed_datums",
            &records.fixed_datum,
            "number_of_fixed_datum_records",
        )
        .list(
            "variable_datums",
            &records.variable_datum,
            "number_of_variable_datum_records",
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wire::HEADER_SIZE;

    #[test]
    fn prefix_sizes() {
        let records = Records::new().unwrap();
        for (pdu_type, size) in [
            (PduType::Fire, HEADER_SIZE + 12),
            (PduType::Comment, HEADER_SIZE + 12),
            (PduType::CommentR, HEADER_SIZE + 12),
            (PduType::Signal, HEADER_SIZE + 8),
            (PduType::IntercomSignal, HEADER_SIZE),
            (PduType::EntityState, HEADER_SIZE),
        ] {
            let schema = pdu(pdu_type, &records).build().unwrap();
            assert_eq!(schema.fixed_size(), Some(size), "{pdu_type}");
        }
    }

    #[test]
    fn schema_name_follows_type() {
        let records = Records::new().unwrap();
        let schema = pdu(PduType::Detonation, &records).build().unwrap();
        assert_eq!(schema.name(), "DetonationPdu");
    }
}

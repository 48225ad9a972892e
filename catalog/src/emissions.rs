//! Distributed emission regeneration PDUs.

use schema::{ScalarType, SchemaRef, SchemaResult};
use wire::PduType;

use crate::family::pdu;
use crate::records::Records;

pub(crate) fn schemas(r: &Records) -> SchemaResult<Vec<(PduType, SchemaRef)>> {
    Ok(vec![
        (PduType::ElectromagneticEmission, electromagnetic_emission(r)?),
        (PduType::Designator, designator(r)?),
        (PduType::IffAtcNavaids, iff_layer1(r)?),
        (PduType::UnderwaterAcoustic, underwater_acoustic(r)?),
        (PduType::SupplementalEmissionEntityState, sees(r)?),
    ])
}

fn electromagnetic_emission(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::ElectromagneticEmission, r)
        .composite("emitting_entity_id", &r.entity_id)
        .composite("event_id", &r.event_id)
        .u8("state_update_indicator")
        .count("number_of_systems", ScalarType::U8, "systems")
        .u16("padding_for_emissions_pdu")
        .list(
            "systems",
            &r.electronic_emission_system_data,
            "number_of_systems",
        )
        .build_ref()
}

fn designator(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::Designator, r)
        .composite("designating_entity_id", &r.entity_id)
        .u16("code_name")
        .composite("designated_entity_id", &r.entity_id)
        .u16("designator_code")
        .f32("designator_power")
        .f32("designator_wavelength")
        .composite("designator_spot_wrt_designated", &r.vector3_float)
        .composite("designator_spot_location", &r.vector3_double)
        .i8("dead_reckoning_algorithm")
        .u16("padding1")
        .i8("padding2")
        .composite("entity_linear_acceleration", &r.vector3_float)
        .build_ref()
}

/// Layer 1 only. Higher layers follow it in the same datagram slot and are
/// not described here.
fn iff_layer1(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::IffAtcNavaids, r)
        .composite("emitting_entity_id", &r.entity_id)
        .composite("event_id", &r.event_id)
        .composite("location", &r.vector3_float)
        .composite("system_id", &r.system_id)
        .u16("pad2")
        .composite("fundamental_parameters", &r.iff_fundamental_data)
        .build_ref()
}

fn underwater_acoustic(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::UnderwaterAcoustic, r)
        .composite("emitting_entity_id", &r.entity_id)
        .composite("event_id", &r.event_id)
        .i8("state_change_indicator")
        .i8("pad")
        .u16("passive_parameter_index")
        .u8("propulsion_plant_configuration")
        .count("number_of_shafts", ScalarType::U8, "shaft_rpms")
        .count("number_of_apas", ScalarType::U8, "apa_data")
        .count("number_of_ua_emitter_systems", ScalarType::U8, "emitter_systems")
        .list("shaft_rpms", &r.shaft_rpms, "number_of_shafts")
        .list("apa_data", &r.apa_data, "number_of_apas")
        .list(
            "emitter_systems",
            &r.acoustic_emitter_system_data,
            "number_of_ua_emitter_systems",
        )
        .build_ref()
}

fn sees(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::SupplementalEmissionEntityState, r)
        .composite("originating_entity_id", &r.entity_id)
        .u16("infrared_signature_representation_index")
        .u16("acoustic_signature_representation_index")
        .u16("radar_cross_section_signature_representation_index")
        .count(
            "number_of_propulsion_systems",
            ScalarType::U16,
            "propulsion_system_data",
        )
        .count(
            "number_of_vectoring_nozzle_systems",
            ScalarType::U16,
            "vectoring_system_data",
        )
        .list(
            "propulsion_system_data",
            &r.propulsion_system_data,
            "number_of_propulsion_systems",
        )
        .list(
            "vectoring_system_data",
            &r.vectoring_nozzle_system_data,
            "number_of_vectoring_nozzle_systems",
        )
        .build_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_layouts() {
        let records = Records::new().unwrap();
        assert_eq!(designator(&records).unwrap().fixed_size(), Some(88));
        assert_eq!(iff_layer1(&records).unwrap().fixed_size(), Some(60));
    }

    #[test]
    fn nested_lists_are_variable() {
        let records = Records::new().unwrap();
        assert_eq!(electromagnetic_emission(&records).unwrap().min_size(), 28);
        assert_eq!(underwater_acoustic(&records).unwrap().min_size(), 32);
        assert_eq!(sees(&records).unwrap().min_size(), 28);
    }
}

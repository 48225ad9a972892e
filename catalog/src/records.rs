//! Sub-records shared between PDU schemas.
//!
//! Each schema is built once and shared by `Arc`, so two PDUs embedding an
//! `EntityID` point at the same schema and compare cheaply.

use schema::{ScalarType, Schema, SchemaRef, SchemaResult};

/// Every shared sub-record schema in the catalog.
#[derive(Debug, Clone)]
pub struct Records {
    pub entity_id: SchemaRef,
    pub event_id: SchemaRef,
    pub entity_type: SchemaRef,
    pub simulation_address: SchemaRef,
    pub vector3_float: SchemaRef,
    pub vector3_double: SchemaRef,
    pub orientation: SchemaRef,
    pub clock_time: SchemaRef,
    pub articulation_parameter: SchemaRef,
    pub dead_reckoning_parameter: SchemaRef,
    pub marking: SchemaRef,
    pub burst_descriptor: SchemaRef,
    pub fixed_datum: SchemaRef,
    pub eight_byte_chunk: SchemaRef,
    pub six_byte_chunk: SchemaRef,
    pub variable_datum: SchemaRef,
    pub supply_quantity: SchemaRef,
    pub point: SchemaRef,
    pub relationship: SchemaRef,
    pub named_location: SchemaRef,
    pub object_type: SchemaRef,
    pub aggregate_id: SchemaRef,
    pub aggregate_marking: SchemaRef,
    pub emitter_system: SchemaRef,
    pub fundamental_parameter_data: SchemaRef,
    pub track_jam_target: SchemaRef,
    pub electronic_emission_beam_data: SchemaRef,
    pub electronic_emission_system_data: SchemaRef,
    pub system_id: SchemaRef,
    pub iff_fundamental_data: SchemaRef,
    pub shaft_rpms: SchemaRef,
    pub apa_data: SchemaRef,
    pub acoustic_emitter_system: SchemaRef,
    pub acoustic_beam_fundamental_parameter: SchemaRef,
    pub acoustic_beam_data: SchemaRef,
    pub acoustic_emitter_system_data: SchemaRef,
    pub propulsion_system_data: SchemaRef,
    pub vectoring_nozzle_system_data: SchemaRef,
    pub radio_entity_type: SchemaRef,
    pub modulation_type: SchemaRef,
    pub intercom_communications_parameters: SchemaRef,
    pub record_set: SchemaRef,
    pub environment: SchemaRef,
    pub grid_axis_record: SchemaRef,
    pub linear_segment_parameter: SchemaRef,
}

impl Records {
    /// Builds every shared sub-record schema.
    pub fn new() -> SchemaResult<Self> {
        let entity_id = Schema::builder("EntityID")
            .u16("site")
            .u16("application")
            .u16("entity")
            .build_ref()?;
        let event_id = Schema::builder("EventID")
            .u16("site")
            .u16("application")
            .u16("event_number")
            .build_ref()?;
        let entity_type = Schema::builder("EntityType")
            .u8("entity_kind")
            .u8("domain")
            .u16("country")
            .u8("category")
            .u8("subcategory")
            .u8("specific")
            .u8("extra")
            .build_ref()?;
        let simulation_address = Schema::builder("SimulationAddress")
            .u16("site")
            .u16("application")
            .build_ref()?;
        let vector3_float = Schema::builder("Vector3Float")
            .f32("x")
            .f32("y")
            .f32("z")
            .build_ref()?;
        let vector3_double = Schema::builder("Vector3Double")
            .f64("x")
            .f64("y")
            .f64("z")
            .build_ref()?;
        let orientation = Schema::builder("Orientation")
            .f32("psi")
            .f32("theta")
            .f32("phi")
            .build_ref()?;
        let clock_time = Schema::builder("ClockTime")
            .i32("hour")
            .u32("time_past_hour")
            .build_ref()?;
        let articulation_parameter = Schema::builder("ArticulationParameter")
            .u8("parameter_type_designator")
            .u8("change_indicator")
            .u16("part_attached_to")
            .i32("parameter_type")
            .f64("parameter_value")
            .build_ref()?;
        let dead_reckoning_parameter = Schema::builder("DeadReckoningParameter")
            .u8("dead_reckoning_algorithm")
            .array("other_parameters", ScalarType::U8, 15)
            .composite("entity_linear_acceleration", &vector3_float)
            .composite("entity_angular_velocity", &vector3_float)
            .build_ref()?;
        let marking = Schema::builder("Marking")
            .u8("character_set")
            .array("characters", ScalarType::I8, 11)
            .build_ref()?;
        let burst_descriptor = Schema::builder("BurstDescriptor")
            .composite("munition", &entity_type)
            .u16("warhead")
            .u16("fuse")
            .u16("quantity")
            .u16("rate")
            .build_ref()?;
        let fixed_datum = Schema::builder("FixedDatum")
            .u32("fixed_datum_id")
            .u32("fixed_datum_value")
            .build_ref()?;
        let eight_byte_chunk = Schema::builder("EightByteChunk")
            .array("other_parameters", ScalarType::I8, 8)
            .build_ref()?;
        let six_byte_chunk = Schema::builder("SixByteChunk")
            .array("other_parameters", ScalarType::I8, 6)
            .build_ref()?;
        // The datum length counts bits; the payload is whole 64-bit chunks.
        let variable_datum = Schema::builder("VariableDatum")
            .u32("variable_datum_id")
            .bit_count("variable_datum_length", ScalarType::U32, "variable_data", 64)
            .list("variable_data", &eight_byte_chunk, "variable_datum_length")
            .build_ref()?;
        let supply_quantity = Schema::builder("SupplyQuantity")
            .composite("supply_type", &entity_type)
            .f32("quantity")
            .build_ref()?;
        let point = Schema::builder("Point").f32("x").f32("y").build_ref()?;
        let relationship = Schema::builder("Relationship")
            .u16("nature")
            .u16("position")
            .build_ref()?;
        let named_location = Schema::builder("NamedLocation")
            .u16("station_name")
            .u16("station_number")
            .build_ref()?;
        let object_type = Schema::builder("ObjectType")
            .u8("domain")
            .u8("object_kind")
            .u8("category")
            .u8("subcategory")
            .build_ref()?;
        let aggregate_id = Schema::builder("AggregateID")
            .u16("site")
            .u16("application")
            .u16("aggregate_id")
            .build_ref()?;
        let aggregate_marking = Schema::builder("AggregateMarking")
            .u8("character_set")
            .array("characters", ScalarType::U8, 31)
            .build_ref()?;

        let emitter_system = Schema::builder("EmitterSystem")
            .u16("emitter_name")
            .u8("function")
            .u8("emitter_id_number")
            .build_ref()?;
        let fundamental_parameter_data = Schema::builder("FundamentalParameterData")
            .f32("frequency")
            .f32("frequency_range")
            .f32("effective_radiated_power")
            .f32("pulse_repetition_frequency")
            .f32("pulse_width")
            .f32("beam_azimuth_center")
            .f32("beam_azimuth_sweep")
            .f32("beam_elevation_center")
            .f32("beam_elevation_sweep")
            .f32("beam_sweep_sync")
            .build_ref()?;
        let track_jam_target = Schema::builder("TrackJamTarget")
            .composite("track_jam", &entity_id)
            .u8("emitter_id")
            .u8("beam_id")
            .build_ref()?;
        let electronic_emission_beam_data = Schema::builder("ElectronicEmissionBeamData")
            .u8("beam_data_length")
            .u8("beam_id_number")
            .u16("beam_parameter_index")
            .composite("fundamental_parameter_data", &fundamental_parameter_data)
            .u8("beam_function")
            .count("number_of_track_jam_targets", ScalarType::U8, "track_jam_targets")
            .u8("high_density_track_jam")
            .u8("pad4")
            .u32("jamming_mode_sequence")
            .list("track_jam_targets", &track_jam_target, "number_of_track_jam_targets")
            .build_ref()?;
        let electronic_emission_system_data = Schema::builder("ElectronicEmissionSystemData")
            .u8("system_data_length")
            .count("number_of_beams", ScalarType::U8, "beam_data_records")
            .u16("emissions_padding2")
            .composite("emitter_system", &emitter_system)
            .composite("location", &vector3_float)
            .list(
                "beam_data_records",
                &electronic_emission_beam_data,
                "number_of_beams",
            )
            .build_ref()?;
        let system_id = Schema::builder("SystemID")
            .u16("system_type")
            .u16("system_name")
            .u8("system_mode")
            .u8("change_options")
            .build_ref()?;
        let iff_fundamental_data = Schema::builder("IffFundamentalData")
            .u8("system_status")
            .u8("alternate_parameter4")
            .u8("information_layers")
            .u8("modifier")
            .u16("parameter1")
            .u16("parameter2")
            .u16("parameter3")
            .u16("parameter4")
            .u16("parameter5")
            .u16("parameter6")
            .build_ref()?;

        let shaft_rpms = Schema::builder("ShaftRPMs")
            .i16("current_shaft_rpms")
            .i16("ordered_shaft_rpms")
            .f32("shaft_rpm_rate_of_change")
            .build_ref()?;
        let apa_data = Schema::builder("ApaData")
            .u16("parameter_index")
            .i16("parameter_value")
            .build_ref()?;
        let acoustic_emitter_system = Schema::builder("AcousticEmitterSystem")
            .u16("acoustic_name")
            .u8("acoustic_function")
            .u8("acoustic_id")
            .build_ref()?;
        let acoustic_beam_fundamental_parameter =
            Schema::builder("AcousticBeamFundamentalParameter")
                .u16("active_emission_parameter_index")
                .u16("scan_pattern")
                .f32("beam_center_azimuth")
                .f32("azimuthal_beamwidth")
                .f32("beam_center_de")
                .f32("de_beamwidth")
                .build_ref()?;
        let acoustic_beam_data = Schema::builder("AcousticBeamData")
            .u16("beam_data_length")
            .u8("beam_id_number")
            .u16("pad2")
            .composite(
                "fundamental_data_parameters",
                &acoustic_beam_fundamental_parameter,
            )
            .build_ref()?;
        let acoustic_emitter_system_data = Schema::builder("AcousticEmitterSystemData")
            .u8("emitter_system_data_length")
            .count("number_of_beams", ScalarType::U8, "beam_records")
            .u16("pad2")
            .composite("acoustic_emitter_system", &acoustic_emitter_system)
            .composite("emitter_location", &vector3_float)
            .list("beam_records", &acoustic_beam_data, "number_of_beams")
            .build_ref()?;
        let propulsion_system_data = Schema::builder("PropulsionSystemData")
            .f32("power_setting")
            .f32("engine_rpm")
            .build_ref()?;
        let vectoring_nozzle_system_data = Schema::builder("VectoringNozzleSystemData")
            .f32("horizontal_deflection_angle")
            .f32("vertical_deflection_angle")
            .build_ref()?;

        let radio_entity_type = Schema::builder("RadioEntityType")
            .u8("entity_kind")
            .u8("domain")
            .u16("country")
            .u8("category")
            .u8("nomenclature_version")
            .u16("nomenclature")
            .build_ref()?;
        let modulation_type = Schema::builder("ModulationType")
            .u16("spread_spectrum")
            .u16("major")
            .u16("detail")
            .u16("system")
            .build_ref()?;
        let intercom_communications_parameters =
            Schema::builder("IntercomCommunicationsParameters")
                .u16("record_type")
                .u16("record_length")
                .u32("record_specific_field")
                .build_ref()?;

        let record_set = Schema::builder("RecordSet")
            .u32("record_id")
            .u32("record_set_serial_number")
            .u16("record_length")
            .u16("record_count")
            .u16("record_values")
            .u8("pad4")
            .build_ref()?;

        let environment = Schema::builder("Environment")
            .u32("environment_type")
            .u8("length")
            .u8("index")
            .u8("padding1")
            .u8("geometry")
            .u8("padding2")
            .build_ref()?;
        let grid_axis_record = Schema::builder("GridAxisRecord")
            .u16("sample_type")
            .u16("data_representation")
            .build_ref()?;
        let linear_segment_parameter = Schema::builder("LinearSegmentParameter")
            .u8("segment_number")
            .composite("segment_appearance", &six_byte_chunk)
            .composite("location", &vector3_double)
            .composite("orientation", &orientation)
            .u16("segment_length")
            .u16("segment_width")
            .u16("segment_height")
            .u16("segment_depth")
            .u32("pad1")
            .build_ref()?;

        Ok(Self {
            entity_id,
            event_id,
            entity_type,
            simulation_address,
            vector3_float,
            vector3_double,
            orientation,
            clock_time,
            articulation_parameter,
            dead_reckoning_parameter,
            marking,
            burst_descriptor,
            fixed_datum,
            eight_byte_chunk,
            six_byte_chunk,
            variable_datum,
            supply_quantity,
            point,
            relationship,
            named_location,
            object_type,
            aggregate_id,
            aggregate_marking,
            emitter_system,
            fundamental_parameter_data,
            track_jam_target,
            electronic_emission_beam_data,
            electronic_emission_system_data,
            system_id,
            iff_fundamental_data,
            shaft_rpms,
            apa_data,
            acoustic_emitter_system,
            acoustic_beam_fundamental_parameter,
            acoustic_beam_data,
            acoustic_emitter_system_data,
            propulsion_system_data,
            vectoring_nozzle_system_data,
            radio_entity_type,
            modulation_type,
            intercom_communications_parameters,
            record_set,
            environment,
            grid_axis_record,
            linear_segment_parameter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_sizes_match_the_standard() {
        let records = Records::new().unwrap();
        for (schema, size) in [
            (&records.entity_id, 6),
            (&records.event_id, 6),
            (&records.entity_type, 8),
            (&records.vector3_float, 12),
            (&records.vector3_double, 24),
            (&records.orientation, 12),
            (&records.clock_time, 8),
            (&records.articulation_parameter, 16),
            (&records.dead_reckoning_parameter, 40),
            (&records.marking, 12),
            (&records.burst_descriptor, 16),
            (&records.supply_quantity, 12),
            (&records.fundamental_parameter_data, 40),
            (&records.aggregate_marking, 32),
            (&records.linear_segment_parameter, 55),
        ] {
            assert_eq!(schema.fixed_size(), Some(size), "{}", schema.name());
        }
    }

    #[test]
    fn variable_datum_is_variable() {
        let records = Records::new().unwrap();
        assert_eq!(records.variable_datum.fixed_size(), None);
        assert_eq!(records.variable_datum.min_size(), 8);
    }
}

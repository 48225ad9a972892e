//! Synthetic environment PDUs.

use schema::{ScalarType, SchemaRef, SchemaResult};
use wire::PduType;

use crate::family::pdu;
use crate::records::Records;

pub(crate) fn schemas(r: &Records) -> SchemaResult<Vec<(PduType, SchemaRef)>> {
    Ok(vec![
        (PduType::EnvironmentalProcess, environmental_process(r)?),
        (PduType::GriddedData, gridded_data(r)?),
        (PduType::PointObjectState, point_object_state(r)?),
        (PduType::LinearObjectState, linear_object_state(r)?),
        (PduType::ArealObjectState, areal_object_state(r)?),
    ])
}

fn environmental_process(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::EnvironmentalProcess, r)
        .composite("environmental_process_id", &r.entity_id)
        .composite("environment_type", &r.entity_type)
        .u8("model_type")
        .u8("environment_status")
        .count("number_of_environment_records", ScalarType::U8, "environment_records")
        .u16("sequence_number")
        .list(
            "environment_records",
            &r.environment,
            "number_of_environment_records",
        )
        .build_ref()
}

fn gridded_data(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::GriddedData, r)
        .composite("environmental_simulation_application_id", &r.entity_id)
        .u16("field_number")
        .u16("pdu_number")
        .u16("pdu_total")
        .u16("coordinate_system")
        .count("number_of_grid_axes", ScalarType::U8, "grid_data_list")
        .u8("constant_grid")
        .composite("environment_type", &r.entity_type)
        .composite("orientation", &r.orientation)
        .i64("sample_time")
        .u32("total_values")
        .u8("vector_dimension")
        .u16("padding1")
        .u8("padding2")
        .list("grid_data_list", &r.grid_axis_record, "number_of_grid_axes")
        .build_ref()
}

fn point_object_state(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::PointObjectState, r)
        .composite("object_id", &r.entity_id)
        .composite("referenced_object_id", &r.entity_id)
        .u16("update_number")
        .u8("force_id")
        .u8("modifications")
        .composite("object_type", &r.object_type)
        .composite("object_location", &r.vector3_double)
        .composite("object_orientation", &r.orientation)
        .f64("object_appearance")
        .composite("requester_id", &r.simulation_address)
        .composite("receiving_id", &r.simulation_address)
        .u32("pad2")
        .build_ref()
}

fn linear_object_state(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::LinearObjectState, r)
        .composite("object_id", &r.entity_id)
        .composite("referenced_object_id", &r.entity_id)
        .u16("update_number")
        .u8("force_id")
        .count(
            "number_of_segments",
            ScalarType::U8,
            "linear_segment_parameters",
        )
        .composite("requester_id", &r.simulation_address)
        .composite("receiving_id", &r.simulation_address)
        .composite("object_type", &r.object_type)
        .list(
            "linear_segment_parameters",
            &r.linear_segment_parameter,
            "number_of_segments",
        )
        .build_ref()
}

fn areal_object_state(r: &Records) -> SchemaResult<SchemaRef> {
    pdu(PduType::ArealObjectState, r)
        .composite("object_id", &r.entity_id)
        .composite("referenced_object_id", &r.entity_id)
        .u16("update_number")
        .u8("force_id")
        .u8("modifications")
        .composite("object_type", &r.object_type)
        .composite("object_appearance", &r.six_byte_chunk)
        .count("number_of_points", ScalarType::U16, "object_location")
        .composite("requester_id", &r.simulation_address)
        .composite("receiving_id", &r.simulation_address)
        .list("object_location", &r.vector3_double, "number_of_points")
        .build_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts() {
        let records = Records::new().unwrap();
        assert_eq!(environmental_process(&records).unwrap().min_size(), 31);
        assert_eq!(gridded_data(&records).unwrap().min_size(), 64);
        assert_eq!(point_object_state(&records).unwrap().fixed_size(), Some(88));
        assert_eq!(linear_object_state(&records).unwrap().min_size(), 40);
        assert_eq!(areal_object_state(&records).unwrap().min_size(), 48);
    }
}

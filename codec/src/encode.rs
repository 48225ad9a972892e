//! Record encoding.

use cursor::ByteWriter;
use schema::{CountSource, CountUnit, FieldKind, ListElement, Scalar, ScalarType};

use crate::error::{StructuralError, StructuralResult};
use crate::size::{marshalled_size, padding_for, record_size_at};
use crate::value::{
    check_scalar, check_schema, check_value, count_value, kind_mismatch, Record, Value,
};

/// Encodes a record into a new buffer.
pub fn encode_record(record: &Record) -> StructuralResult<Vec<u8>> {
    let mut writer = ByteWriter::with_capacity(marshalled_size(record));
    encode_record_into(record, &mut writer)?;
    Ok(writer.finish())
}

/// Appends the encoding of `record` to `writer`.
///
/// Alignment padding is measured from the writer's position at the call.
/// On error the writer may hold part of the record.
pub fn encode_record_into(record: &Record, writer: &mut ByteWriter) -> StructuralResult<()> {
    let encoder = Encoder {
        origin: writer.position(),
    };
    encoder.write_record(record, writer)
}

struct Encoder {
    origin: usize,
}

impl Encoder {
    fn write_record(&self, record: &Record, writer: &mut ByteWriter) -> StructuralResult<()> {
        let schema = record.schema();
        let offset = writer.position() - self.origin;
        for (idx, (field, value)) in schema.fields().iter().zip(record.values()).enumerate() {
            match &field.kind {
                FieldKind::Scalar(ty) => {
                    let Value::Scalar(scalar) = value else {
                        return Err(kind_mismatch(field, value));
                    };
                    check_scalar(&field.name, *ty, *scalar)?;
                    write_scalar(writer, *scalar);
                }
                FieldKind::FixedArray { .. } => {
                    check_value(field, value)?;
                    if let Value::Array(items) = value {
                        items.iter().for_each(|item| write_scalar(writer, *item));
                    }
                }
                FieldKind::Composite(expected) => {
                    let Value::Record(inner) = value else {
                        return Err(kind_mismatch(field, value));
                    };
                    check_schema(&field.name, expected, inner.schema())?;
                    self.write_record(inner, writer)?;
                }
                FieldKind::CountedList { element, count } => {
                    check_value(field, value)?;
                    if let CountSource::Inline(width) = count {
                        let len = value.list_len();
                        write_count(writer, &field.name, *width, CountUnit::Elements, len, 0)?;
                    }
                    match (element, value) {
                        (ListElement::Record(_), Value::List(items)) => {
                            for item in items {
                                self.write_record(item, writer)?;
                            }
                        }
                        (ListElement::Scalar(_), Value::Array(items)) => {
                            items.iter().for_each(|item| write_scalar(writer, *item));
                        }
                        _ => return Err(kind_mismatch(field, value)),
                    }
                }
                FieldKind::Count { width, unit, .. } => {
                    let len = schema
                        .list_of_count(idx)
                        .map_or(0, |list| record.values()[list].list_len());
                    let unused = value.unused_bits();
                    write_count(writer, &field.name, *width, *unit, len, unused)?;
                }
                FieldKind::Length(width) => {
                    let length = record_size_at(record, offset);
                    let scalar = Scalar::from_unsigned(*width, length as u64).ok_or_else(|| {
                        StructuralError::LengthOverflow {
                            field: field.name.clone(),
                            length,
                            width: *width,
                        }
                    })?;
                    write_scalar(writer, scalar);
                }
                FieldKind::PaddingTo { boundary } => {
                    writer.write_zeros(padding_for(writer.position() - self.origin, *boundary));
                }
                FieldKind::Constant(constant) => write_scalar(writer, *constant),
            }
        }
        Ok(())
    }
}

fn write_count(
    writer: &mut ByteWriter,
    field: &str,
    width: ScalarType,
    unit: CountUnit,
    len: usize,
    unused: u32,
) -> StructuralResult<()> {
    let count = count_value(unit, len, unused);
    let scalar = count
        .and_then(|count| Scalar::from_unsigned(width, count))
        .ok_or_else(|| StructuralError::CountOverflow {
            field: field.to_string(),
            count: count.unwrap_or(u64::MAX),
            width,
        })?;
    write_scalar(writer, scalar);
    Ok(())
}

pub(crate) fn write_scalar(writer: &mut ByteWriter, value: Scalar) {
    match value {
        Scalar::U8(v) => writer.write_u8(v),
        Scalar::U16(v) => writer.write_u16(v),
        Scalar::U32(v) => writer.write_u32(v),
        Scalar::U64(v) => writer.write_u64(v),
        Scalar::I8(v) => writer.write_i8(v),
        Scalar::I16(v) => writer.write_i16(v),
        Scalar::I32(v) => writer.write_i32(v),
        Scalar::I64(v) => writer.write_i64(v),
        Scalar::F32(v) => writer.write_f32(v),
        Scalar::F64(v) => writer.write_f64(v),
    }
}

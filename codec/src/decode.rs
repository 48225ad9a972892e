//! Record decoding.

use std::sync::Arc;

use cursor::ByteReader;
use schema::{CountSource, CountUnit, FieldKind, ListElement, Scalar, ScalarType, SchemaRef};

use crate::error::{DecodeError, DecodeResult, LimitKind};
use crate::limits::DecodeLimits;
use crate::size::padding_for;
use crate::value::{Record, Value};

/// Decodes exactly one record of `schema` from `bytes` with default limits.
pub fn decode_record(schema: &SchemaRef, bytes: &[u8]) -> DecodeResult<Record> {
    decode_record_with_limits(schema, bytes, &DecodeLimits::default())
}

/// Decodes exactly one record of `schema` from `bytes`.
///
/// Fails with [`DecodeError::TrailingData`] if bytes remain afterwards.
pub fn decode_record_with_limits(
    schema: &SchemaRef,
    bytes: &[u8],
    limits: &DecodeLimits,
) -> DecodeResult<Record> {
    if bytes.len() > limits.max_pdu_bytes {
        return Err(DecodeError::LimitsExceeded {
            kind: LimitKind::PduBytes,
            limit: limits.max_pdu_bytes,
            actual: bytes.len(),
        });
    }
    let mut reader = ByteReader::new(bytes);
    let record = decode_record_from(schema, &mut reader, limits)?;
    if !reader.is_empty() {
        return Err(DecodeError::TrailingData {
            remaining: reader.remaining(),
        });
    }
    Ok(record)
}

/// Decodes one record of `schema` at the reader's position.
///
/// Alignment padding is measured from that position. On error the reader
/// position is unspecified.
pub fn decode_record_from(
    schema: &SchemaRef,
    reader: &mut ByteReader<'_>,
    limits: &DecodeLimits,
) -> DecodeResult<Record> {
    let decoder = Decoder {
        origin: reader.position(),
        limits,
    };
    decoder.read_record(reader, schema, 0)
}

struct Decoder<'l> {
    origin: usize,
    limits: &'l DecodeLimits,
}

impl Decoder<'_> {
    fn read_record(
        &self,
        reader: &mut ByteReader<'_>,
        schema: &SchemaRef,
        depth: usize,
    ) -> DecodeResult<Record> {
        if depth > self.limits.max_depth {
            return Err(DecodeError::LimitsExceeded {
                kind: LimitKind::Depth,
                limit: self.limits.max_depth,
                actual: depth,
            });
        }

        let start = reader.position();
        let mut values = Vec::with_capacity(schema.len());
        let mut counts = vec![0usize; schema.len()];
        let mut declared_length = None;

        for (idx, field) in schema.fields().iter().enumerate() {
            let value = match &field.kind {
                FieldKind::Scalar(ty) => Value::Scalar(read_scalar(reader, *ty)?),
                FieldKind::FixedArray { element, len } => {
                    let mut items = Vec::with_capacity(*len);
                    for _ in 0..*len {
                        items.push(read_scalar(reader, *element)?);
                    }
                    Value::Array(items)
                }
                FieldKind::Composite(inner) => {
                    Value::Record(self.read_record(reader, inner, depth + 1)?)
                }
                FieldKind::CountedList { element, count } => {
                    let len = match count {
                        CountSource::Inline(width) => {
                            elements_for(read_unsigned(reader, *width)?, CountUnit::Elements).0
                        }
                        CountSource::Field(_) => schema
                            .count_field_of(idx)
                            .map_or(0, |count_idx| counts[count_idx]),
                    };
                    self.read_list(reader, element, len, depth)?
                }
                FieldKind::Count { width, unit, .. } => {
                    let (len, unused) = elements_for(read_unsigned(reader, *width)?, *unit);
                    counts[idx] = len;
                    if unused == 0 {
                        Value::Derived
                    } else {
                        Value::UnusedBits(unused)
                    }
                }
                FieldKind::Length(width) => {
                    let raw = read_unsigned(reader, *width)?;
                    declared_length = Some(usize::try_from(raw).unwrap_or(usize::MAX));
                    Value::Derived
                }
                FieldKind::PaddingTo { boundary } => {
                    reader.skip(padding_for(reader.position() - self.origin, *boundary))?;
                    Value::Derived
                }
                FieldKind::Constant(constant) => {
                    read_scalar(reader, constant.ty())?;
                    Value::Derived
                }
            };
            values.push(value);
        }

        if let Some(declared) = declared_length {
            let actual = reader.position() - start;
            if declared != actual {
                return Err(DecodeError::LengthMismatch { declared, actual });
            }
        }

        Ok(Record::from_parts(Arc::clone(schema), values))
    }

    fn read_list(
        &self,
        reader: &mut ByteReader<'_>,
        element: &ListElement,
        len: usize,
        depth: usize,
    ) -> DecodeResult<Value> {
        if len > self.limits.max_list_len {
            return Err(DecodeError::LimitsExceeded {
                kind: LimitKind::ListLength,
                limit: self.limits.max_list_len,
                actual: len,
            });
        }
        // Never reserve more elements than the remaining input could hold.
        let capacity = len.min(reader.remaining() / element.min_size().max(1));
        match element {
            ListElement::Record(schema) => {
                let mut items = Vec::with_capacity(capacity);
                for _ in 0..len {
                    items.push(self.read_record(reader, schema, depth + 1)?);
                }
                Ok(Value::List(items))
            }
            ListElement::Scalar(ty) => {
                let mut items = Vec::with_capacity(capacity);
                for _ in 0..len {
                    items.push(read_scalar(reader, *ty)?);
                }
                Ok(Value::Array(items))
            }
        }
    }
}

/// Number of list elements a raw count denotes, and the bits of the final
/// element it leaves out. Bit counts round a partial element up.
fn elements_for(raw: u64, unit: CountUnit) -> (usize, u32) {
    let (elements, unused) = match unit {
        CountUnit::Elements => (raw, 0),
        CountUnit::Bits(bits) => {
            let bits = u64::from(bits.max(1));
            (raw.div_ceil(bits), (bits - raw % bits) % bits)
        }
    };
    (
        usize::try_from(elements).unwrap_or(usize::MAX),
        u32::try_from(unused).unwrap_or_default(),
    )
}

fn read_unsigned(reader: &mut ByteReader<'_>, width: ScalarType) -> DecodeResult<u64> {
    Ok(read_scalar(reader, width)?.as_unsigned().unwrap_or_default())
}

pub(crate) fn read_scalar(reader: &mut ByteReader<'_>, ty: ScalarType) -> DecodeResult<Scalar> {
    let value = match ty {
        ScalarType::U8 => Scalar::U8(reader.read_u8()?),
        ScalarType::U16 => Scalar::U16(reader.read_u16()?),
        ScalarType::U32 => Scalar::U32(reader.read_u32()?),
        ScalarType::U64 => Scalar::U64(reader.read_u64()?),
        ScalarType::I8 => Scalar::I8(reader.read_i8()?),
        ScalarType::I16 => Scalar::I16(reader.read_i16()?),
        ScalarType::I32 => Scalar::I32(reader.read_i32()?),
        ScalarType::I64 => Scalar::I64(reader.read_i64()?),
        ScalarType::F32 => Scalar::F32(reader.read_f32()?),
        ScalarType::F64 => Scalar::F64(reader.read_f64()?),
    };
    Ok(value)
}

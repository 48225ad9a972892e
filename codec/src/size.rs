//! Encoded size computation.

use schema::{CountSource, FieldKind, ListElement};

use crate::value::{Record, Value};

/// Exact number of bytes `encode_record` produces for `record`.
///
/// Never fails. Values that do not match their field are sized by the
/// field's declared shape.
#[must_use]
pub fn marshalled_size(record: &Record) -> usize {
    record_size_at(record, 0)
}

/// Number of zero bytes that bring `offset` to a multiple of `boundary`.
#[must_use]
pub(crate) const fn padding_for(offset: usize, boundary: usize) -> usize {
    let rem = offset % boundary;
    if rem == 0 {
        0
    } else {
        boundary - rem
    }
}

/// Size of `record` when it starts `offset` bytes after the outermost
/// record. The offset only matters for alignment padding.
pub(crate) fn record_size_at(record: &Record, offset: usize) -> usize {
    let mut pos = offset;
    for (field, value) in record.schema().fields().iter().zip(record.values()) {
        pos += field_size_at(&field.kind, value, pos);
    }
    pos - offset
}

fn field_size_at(kind: &FieldKind, value: &Value, pos: usize) -> usize {
    match kind {
        FieldKind::Composite(schema) => match value {
            Value::Record(record) => record_size_at(record, pos),
            _ => schema.min_size(),
        },
        FieldKind::CountedList { element, count } => {
            let prefix = match count {
                CountSource::Inline(width) => width.width(),
                CountSource::Field(_) => 0,
            };
            let mut size = prefix;
            match (element, value) {
                (ListElement::Record(_), Value::List(items)) => {
                    for item in items {
                        size += record_size_at(item, pos + size);
                    }
                }
                (ListElement::Scalar(ty), Value::Array(items)) => {
                    size += ty.width() * items.len();
                }
                _ => {}
            }
            size
        }
        FieldKind::PaddingTo { boundary } => padding_for(pos, *boundary),
        other => other.fixed_size().unwrap_or(0),
    }
}

//! Whole PDUs: records that begin with the common header.

use std::ops::Deref;
use std::sync::Arc;

use schema::{FieldDef, FieldKind, Scalar, ScalarType, Schema, SchemaRef};
use wire::{PduHeader, PduType};

use crate::encode::encode_record;
use crate::error::{StructuralError, StructuralResult};
use crate::registry::Factory;
use crate::size::marshalled_size;
use crate::value::{Record, Value};

/// Number of header fields at the start of every PDU schema.
pub const HEADER_FIELD_COUNT: usize = 7;

/// The common header as schema fields. Every PDU schema starts with these.
///
/// `length` is derived: the encoder writes the PDU's total size there.
#[must_use]
pub fn pdu_header_fields() -> Vec<FieldDef> {
    vec![
        FieldDef::new("protocol_version", FieldKind::Scalar(ScalarType::U8)),
        FieldDef::new("exercise_id", FieldKind::Scalar(ScalarType::U8)),
        FieldDef::new("pdu_type", FieldKind::Scalar(ScalarType::U8)),
        FieldDef::new("protocol_family", FieldKind::Scalar(ScalarType::U8)),
        FieldDef::new("timestamp", FieldKind::Scalar(ScalarType::U32)),
        FieldDef::new("length", FieldKind::Length(ScalarType::U16)),
        FieldDef::new("padding", FieldKind::Scalar(ScalarType::U16)),
    ]
}

/// Returns `true` if `schema` begins with the common header fields.
#[must_use]
pub fn has_pdu_header(schema: &Schema) -> bool {
    schema.starts_with(&pdu_header_fields())
}

/// Header field holding the discriminant.
const PDU_TYPE_FIELD: &str = "pdu_type";

/// A record whose schema begins with the common PDU header.
///
/// Dereferences to the underlying [`Record`] for reads. Mutation goes
/// through checked setters, so the header stays well formed. The
/// discriminant is fixed when the `Pdu` is created: writes to `pdu_type`
/// are ignored like writes to derived fields, so it always names the
/// schema the PDU was built or decoded with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pdu {
    record: Record,
}

impl Pdu {
    /// Wraps a record, checking that its schema carries the PDU header.
    pub fn new(record: Record) -> StructuralResult<Self> {
        if has_pdu_header(record.schema()) {
            Ok(Self { record })
        } else {
            Err(StructuralError::MissingHeader {
                schema: record.name().to_string(),
            })
        }
    }

    #[must_use]
    pub fn record(&self) -> &Record {
        &self.record
    }

    #[must_use]
    pub fn into_record(self) -> Record {
        self.record
    }

    /// The header as it would be encoded now. `length` is the live size.
    #[must_use]
    pub fn header(&self) -> PduHeader {
        PduHeader {
            protocol_version: self.header_u8("protocol_version"),
            exercise_id: self.header_u8("exercise_id"),
            pdu_type: self.header_u8(PDU_TYPE_FIELD),
            protocol_family: self.header_u8("protocol_family"),
            timestamp: match self.record.scalar("timestamp") {
                Some(Scalar::U32(v)) => v,
                _ => 0,
            },
            length: u16::try_from(marshalled_size(&self.record)).unwrap_or(u16::MAX),
            padding: match self.record.scalar("padding") {
                Some(Scalar::U16(v)) => v,
                _ => 0,
            },
        }
    }

    /// Overwrites the header fields. The length and discriminant are kept.
    pub fn set_header(&mut self, header: &PduHeader) -> StructuralResult<()> {
        self.record.set_scalar("protocol_version", header.protocol_version)?;
        self.record.set_scalar("exercise_id", header.exercise_id)?;
        self.record.set_scalar("protocol_family", header.protocol_family)?;
        self.record.set_scalar("timestamp", header.timestamp)?;
        self.record.set_scalar("padding", header.padding)
    }

    /// The discriminant in the header.
    #[must_use]
    pub fn pdu_type(&self) -> u8 {
        self.header_u8(PDU_TYPE_FIELD)
    }

    /// The header discriminant as a known PDU type.
    #[must_use]
    pub fn kind(&self) -> Option<PduType> {
        PduType::from_raw(self.pdu_type())
    }

    #[must_use]
    pub fn marshalled_size(&self) -> usize {
        marshalled_size(&self.record)
    }

    /// Sets a field like [`Record::set`]. Writes to `pdu_type` are ignored.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> StructuralResult<()> {
        if name == PDU_TYPE_FIELD {
            log::debug!("ignoring write to {}.{name}", self.record.name());
            return Ok(());
        }
        self.record.set(name, value)
    }

    pub fn set_scalar(&mut self, name: &str, value: impl Into<Scalar>) -> StructuralResult<()> {
        self.set(name, Value::Scalar(value.into()))
    }

    pub fn push(&mut self, name: &str, element: Record) -> StructuralResult<()> {
        self.record.push(name, element)
    }

    pub fn push_scalar(&mut self, name: &str, value: impl Into<Scalar>) -> StructuralResult<()> {
        self.record.push_scalar(name, value)
    }

    /// Mutable access to an embedded sub-record.
    pub fn record_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.record.record_mut(name)
    }

    pub fn list_mut(&mut self, name: &str) -> Option<&mut [Record]> {
        self.record.list_mut(name)
    }

    fn header_u8(&self, name: &str) -> u8 {
        match self.record.scalar(name) {
            Some(Scalar::U8(v)) => v,
            _ => 0,
        }
    }
}

impl Deref for Pdu {
    type Target = Record;

    fn deref(&self) -> &Record {
        &self.record
    }
}

impl TryFrom<Record> for Pdu {
    type Error = StructuralError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        Self::new(record)
    }
}

/// Encodes a PDU. The header length is filled in from the encoded size.
pub fn encode(pdu: &Pdu) -> StructuralResult<Vec<u8>> {
    encode_record(&pdu.record)
}

/// A factory producing default records of `schema` with `header` filled in.
///
/// Header fields the schema does not accept are left at their defaults.
#[must_use]
pub fn pdu_factory(schema: SchemaRef, header: PduHeader) -> Factory {
    Arc::new(move || {
        let mut record = Record::new(&schema);
        for (name, value) in [
            ("protocol_version", Scalar::U8(header.protocol_version)),
            ("exercise_id", Scalar::U8(header.exercise_id)),
            ("pdu_type", Scalar::U8(header.pdu_type)),
            ("protocol_family", Scalar::U8(header.protocol_family)),
            ("timestamp", Scalar::U32(header.timestamp)),
            ("padding", Scalar::U16(header.padding)),
        ] {
            if record.set_scalar(name, value).is_err() {
                log::debug!("factory for {} has no header field {name}", schema.name());
            }
        }
        record
    })
}

//! PDU type registry and dispatch decoding.

use std::fmt;
use std::sync::Arc;

use schema::SchemaRef;
use wire::{Limits, PduFrames, PduHeader, PduType, HEADER_SIZE};

use crate::decode::decode_record_with_limits;
use crate::error::{DecodeError, DecodeResult, LimitKind, RegistryError, RegistryResult};
use crate::limits::DecodeLimits;
use crate::pdu::{has_pdu_header, pdu_factory, Pdu};
use crate::value::{same_schema, Record};

/// Builds a default record for one PDU type.
pub type Factory = Arc<dyn Fn() -> Record + Send + Sync>;

#[derive(Clone)]
struct Registration {
    schema: SchemaRef,
    factory: Factory,
    /// Protocol version the factory writes, and the only one dispatch
    /// accepts for this discriminant.
    version: u8,
}

/// Collects PDU registrations before freezing them into a [`Registry`].
pub struct RegistryBuilder {
    slots: Vec<Option<Registration>>,
    limits: DecodeLimits,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: vec![None; 256],
            limits: DecodeLimits::default(),
        }
    }

    /// Sets the limits the built registry decodes with.
    #[must_use]
    pub fn limits(mut self, limits: DecodeLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Associates a discriminant with a schema and a factory.
    ///
    /// The factory is run once here to check it builds records of `schema`
    /// carrying `pdu_type` in their header. The protocol version in that
    /// header is the one [`Registry::dispatch_decode`] accepts.
    pub fn register(
        &mut self,
        pdu_type: u8,
        schema: SchemaRef,
        factory: Factory,
    ) -> RegistryResult<()> {
        let slot = usize::from(pdu_type);
        if self.slots[slot].is_some() {
            return Err(RegistryError::DuplicatePduType(pdu_type));
        }
        if !has_pdu_header(&schema) {
            return Err(RegistryError::MissingHeader {
                schema: schema.name().to_string(),
            });
        }
        let sample = factory();
        if !same_schema(&schema, sample.schema()) {
            return Err(RegistryError::FactoryMismatch {
                pdu_type,
                expected: schema.name().to_string(),
                found: sample.name().to_string(),
            });
        }
        let header = Pdu::new(sample)
            .map_err(|_| RegistryError::MissingHeader {
                schema: schema.name().to_string(),
            })?
            .header();
        if header.pdu_type != pdu_type {
            return Err(RegistryError::PduTypeMismatch {
                pdu_type,
                produced: header.pdu_type,
            });
        }
        self.slots[slot] = Some(Registration {
            schema,
            factory,
            version: header.protocol_version,
        });
        Ok(())
    }

    /// Registers `schema` for `pdu_type` with a factory that fills in the
    /// current protocol version, the type and its family.
    pub fn register_schema(&mut self, pdu_type: PduType, schema: SchemaRef) -> RegistryResult<()> {
        let factory = pdu_factory(Arc::clone(&schema), PduHeader::for_type(pdu_type));
        self.register(pdu_type.raw(), schema, factory)
    }

    /// Freezes the registrations.
    #[must_use]
    pub fn build(self) -> Registry {
        Registry {
            slots: self.slots.into_boxed_slice(),
            limits: self.limits,
        }
    }
}

/// An immutable map from PDU discriminant to schema and factory.
///
/// Lookups index a fixed table, so a shared registry needs no locking.
pub struct Registry {
    slots: Box<[Option<Registration>]>,
    limits: DecodeLimits,
}

impl Registry {
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    #[must_use]
    pub fn limits(&self) -> &DecodeLimits {
        &self.limits
    }

    #[must_use]
    pub fn contains(&self, pdu_type: u8) -> bool {
        self.slots[usize::from(pdu_type)].is_some()
    }

    #[must_use]
    pub fn schema(&self, pdu_type: u8) -> Option<&SchemaRef> {
        self.slots[usize::from(pdu_type)]
            .as_ref()
            .map(|registration| &registration.schema)
    }

    /// Protocol version accepted for `pdu_type`.
    #[must_use]
    pub fn version(&self, pdu_type: u8) -> Option<u8> {
        self.slots[usize::from(pdu_type)]
            .as_ref()
            .map(|registration| registration.version)
    }

    /// Returns `true` if any registration accepts `version`.
    #[must_use]
    pub fn supports_version(&self, version: u8) -> bool {
        self.slots
            .iter()
            .flatten()
            .any(|registration| registration.version == version)
    }

    /// Registered discriminants and their schemas, in ascending order.
    pub fn schemas(&self) -> impl Iterator<Item = (u8, &SchemaRef)> + '_ {
        (0..=u8::MAX).filter_map(move |pdu_type| self.schema(pdu_type).map(|s| (pdu_type, s)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs the factory registered for `pdu_type`.
    #[must_use]
    pub fn create(&self, pdu_type: u8) -> Option<Pdu> {
        let registration = self.slots[usize::from(pdu_type)].as_ref()?;
        Pdu::new((registration.factory)()).ok()
    }

    /// Decodes one PDU, choosing the schema from the header discriminant.
    ///
    /// The header's protocol version must be one the registry holds
    /// schemas for, and the one registered for the discriminant. `bytes`
    /// must hold exactly the length the header declares.
    pub fn dispatch_decode(&self, bytes: &[u8]) -> DecodeResult<Pdu> {
        if bytes.len() < HEADER_SIZE {
            return Err(DecodeError::TruncatedInput {
                requested: HEADER_SIZE,
                available: bytes.len(),
            });
        }
        let header = PduHeader::peek(bytes)?;
        let unsupported = DecodeError::UnsupportedVersion {
            version: header.protocol_version,
            pdu_type: header.pdu_type,
        };
        if !self.supports_version(header.protocol_version) {
            return Err(unsupported);
        }
        let registration = self.slots[usize::from(header.pdu_type)]
            .as_ref()
            .ok_or(DecodeError::UnknownPduType(header.pdu_type))?;
        if registration.version != header.protocol_version {
            return Err(unsupported);
        }
        let schema = &registration.schema;

        let declared = usize::from(header.length);
        if declared > self.limits.max_pdu_bytes {
            return Err(DecodeError::LimitsExceeded {
                kind: LimitKind::PduBytes,
                limit: self.limits.max_pdu_bytes,
                actual: declared,
            });
        }
        if bytes.len() < declared {
            return Err(DecodeError::TruncatedInput {
                requested: declared,
                available: bytes.len(),
            });
        }
        if bytes.len() > declared {
            return Err(DecodeError::LengthMismatch {
                declared,
                actual: bytes.len(),
            });
        }

        log::trace!("decoding {} ({} bytes)", schema.name(), declared);
        let record = decode_record_with_limits(schema, bytes, &self.limits)?;
        // Registration guarantees the header prefix.
        Pdu::new(record).map_err(|_| DecodeError::UnknownPduType(header.pdu_type))
    }

    /// Decodes every PDU carried back to back in one datagram.
    pub fn decode_datagram(&self, bytes: &[u8], limits: &Limits) -> DecodeResult<Vec<Pdu>> {
        PduFrames::new(bytes, limits)
            .map(|frame| self.dispatch_decode(frame?.bytes))
            .collect()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.schemas().map(|(pdu_type, schema)| (pdu_type, schema.name())))
            .finish()
    }
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("registered", &self.slots.iter().flatten().count())
            .field("limits", &self.limits)
            .finish()
    }
}

//! DIS 1998 PDU schemas and a ready-made dispatch registry.
//!
//! Every PDU kind of protocol version 6 is declared here as a schema built
//! from shared sub-records ([`Records`]). Family prefixes are composed into
//! each schema rather than inherited:
//!
//! - Warfare PDUs carry firing and target entity IDs
//! - Simulation management PDUs, reliable or not, carry originating and
//!   receiving entity IDs
//! - Transmitter, Signal and Receiver carry an entity ID and a radio ID
//!
//! The live entity PDUs (types 46 to 50) are not described. IFF is described
//! up to layer 1.
//!
//! # Example
//!
//! ```
//! use wire::PduType;
//!
//! let mut fire = catalog::create(PduType::Fire)?;
//! fire.set_scalar("range", 1500.0f32)?;
//! let bytes = catalog::encode(&fire)?;
//! assert_eq!(bytes.len(), 96);
//! assert_eq!(catalog::decode(&bytes)?, fire);
//! # Ok::<(), catalog::CatalogError>(())
//! ```

mod emissions;
mod entity_info;
mod entity_mgmt;
mod environment;
mod error;
mod family;
mod logistics;
mod minefield;
mod radio;
mod records;
mod reliable;
mod simulation;
mod warfare;

use std::sync::OnceLock;

use codec::{DecodeLimits, Pdu, Registry, RegistryBuilder};
use schema::{SchemaRef, SchemaResult};
use wire::PduType;

pub use error::{CatalogError, CatalogResult};
pub use records::Records;

static REGISTRY: OnceLock<CatalogResult<Registry>> = OnceLock::new();

/// Every catalog schema paired with the PDU type it describes.
pub fn schemas(records: &Records) -> SchemaResult<Vec<(PduType, SchemaRef)>> {
    let mut all = entity_info::schemas(records)?;
    all.extend(warfare::schemas(records)?);
    all.extend(logistics::schemas(records)?);
    all.extend(simulation::schemas(records)?);
    all.extend(emissions::schemas(records)?);
    all.extend(radio::schemas(records)?);
    all.extend(entity_mgmt::schemas(records)?);
    all.extend(minefield::schemas(records)?);
    all.extend(environment::schemas(records)?);
    all.extend(reliable::schemas(records)?);
    all.sort_by_key(|(pdu_type, _)| *pdu_type);
    Ok(all)
}

/// Builds a fresh registry holding every catalog schema.
pub fn build_registry(limits: DecodeLimits) -> CatalogResult<Registry> {
    let records = Records::new()?;
    let mut builder = RegistryBuilder::new().limits(limits);
    for (pdu_type, schema) in schemas(&records)? {
        builder.register_schema(pdu_type, schema)?;
    }
    let registry = builder.build();
    log::debug!("catalog registry holds {} PDU types", registry.len());
    Ok(registry)
}

/// The process-wide catalog registry, built with default limits on first use.
pub fn registry() -> CatalogResult<&'static Registry> {
    REGISTRY
        .get_or_init(|| build_registry(DecodeLimits::default()))
        .as_ref()
        .map_err(Clone::clone)
}

/// A default PDU of `pdu_type` with its header filled in.
pub fn create(pdu_type: PduType) -> CatalogResult<Pdu> {
    registry()?
        .create(pdu_type.raw())
        .ok_or(CatalogError::Unregistered(pdu_type))
}

/// Encodes a PDU. The header length is derived from the encoded size.
pub fn encode(pdu: &Pdu) -> CatalogResult<Vec<u8>> {
    Ok(codec::encode(pdu)?)
}

/// Decodes one PDU, choosing its schema from the header discriminant.
pub fn decode(bytes: &[u8]) -> CatalogResult<Pdu> {
    Ok(registry()?.dispatch_decode(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_built_once() {
        let a = registry().unwrap();
        let b = registry().unwrap();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn every_type_but_live_entity_and_other_is_registered() {
        let registry = registry().unwrap();
        for pdu_type in PduType::ALL {
            let expected = !matches!(
                pdu_type,
                PduType::Other
                    | PduType::Tspi
                    | PduType::Appearance
                    | PduType::ArticulatedParts
                    | PduType::LeFire
                    | PduType::LeDetonation
            );
            assert_eq!(registry.contains(pdu_type.raw()), expected, "{pdu_type}");
        }
        assert_eq!(registry.len(), 62);
    }

    #[test]
    fn create_fills_in_header() {
        let pdu = create(PduType::AcknowledgeR).unwrap();
        let header = pdu.header();
        assert_eq!(header.protocol_version, 6);
        assert_eq!(header.pdu_type, 55);
        assert_eq!(header.protocol_family, 10);
    }

    #[test]
    fn create_unregistered_type() {
        assert_eq!(
            create(PduType::LeFire).unwrap_err(),
            CatalogError::Unregistered(PduType::LeFire)
        );
    }

    #[test]
    fn schema_names_are_unique() {
        let records = Records::new().unwrap();
        let all = schemas(&records).unwrap();
        let mut names: Vec<_> = all.iter().map(|(_, schema)| schema.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), all.len());
    }
}

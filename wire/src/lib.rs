//! PDU header framing and protocol enumerations for the DIS PDU codec.
//!
//! This crate handles the parts of the wire format that every PDU shares:
//! the 12-byte common header, the PDU type, family and version
//! enumerations, header timestamps, and splitting datagrams that carry
//! several PDUs. It does not know any PDU body layout. The [`geo`] module
//! converts world coordinates carried in PDUs to and from latitude,
//! longitude and altitude.
//!
//! # Design Principles
//!
//! - **Fixed offsets** - The discriminant and declared length are read at fixed byte offsets.
//! - **Bounded framing** - Declared lengths are checked against the buffer and limits
//!   before slicing.
//! - **No domain knowledge** - This crate handles framing, not record layouts.

mod error;
mod frames;
pub mod geo;
mod header;
mod limits;
mod pdu_type;
mod time;

pub use error::{LimitKind, WireError, WireResult};
pub use frames::{split_datagram, PduFrame, PduFrames};
pub use header::{
    PduHeader, FAMILY_OFFSET, HEADER_SIZE, LENGTH_OFFSET, PDU_TYPE_OFFSET, VERSION_OFFSET,
};
pub use limits::Limits;
pub use pdu_type::{PduType, ProtocolFamily, ProtocolVersion};
pub use time::{since_top_of_hour, units_since_hour, DisTimestamp, UNITS_PER_HOUR};

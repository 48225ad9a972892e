//! Big-endian byte cursor primitives for the DIS PDU codec.
//!
//! This crate provides [`ByteWriter`] and [`ByteReader`] for network-order
//! encoding and decoding of the fixed-width primitives DIS records are built
//! from.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked and never partial.
//! - **No domain knowledge** - This crate knows nothing about PDUs or records.
//! - **Explicit errors** - Reading past the end returns [`CursorError::TruncatedInput`].
//!
//! # Example
//!
//! ```
//! use cursor::{ByteReader, ByteWriter};
//!
//! let mut writer = ByteWriter::new();
//! writer.write_u16(0x0102);
//! writer.write_f32(0.5);
//!
//! let bytes = writer.finish();
//! assert_eq!(&bytes[..2], &[0x01, 0x02]);
//!
//! let mut reader = ByteReader::new(&bytes);
//! assert_eq!(reader.read_u16().unwrap(), 0x0102);
//! assert_eq!(reader.read_f32().unwrap(), 0.5);
//! ```

mod error;
mod reader;
mod writer;

pub use error::{CursorError, CursorResult};
pub use reader::ByteReader;
pub use writer::ByteWriter;

//! Inspection tools for captured DIS datagrams and the PDU catalog.
//!
//! - Split a captured datagram into PDUs and report each header and whether
//!   its body decodes
//! - List the registered PDU types with their schemas and schema hashes
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to see what is on the wire.

use std::fmt::Write as _;

use codec::Registry;
use schema::{schema_hash, SchemaRef};
use serde::Serialize;
use wire::{PduFrames, PduHeader, PduType};

/// What one PDU in a datagram looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameReport {
    pub offset: usize,
    pub header: PduHeader,
    pub kind: Option<PduType>,
    /// Schema name and field count, or why the body did not decode.
    pub decoded: Result<(String, usize), String>,
}

/// Every PDU found in one datagram.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InspectReport {
    pub datagram_len: usize,
    pub frames: Vec<FrameReport>,
    /// Set when framing stopped early on a malformed header.
    pub framing_error: Option<String>,
}

impl InspectReport {
    /// Number of frames whose body decoded.
    #[must_use]
    pub fn decoded_count(&self) -> usize {
        self.frames.iter().filter(|frame| frame.decoded.is_ok()).count()
    }
}

/// Splits `bytes` into PDUs and tries to decode each one with `registry`.
#[must_use]
pub fn inspect_datagram(bytes: &[u8], registry: &Registry, limits: &wire::Limits) -> InspectReport {
    let mut report = InspectReport {
        datagram_len: bytes.len(),
        ..InspectReport::default()
    };
    for frame in PduFrames::new(bytes, limits) {
        let frame = match frame {
            Ok(frame) => frame,
            Err(err) => {
                report.framing_error = Some(err.to_string());
                break;
            }
        };
        let decoded = registry
            .dispatch_decode(frame.bytes)
            .map(|pdu| (pdu.name().to_string(), pdu.schema().len()))
            .map_err(|err| err.to_string());
        report.frames.push(FrameReport {
            offset: frame.offset,
            header: frame.header,
            kind: frame.header.kind(),
            decoded,
        });
    }
    report
}

/// Renders an inspection report as indented text.
#[must_use]
pub fn format_inspect_pretty(report: &InspectReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "datagram: {} bytes, {} PDUs ({} decoded)",
        report.datagram_len,
        report.frames.len(),
        report.decoded_count()
    );
    for frame in &report.frames {
        let header = frame.header;
        let kind = frame
            .kind
            .map_or_else(|| format!("unknown({})", header.pdu_type), |kind| kind.to_string());
        let _ = writeln!(
            out,
            "  @{}: {kind} version: {} exercise: {} family: {} timestamp: 0x{:08x} length: {}",
            frame.offset,
            header.protocol_version,
            header.exercise_id,
            header.protocol_family,
            header.timestamp,
            header.length
        );
        match &frame.decoded {
            Ok((schema, fields)) => {
                let _ = writeln!(out, "    decoded as {schema} ({fields} fields)");
            }
            Err(err) => {
                let _ = writeln!(out, "    decode failed: {err}");
            }
        }
    }
    if let Some(err) = &report.framing_error {
        let _ = writeln!(out, "  framing stopped: {err}");
    }
    out
}

/// One registered PDU type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub pdu_type: u8,
    pub name: String,
    pub family: String,
    pub schema: String,
    pub fields: usize,
    pub min_size: usize,
    pub fixed_size: Option<usize>,
    pub schema_hash: String,
    /// Full field layout, present when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<SchemaRef>,
}

/// Describes every PDU type in `registry`, in discriminant order.
///
/// With `with_layout` each entry also carries its schema for JSON export.
#[must_use]
pub fn catalog_entries(registry: &Registry, with_layout: bool) -> Vec<CatalogEntry> {
    registry
        .schemas()
        .map(|(raw, schema)| {
            let kind = PduType::from_raw(raw);
            CatalogEntry {
                pdu_type: raw,
                name: kind.map_or_else(|| format!("Unknown{raw}"), |kind| kind.name().to_string()),
                family: kind.map_or_else(String::new, |kind| format!("{:?}", kind.family())),
                schema: schema.name().to_string(),
                fields: schema.len(),
                min_size: schema.min_size(),
                fixed_size: schema.fixed_size(),
                schema_hash: format!("0x{:016x}", schema_hash(schema)),
                layout: with_layout.then(|| SchemaRef::clone(schema)),
            }
        })
        .collect()
}

/// Renders catalog entries as an aligned table.
#[must_use]
pub fn format_catalog_pretty(entries: &[CatalogEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<34} {:<36} {:>6} {:>8}  hash",
        "type", "name", "family", "fields", "size"
    );
    for entry in entries {
        let size = entry
            .fixed_size
            .map_or_else(|| format!("{}+", entry.min_size), |size| size.to_string());
        let _ = writeln!(
            out,
            "{:>4}  {:<34} {:<36} {:>6} {:>8}  {}",
            entry.pdu_type, entry.name, entry.family, entry.fields, size, entry.schema_hash
        );
    }
    out
}

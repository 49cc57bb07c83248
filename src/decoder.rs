//! Decoding binary MARC records from in-memory buffers.
//!
//! A binary record is self-describing: a 24-byte leader, a directory of
//! 12-byte entries locating each field, and the field data itself.
//! [`decode_record`] walks that structure and produces a [`Record`] whose
//! fields appear in directory order.
//!
//! Structural problems (bad leader, base address, or directory) abort the
//! record with the matching [`MarcError`] variant. Content problems inside a
//! single field — a control payload or subfield value that is not valid
//! UTF-8 — are tolerated: the offending field or subfield is omitted and a
//! [`DecodeWarning`] is recorded, so imperfect legacy corpora still convert.
//!
//! # Binary layout
//!
//! ```text
//! Leader[24] + Directory[12×N] + 0x1E + FieldData + 0x1D
//! ```
//!
//! Each directory entry is `tag(3) + length(4 digits) + offset(5 digits)`;
//! offsets are relative to the base address in leader positions 12-16.
//! Within a data field, subfields are introduced by 0x1F and every field
//! ends with the 0x1E field terminator.

use crate::error::{MarcError, Result};
use crate::leader::{Leader, LEADER_LENGTH};
use crate::record::{Field, Record, Tag};
use thiserror::Error;

/// Size of one directory entry in bytes.
pub const DIRECTORY_ENTRY_LENGTH: usize = 12;

/// Byte introducing a subfield within a data field.
pub const SUBFIELD_DELIMITER: u8 = 0x1F;

/// Byte terminating each field and the directory.
pub const FIELD_TERMINATOR: u8 = 0x1E;

/// Byte terminating a whole record.
pub const RECORD_TERMINATOR: u8 = 0x1D;

/// A non-fatal problem encountered while assembling fields.
///
/// Warnings accompany a successfully decoded record; callers decide whether
/// to report or ignore them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
    /// A control field payload was not valid UTF-8; the field was omitted.
    #[error("control field {tag} is not valid UTF-8; field skipped")]
    ControlFieldNotUtf8 {
        /// Tag of the omitted field
        tag: Tag,
    },

    /// A subfield value was not valid UTF-8; the subfield was omitted.
    #[error("subfield {code} of field {tag} is not valid UTF-8; subfield skipped")]
    SubfieldNotUtf8 {
        /// Tag of the field holding the subfield
        tag: Tag,
        /// Code of the omitted subfield
        code: char,
    },

    /// A subfield code byte was not ASCII; the subfield was omitted.
    #[error("field {tag} has a non-ASCII subfield code; subfield skipped")]
    SubfieldCodeNotAscii {
        /// Tag of the field holding the subfield
        tag: Tag,
    },

    /// A directory entry pointed outside the record buffer; the field was
    /// omitted.
    #[error("field {tag} lies outside the record data; field skipped")]
    FieldOutOfBounds {
        /// Tag of the omitted field
        tag: Tag,
    },
}

/// A decoded record together with any non-fatal decode warnings.
#[derive(Debug, Clone)]
pub struct DecodedRecord {
    /// The decoded record
    pub record: Record,
    /// Warnings for fields or subfields that were omitted during assembly
    pub warnings: Vec<DecodeWarning>,
}

/// Decode one complete binary record from a buffer.
///
/// The caller supplies the whole record, length prefix included (the
/// framing that extracts record buffers from a stream lives in
/// [`MarcReader`](crate::MarcReader)).
///
/// # Errors
///
/// - [`MarcError::Leader`] — buffer shorter than 24 bytes, or leader not ASCII
/// - [`MarcError::BaseAddress`] — base address missing or not positive
/// - [`MarcError::BaseAddressLength`] — base address at or beyond the buffer end
/// - [`MarcError::Directory`] — directory not a whole number of 12-byte
///   entries, not ASCII, or holding non-numeric lengths/offsets
/// - [`MarcError::Fields`] — no field could be assembled
pub fn decode_record(buffer: &[u8]) -> Result<DecodedRecord> {
    let leader = Leader::from_bytes(buffer)?;

    // Base address is read from the raw bytes, exactly as written.
    let base_address = parse_base_address(&buffer[12..17])?;
    if base_address >= buffer.len() {
        return Err(MarcError::BaseAddressLength);
    }

    // The byte at base_address - 1 is the directory's field terminator.
    let directory_end = base_address - 1;
    let directory = if directory_end > LEADER_LENGTH {
        &buffer[LEADER_LENGTH..directory_end]
    } else {
        &[]
    };
    if !directory.is_ascii() {
        return Err(MarcError::Directory);
    }
    if directory.len() % DIRECTORY_ENTRY_LENGTH != 0 {
        return Err(MarcError::Directory);
    }

    let mut record = Record::new(leader);
    let mut warnings = Vec::new();

    for entry in directory.chunks_exact(DIRECTORY_ENTRY_LENGTH) {
        let tag = Tag::new(std::str::from_utf8(&entry[0..3]).map_err(|_| MarcError::Directory)?);
        let length = parse_decimal(&entry[3..7]).ok_or(MarcError::Directory)?;
        let offset = parse_decimal(&entry[7..12]).ok_or(MarcError::Directory)?;

        let start = base_address + offset;
        if start > buffer.len() {
            warnings.push(DecodeWarning::FieldOutOfBounds { tag });
            continue;
        }
        // The last byte of the field is its terminator and is excluded.
        let end = if length == 0 {
            start
        } else {
            (start + length - 1).min(buffer.len())
        };
        let field_data = &buffer[start..end];

        if tag.is_control() {
            match std::str::from_utf8(field_data) {
                Ok(data) => record.add_field(Field::control(tag, data)),
                Err(_) => warnings.push(DecodeWarning::ControlFieldNotUtf8 { tag }),
            }
        } else {
            record.add_field(assemble_data_field(tag, field_data, &mut warnings));
        }
    }

    if record.fields.is_empty() {
        return Err(MarcError::Fields);
    }

    Ok(DecodedRecord { record, warnings })
}

/// Build a data field from its raw bytes.
///
/// The segment before the first subfield delimiter carries the indicators:
/// missing indicators default to space, characters beyond the second are
/// ignored. Each later segment is one subfield, `code byte + value`.
/// Subfields that fail to decode are skipped with a warning; empty segments
/// are ignored.
fn assemble_data_field(tag: Tag, data: &[u8], warnings: &mut Vec<DecodeWarning>) -> Field {
    let delimiters: Vec<usize> = memchr::memchr_iter(SUBFIELD_DELIMITER, data).collect();

    let indicators = &data[..delimiters.first().copied().unwrap_or(data.len())];
    let indicator1 = indicator_at(indicators, 0);
    let indicator2 = indicator_at(indicators, 1);

    let mut field = Field::data(tag.clone(), indicator1, indicator2);
    for (index, &delimiter) in delimiters.iter().enumerate() {
        let segment_end = delimiters.get(index + 1).copied().unwrap_or(data.len());
        let segment = &data[delimiter + 1..segment_end];
        if segment.is_empty() {
            continue;
        }
        let code_byte = segment[0];
        if !code_byte.is_ascii() {
            warnings.push(DecodeWarning::SubfieldCodeNotAscii { tag: tag.clone() });
            continue;
        }
        let code = char::from(code_byte);
        match std::str::from_utf8(&segment[1..]) {
            Ok(value) => field.add_subfield(code, value),
            Err(_) => warnings.push(DecodeWarning::SubfieldNotUtf8 {
                tag: tag.clone(),
                code,
            }),
        }
    }
    field
}

/// Indicator at `position`, defaulting to space if absent or non-ASCII.
fn indicator_at(indicators: &[u8], position: usize) -> char {
    indicators
        .get(position)
        .copied()
        .filter(u8::is_ascii)
        .map_or(' ', char::from)
}

/// Parse leader positions 12-16 as a base address.
fn parse_base_address(bytes: &[u8]) -> Result<usize> {
    let text = std::str::from_utf8(bytes).map_err(|_| MarcError::BaseAddress)?;
    let value: i64 = text.trim().parse().map_err(|_| MarcError::BaseAddress)?;
    if value <= 0 {
        return Err(MarcError::BaseAddress);
    }
    usize::try_from(value).map_err(|_| MarcError::BaseAddress)
}

/// Parse a run of ASCII digits; `None` if any byte is not a digit.
fn parse_decimal(bytes: &[u8]) -> Option<usize> {
    let mut value = 0usize;
    for &byte in bytes {
        if !byte.is_ascii_digit() {
            return None;
        }
        value = value * 10 + usize::from(byte - b'0');
    }
    Some(value)
}

#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Module overview
//!
//! - [`record`] — Core record structures ([`Record`], [`Field`], [`Subfield`], [`Tag`])
//! - [`leader`] — The 24-character record leader
//! - [`decoder`] — Decoding binary records from in-memory buffers
//! - [`encoder`] — Encoding records back to the binary layout
//! - [`reader`] — Streaming reader over length-prefixed record files
//! - [`writer`] — Streaming writer producing the binary layout
//! - [`xml`] — MARC XML projection of decoded records
//! - [`escape`] — Idempotent text cleaning for XML output
//! - [`error`] — Error types and result alias
//!
//! The decode path is `bytes → Record → XML fragment`; the encode path is
//! `Record → bytes`. Both operate on one complete in-memory record at a
//! time with no shared state, so an external driver may freely process
//! distinct records on separate threads.

pub mod decoder;
pub mod encoder;
mod entities;
pub mod error;
pub mod escape;
pub mod leader;
pub mod reader;
/// Core record structures ([`Record`], [`Field`], [`Subfield`], [`Tag`])
pub mod record;
pub mod writer;
pub mod xml;

pub use decoder::{decode_record, DecodeWarning, DecodedRecord};
pub use encoder::encode_record;
pub use error::{MarcError, Result};
pub use escape::escape_text;
pub use leader::Leader;
pub use reader::MarcReader;
pub use record::{Field, Record, Subfield, Tag};
pub use writer::MarcWriter;
pub use xml::record_to_xml;

//! Error types for MARC codec operations.
//!
//! This module provides the [`MarcError`] type for all marclex operations
//! and the [`Result`] convenience type.
//!
//! Structural errors are all-or-nothing for the record being decoded: a
//! record either decodes completely or fails with the variant naming the
//! structural check that failed. Recoverable content problems (bad UTF-8 in
//! a single field or subfield) are reported as
//! [`DecodeWarning`](crate::decoder::DecodeWarning)s instead, never as errors.

use thiserror::Error;

/// Error type for all marclex operations.
///
/// The first six variants correspond to the structural checks performed
/// while framing and decoding a single binary record; their messages match
/// the diagnostics of the legacy conversion tooling this format comes from.
#[derive(Error, Debug)]
pub enum MarcError {
    /// Fewer than 5 bytes were available for a record's length prefix, or
    /// the prefix was not a decimal number.
    #[error("Invalid record length in first 5 bytes of record")]
    RecordLength,

    /// The record is shorter than 24 bytes or its leader is not ASCII.
    #[error("Error reading record leader")]
    Leader,

    /// The base address in leader positions 12-16 is missing, malformed,
    /// or not a positive number.
    #[error("Error locating base address of record")]
    BaseAddress,

    /// The base address points at or beyond the end of the record buffer.
    #[error("Base address exceeds size of record")]
    BaseAddressLength,

    /// The directory is not a whole number of 12-byte entries, or an entry
    /// holds a non-numeric length or offset.
    #[error("Record directory is invalid")]
    Directory,

    /// No field could be assembled from the record's directory.
    #[error("Error locating fields in record")]
    Fields,

    /// IO error from the underlying source/destination.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for [`std::result::Result`] with [`MarcError`].
pub type Result<T> = std::result::Result<T, MarcError>;

//! MARC record leader parsing and manipulation.
//!
//! The MARC leader is a 24-byte fixed-length field at the start of every
//! binary record. Apart from two computed subranges it is carried as opaque
//! text:
//!
//! - Positions 0-4: Record length (5 digits), recomputed on encode
//! - Positions 12-16: Base address of data (5 digits), recomputed on encode
//!
//! Two more subranges are pinned by legacy Aleph normalization whenever a
//! leader is constructed: positions 10-11 always read `"22"` (indicator and
//! subfield code counts) and positions 20-23 always read `"4500"`. Everything
//! else passes through encode and decode unchanged.

use crate::error::{MarcError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of the leader in bytes.
pub const LEADER_LENGTH: usize = 24;

/// MARC Leader - 24 ASCII characters at the start of every binary record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leader(String);

impl Leader {
    /// Create a leader from arbitrary text.
    ///
    /// The text is space-padded (or truncated) to exactly 24 characters and
    /// the fixed subranges are normalized: positions 10-11 become `"22"` and
    /// positions 20-23 become `"4500"`. Non-ASCII characters are replaced
    /// with spaces so positional slicing stays well defined.
    ///
    /// # Examples
    ///
    /// ```
    /// use marclex::Leader;
    ///
    /// let leader = Leader::new("00000nam a");
    /// assert_eq!(leader.as_str().len(), 24);
    /// assert_eq!(&leader.as_str()[10..12], "22");
    /// assert_eq!(&leader.as_str()[20..24], "4500");
    /// ```
    #[must_use]
    pub fn new(text: &str) -> Self {
        let cleaned: String = text
            .chars()
            .map(|c| if c.is_ascii() { c } else { ' ' })
            .collect();
        let padded = format!("{cleaned:<24}");
        Leader(format!(
            "{}22{}4500",
            &padded[0..10],
            &padded[12..20]
        ))
    }

    /// Parse a leader from the first 24 bytes of a record buffer.
    ///
    /// # Errors
    ///
    /// Returns [`MarcError::Leader`] if fewer than 24 bytes are available or
    /// the bytes are not valid ASCII.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < LEADER_LENGTH {
            return Err(MarcError::Leader);
        }
        let raw = &bytes[..LEADER_LENGTH];
        if !raw.is_ascii() {
            return Err(MarcError::Leader);
        }
        let text = std::str::from_utf8(raw).map_err(|_| MarcError::Leader)?;
        Ok(Leader::new(text))
    }

    /// The leader as a 24-character string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Record length from positions 0-4.
    ///
    /// # Errors
    ///
    /// Returns [`MarcError::RecordLength`] if the positions do not hold a
    /// decimal number.
    pub fn record_length(&self) -> Result<usize> {
        self.0[0..5]
            .trim()
            .parse()
            .map_err(|_| MarcError::RecordLength)
    }

    /// Base address of field data from positions 12-16.
    ///
    /// # Errors
    ///
    /// Returns [`MarcError::BaseAddress`] if the positions do not hold a
    /// positive decimal number. Checking the address against the actual
    /// buffer length is the decoder's job.
    pub fn base_address(&self) -> Result<usize> {
        let value: i64 = self.0[12..17]
            .trim()
            .parse()
            .map_err(|_| MarcError::BaseAddress)?;
        if value <= 0 {
            return Err(MarcError::BaseAddress);
        }
        Ok(usize::try_from(value).map_err(|_| MarcError::BaseAddress)?)
    }

    /// Rebuild the leader with freshly computed record length and base
    /// address.
    ///
    /// Only positions 0-4 and 12-16 change; positions 5-11 and 17-23 pass
    /// through from this leader unchanged.
    #[must_use]
    pub fn with_computed(&self, record_length: usize, base_address: usize) -> Self {
        Leader(format!(
            "{record_length:05}{}{base_address:05}{}",
            &self.0[5..12],
            &self.0[17..]
        ))
    }
}

impl Default for Leader {
    fn default() -> Self {
        Leader::new("")
    }
}

impl fmt::Display for Leader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

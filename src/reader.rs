//! Reading MARC records from binary streams.
//!
//! This module provides [`MarcReader`] for iterating over a stream of
//! concatenated binary records from any source that implements
//! [`std::io::Read`], such as an Aleph `.lex` export file.
//!
//! Each record in the stream starts with its own 5-byte ASCII decimal
//! length prefix (the first 5 bytes of the leader). The reader frames one
//! record at a time — prefix plus the remaining `length - 5` bytes — and
//! hands the complete buffer to [`decode_record`]. End of stream at a
//! record boundary is a clean end of iteration, not an error.
//!
//! # Examples
//!
//! Reading records from a file:
//!
//! ```ignore
//! use marclex::MarcReader;
//! use std::fs::File;
//!
//! let file = File::open("records.lex")?;
//! let mut reader = MarcReader::new(file);
//!
//! while let Some(decoded) = reader.read_record()? {
//!     println!("{} fields", decoded.record.fields.len());
//!     for warning in &decoded.warnings {
//!         eprintln!("warning: {warning}");
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::decoder::{decode_record, DecodedRecord};
use crate::error::{MarcError, Result};
use std::io::Read;

/// Length of the ASCII decimal record-length prefix.
const LENGTH_PREFIX: usize = 5;

/// Reader for streams of length-prefixed binary MARC records.
///
/// `MarcReader` owns its source and yields one [`DecodedRecord`] at a time.
/// Decoding is strictly per record: a structural error in one record does
/// not consume or corrupt the reader's position for a caller that chooses
/// to stop there.
#[derive(Debug)]
pub struct MarcReader<R: Read> {
    reader: R,
    records_read: usize,
}

impl<R: Read> MarcReader<R> {
    /// Create a new reader over any [`std::io::Read`] source.
    pub fn new(reader: R) -> Self {
        MarcReader {
            reader,
            records_read: 0,
        }
    }

    /// Read and decode the next record.
    ///
    /// Returns `Ok(Some(decoded))` for a record, `Ok(None)` at a clean end
    /// of stream (zero bytes where a length prefix would start).
    ///
    /// # Errors
    ///
    /// - [`MarcError::RecordLength`] — fewer than 5 prefix bytes remain, or
    ///   the prefix is not a decimal number
    /// - any [`decode_record`] structural error for the framed buffer
    /// - [`MarcError::Io`] — the underlying source failed
    pub fn read_record(&mut self) -> Result<Option<DecodedRecord>> {
        let mut prefix = [0u8; LENGTH_PREFIX];
        let got = read_fully(&mut self.reader, &mut prefix)?;
        if got == 0 {
            return Ok(None);
        }
        if got < LENGTH_PREFIX {
            return Err(MarcError::RecordLength);
        }

        let declared = std::str::from_utf8(&prefix)
            .ok()
            .and_then(|text| text.trim().parse::<usize>().ok())
            .ok_or(MarcError::RecordLength)?;
        if declared < LENGTH_PREFIX {
            return Err(MarcError::RecordLength);
        }

        // Read the rest of the record; a truncated tail surfaces as a
        // structural decode error on the short buffer.
        let mut buffer = prefix.to_vec();
        self.reader
            .by_ref()
            .take((declared - LENGTH_PREFIX) as u64)
            .read_to_end(&mut buffer)?;

        let decoded = decode_record(&buffer)?;
        self.records_read += 1;
        Ok(Some(decoded))
    }

    /// Number of records successfully read so far.
    #[must_use]
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Iterate over the remaining records.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// for decoded in reader.records() {
    ///     let decoded = decoded?;
    ///     // ...
    /// }
    /// ```
    pub fn records(&mut self) -> Records<'_, R> {
        Records { reader: self }
    }
}

/// Iterator over the records of a [`MarcReader`].
#[derive(Debug)]
pub struct Records<'a, R: Read> {
    reader: &'a mut MarcReader<R>,
}

impl<R: Read> Iterator for Records<'_, R> {
    type Item = Result<DecodedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_record().transpose()
    }
}

/// Fill `buf` from `reader`, returning how many bytes were read.
///
/// Stops early only at end of stream, so a short count means the stream
/// ended mid-buffer.
fn read_fully<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {},
            Err(e) => return Err(MarcError::Io(e)),
        }
    }
    Ok(filled)
}

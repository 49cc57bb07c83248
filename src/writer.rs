//! Writing MARC records to binary streams.
//!
//! This module provides [`MarcWriter`] for serializing [`Record`] instances
//! to the binary layout and writing them to any destination implementing
//! [`std::io::Write`]. Serialization itself lives in
//! [`encode_record`](crate::encoder::encode_record); the writer adds
//! stream plumbing and bookkeeping.
//!
//! # Examples
//!
//! ```ignore
//! use marclex::{Field, Leader, MarcWriter, Record, Tag};
//!
//! let mut record = Record::new(Leader::default());
//! let mut field = Field::data(Tag::new("245"), '1', '0');
//! field.add_subfield('a', "Title");
//! record.add_field(field);
//!
//! let mut buffer = Vec::new();
//! {
//!     let mut writer = MarcWriter::new(&mut buffer);
//!     writer.write_record(&record)?;
//!     writer.finish()?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::encoder::encode_record;
use crate::error::{MarcError, Result};
use crate::record::Record;
use std::io::Write;

/// Writer for streams of binary MARC records.
#[derive(Debug)]
pub struct MarcWriter<W: Write> {
    writer: W,
    records_written: usize,
    finished: bool,
}

impl<W: Write> MarcWriter<W> {
    /// Create a new writer over any [`std::io::Write`] destination.
    pub fn new(writer: W) -> Self {
        MarcWriter {
            writer,
            records_written: 0,
            finished: false,
        }
    }

    /// Serialize and write a single record.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer has been finished or the underlying
    /// destination fails.
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        if self.finished {
            return Err(MarcError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "cannot write to a finished writer",
            )));
        }
        self.writer.write_all(&encode_record(record))?;
        self.records_written += 1;
        Ok(())
    }

    /// Flush the destination and mark the writer finished.
    ///
    /// After calling `finish`, no more records can be written.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing the underlying destination fails.
    pub fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        self.finished = true;
        Ok(())
    }

    /// Number of records written so far.
    #[must_use]
    pub fn records_written(&self) -> usize {
        self.records_written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leader::Leader;
    use crate::reader::MarcReader;
    use crate::record::{Field, Tag};
    use std::io::Cursor;

    fn sample_record(title: &str) -> Record {
        let mut record = Record::new(Leader::default());
        record.add_field(Field::control(Tag::new("001"), "12345"));
        let mut field = Field::data(Tag::new("245"), '1', '0');
        field.add_subfield('a', title);
        record.add_field(field);
        record
    }

    #[test]
    fn test_write_and_read_back() {
        let mut buffer = Vec::new();
        {
            let mut writer = MarcWriter::new(&mut buffer);
            writer.write_record(&sample_record("Round trip")).unwrap();
            writer.finish().unwrap();
            assert_eq!(writer.records_written(), 1);
        }

        let mut reader = MarcReader::new(Cursor::new(buffer));
        let decoded = reader.read_record().unwrap().unwrap();
        assert_eq!(
            decoded.record.get_field("245").unwrap().get_subfield('a'),
            Some("Round trip")
        );
    }

    #[test]
    fn test_write_multiple_records() {
        let mut buffer = Vec::new();
        {
            let mut writer = MarcWriter::new(&mut buffer);
            for i in 0..3 {
                writer
                    .write_record(&sample_record(&format!("Title {i}")))
                    .unwrap();
            }
            assert_eq!(writer.records_written(), 3);
        }

        let mut reader = MarcReader::new(Cursor::new(buffer));
        assert_eq!(reader.records().map(Result::unwrap).count(), 3);
    }

    #[test]
    fn test_cannot_write_after_finish() {
        let mut buffer = Vec::new();
        let mut writer = MarcWriter::new(&mut buffer);
        writer.finish().unwrap();
        assert!(writer.write_record(&sample_record("Too late")).is_err());
    }
}

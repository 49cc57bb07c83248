//! Common test helpers shared across the test suite.

use marclex::{Field, Leader, Record, Tag};

pub const SUBFIELD_DELIMITER: u8 = 0x1F;
pub const FIELD_TERMINATOR: u8 = 0x1E;
pub const RECORD_TERMINATOR: u8 = 0x1D;

/// Creates a record with one control field and one title field.
#[allow(dead_code)]
pub fn create_test_record(title: &str) -> Record {
    let mut record = Record::new(Leader::default());
    record.add_field(Field::control(Tag::new("001"), "12345"));

    let mut field = Field::data(Tag::new("245"), '1', '0');
    field.add_subfield('a', title);
    record.add_field(field);
    record
}

/// Hand-assembles a well-formed binary record from (tag, body) pairs.
///
/// Bodies are the serialized field content without the trailing field
/// terminator; the helper computes the directory, base address, and record
/// length the same way a conforming producer would.
#[allow(dead_code)]
pub fn build_record_bytes(fields: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut directory = Vec::new();
    let mut data = Vec::new();
    for (tag, body) in fields {
        let start = data.len();
        data.extend_from_slice(body);
        data.push(FIELD_TERMINATOR);
        directory.extend_from_slice(tag.as_bytes());
        directory.extend_from_slice(format!("{:04}", body.len() + 1).as_bytes());
        directory.extend_from_slice(format!("{start:05}").as_bytes());
    }
    directory.push(FIELD_TERMINATOR);
    data.push(RECORD_TERMINATOR);

    let base_address = 24 + directory.len();
    let record_length = base_address + data.len();
    let mut buffer = format!("{record_length:05}nam a22{base_address:05}   4500").into_bytes();
    buffer.extend_from_slice(&directory);
    buffer.extend_from_slice(&data);
    buffer
}

/// Serializes a data field body: indicators then delimited subfields.
#[allow(dead_code)]
pub fn data_field_body(indicators: &str, subfields: &[(char, &str)]) -> Vec<u8> {
    let mut body = indicators.as_bytes().to_vec();
    for (code, value) in subfields {
        body.push(SUBFIELD_DELIMITER);
        let mut buf = [0u8; 4];
        body.extend_from_slice(code.encode_utf8(&mut buf).as_bytes());
        body.extend_from_slice(value.as_bytes());
    }
    body
}

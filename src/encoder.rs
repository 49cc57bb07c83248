//! Encoding records back to binary MARC format.
//!
//! [`encode_record`] is the structural inverse of
//! [`decode_record`](crate::decoder::decode_record): it serializes every
//! field in document order, rebuilds the directory in lock-step, and
//! recomputes the leader's record length and base address. Re-decoding the
//! output yields a field-for-field equal record; byte identity with the
//! original input is not guaranteed because lengths and offsets are always
//! recomputed, never trusted from a prior encode.

use crate::decoder::{FIELD_TERMINATOR, RECORD_TERMINATOR, SUBFIELD_DELIMITER};
use crate::leader::LEADER_LENGTH;
use crate::record::{Field, Record};

/// Serialize a record to its binary layout:
/// `leader + directory + field data`.
///
/// Each field contributes its serialized bytes to the data area and one
/// 12-byte directory entry recording its tag, byte length (4 digits), and
/// running offset (5 digits). The directory gains a terminator byte, the
/// data area a record terminator, and the leader is rebuilt around the
/// computed base address and record length.
///
/// # Examples
///
/// ```ignore
/// use marclex::{encode_record, decode_record};
///
/// let decoded = decode_record(&buffer)?;
/// let bytes = encode_record(&decoded.record);
/// assert_eq!(decode_record(&bytes)?.record.fields, decoded.record.fields);
/// ```
#[must_use]
pub fn encode_record(record: &Record) -> Vec<u8> {
    let mut directory = Vec::new();
    let mut data = Vec::new();

    for field in record.fields() {
        let start = data.len();
        append_field(&mut data, field);
        data.push(FIELD_TERMINATOR);
        let length = data.len() - start;

        directory.extend_from_slice(field.tag().as_str().as_bytes());
        directory.extend_from_slice(format!("{length:04}").as_bytes());
        directory.extend_from_slice(format!("{start:05}").as_bytes());
    }

    directory.push(FIELD_TERMINATOR);
    data.push(RECORD_TERMINATOR);

    let base_address = LEADER_LENGTH + directory.len();
    let record_length = base_address + data.len();
    let leader = record.leader.with_computed(record_length, base_address);

    let mut output = Vec::with_capacity(record_length);
    output.extend_from_slice(leader.as_str().as_bytes());
    output.extend_from_slice(&directory);
    output.extend_from_slice(&data);
    output
}

/// Serialize one field's content (without its terminator byte).
fn append_field(data: &mut Vec<u8>, field: &Field) {
    match field {
        Field::Control { data: payload, .. } => {
            data.extend_from_slice(payload.as_bytes());
        },
        Field::Data {
            indicator1,
            indicator2,
            subfields,
            ..
        } => {
            push_char(data, *indicator1);
            push_char(data, *indicator2);
            for subfield in subfields {
                data.push(SUBFIELD_DELIMITER);
                push_char(data, subfield.code);
                data.extend_from_slice(subfield.value.as_bytes());
            }
        },
    }
}

/// Append one character as UTF-8.
fn push_char(data: &mut Vec<u8>, ch: char) {
    let mut buf = [0u8; 4];
    data.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode_record;
    use crate::leader::Leader;
    use crate::record::Tag;

    fn sample_record() -> Record {
        let mut record = Record::new(Leader::new("00000nam a2200000   4500"));
        record.add_field(Field::control(Tag::new("001"), "12345"));
        record.add_field(Field::control(Tag::new("008"), "200101s2020"));

        let mut title = Field::data(Tag::new("245"), '1', '0');
        title.add_subfield('a', "Test title");
        title.add_subfield('c', "An Author");
        record.add_field(title);
        record
    }

    #[test]
    fn test_encode_structure() {
        let record = sample_record();
        let bytes = encode_record(&record);

        // Three directory entries plus terminator, then field data.
        let base_address = LEADER_LENGTH + 3 * 12 + 1;
        assert_eq!(&bytes[12..17], format!("{base_address:05}").as_bytes());
        assert_eq!(&bytes[0..5], format!("{:05}", bytes.len()).as_bytes());
        assert_eq!(bytes[base_address - 1], FIELD_TERMINATOR);
        assert_eq!(*bytes.last().unwrap(), RECORD_TERMINATOR);

        // First directory entry: field 001, 6 bytes, offset 0.
        assert_eq!(&bytes[24..36], b"001000600000");
    }

    #[test]
    fn test_encode_preserves_leader_passthrough_ranges() {
        let record = sample_record();
        let bytes = encode_record(&record);
        assert_eq!(&bytes[5..12], b"nam a22");
        assert_eq!(&bytes[17..24], b"   4500");
    }

    #[test]
    fn test_roundtrip_field_for_field() {
        let record = sample_record();
        let bytes = encode_record(&record);
        let decoded = decode_record(&bytes).unwrap();

        assert!(decoded.warnings.is_empty());
        assert_eq!(decoded.record.fields, record.fields);
    }

    #[test]
    fn test_reencode_is_stable() {
        let record = sample_record();
        let first = encode_record(&record);
        let decoded = decode_record(&first).unwrap();
        let second = encode_record(&decoded.record);
        assert_eq!(first, second);
    }

    #[test]
    fn test_roundtrip_with_interleaved_repeated_tags() {
        let mut record = Record::new(Leader::default());
        let mut subject1 = Field::data(Tag::new("650"), ' ', '0');
        subject1.add_subfield('a', "First subject");
        record.add_field(subject1);
        record.add_field(Field::control(Tag::new("001"), "id"));
        let mut subject2 = Field::data(Tag::new("650"), ' ', '0');
        subject2.add_subfield('a', "Second subject");
        record.add_field(subject2);

        let decoded = decode_record(&encode_record(&record)).unwrap();
        let tags: Vec<&str> = decoded
            .record
            .fields()
            .map(|f| f.tag().as_str())
            .collect();
        assert_eq!(tags, vec!["650", "001", "650"]);
    }

    #[test]
    fn test_roundtrip_multibyte_subfield_values() {
        let mut record = Record::new(Leader::default());
        let mut field = Field::data(Tag::new("880"), '1', '0');
        field.add_subfield('6', "245-01");
        field.add_subfield('a', "Капитанская дочка");
        record.add_field(field);

        let decoded = decode_record(&encode_record(&record)).unwrap();
        assert_eq!(
            decoded.record.fields[0].get_subfield('a'),
            Some("Капитанская дочка")
        );
    }

    #[test]
    fn test_encode_aleph_control_tags() {
        let mut record = Record::new(Leader::default());
        record.add_field(Field::control(Tag::new("SYS"), "000012345"));
        let bytes = encode_record(&record);
        let decoded = decode_record(&bytes).unwrap();
        assert_eq!(decoded.record.fields[0].control_data(), Some("000012345"));
        assert!(decoded.record.fields[0].is_control());
    }
}

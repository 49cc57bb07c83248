//! XML projection of MARC records.
//!
//! This module renders a decoded [`Record`] as a MARC XML fragment in the
//! MARC21-slim shape: one `<marc:record>` element holding a
//! `<marc:leader>`, then one `<marc:controlfield>` or `<marc:datafield>`
//! per field in document order, with `<marc:subfield>` children in original
//! subfield order. Nothing is reordered or deduplicated.
//!
//! All text content runs through [`escape_text`](crate::escape::escape_text)
//! and attribute values are XML-escaped, so fragments are safe to embed
//! regardless of what the source record held.
//!
//! Document-level wrapping is the caller's concern; [`COLLECTION_START`] and
//! [`COLLECTION_END`] provide the standard collection envelope for callers
//! that concatenate fragments into a file.
//!
//! # Examples
//!
//! ```ignore
//! use marclex::xml::{record_to_xml, COLLECTION_START, COLLECTION_END};
//!
//! let mut output = String::from(COLLECTION_START);
//! output.push_str(&record_to_xml(&record));
//! output.push_str(COLLECTION_END);
//! ```

use std::fmt::Write;

use crate::escape::escape_text;
use crate::record::{Field, Record};

/// XML declaration and opening `<marc:collection>` element.
pub const COLLECTION_START: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
    <marc:collection xmlns:marc=\"http://www.loc.gov/MARC21/slim\" \
    xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
    xsi:schemaLocation=\"http://www.loc.gov/MARC21/slim \
    http://www.loc.gov/standards/marcxml/schema/MARC21slim.xsd\">\n";

/// Closing `</marc:collection>` element.
pub const COLLECTION_END: &str = "</marc:collection>\n";

/// Render one record as a `<marc:record>` XML fragment.
///
/// Fields appear in document order; subfields in original order. Control
/// fields render as `<marc:controlfield tag="…">`, data fields as
/// `<marc:datafield tag="…" ind1="…" ind2="…">` with one
/// `<marc:subfield code="…">` child per subfield.
#[must_use]
pub fn record_to_xml(record: &Record) -> String {
    let mut xml = String::from("  <marc:record>\n");
    let _ = writeln!(
        xml,
        "    <marc:leader>{}</marc:leader>",
        escape_text(record.leader.as_str())
    );
    for field in record.fields() {
        write_field(&mut xml, field);
    }
    xml.push_str("  </marc:record>\n");
    xml
}

fn write_field(xml: &mut String, field: &Field) {
    match field {
        Field::Control { tag, data } => {
            let _ = writeln!(
                xml,
                "    <marc:controlfield tag=\"{}\">{}</marc:controlfield>",
                escape_attribute(tag.as_str()),
                escape_text(data)
            );
        },
        Field::Data {
            tag,
            indicator1,
            indicator2,
            subfields,
        } => {
            let _ = writeln!(
                xml,
                "    <marc:datafield tag=\"{}\" ind1=\"{}\" ind2=\"{}\">",
                escape_attribute(tag.as_str()),
                escape_attribute(&indicator1.to_string()),
                escape_attribute(&indicator2.to_string())
            );
            for subfield in subfields {
                let _ = writeln!(
                    xml,
                    "      <marc:subfield code=\"{}\">{}</marc:subfield>",
                    escape_attribute(&subfield.code.to_string()),
                    escape_text(&subfield.value)
                );
            }
            xml.push_str("    </marc:datafield>\n");
        },
    }
}

/// Escape an attribute value.
///
/// Attributes hold tags, indicators, and subfield codes; they never carry
/// entity-encoded legacy text, so plain XML escaping suffices here.
fn escape_attribute(value: &str) -> String {
    quick_xml::escape::escape(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leader::Leader;
    use crate::record::Tag;

    fn sample_record() -> Record {
        let mut record = Record::new(Leader::new("00123nam a2200049   4500"));
        record.add_field(Field::control(Tag::new("001"), "12345"));
        let mut title = Field::data(Tag::new("245"), '1', '0');
        title.add_subfield('a', "Test title");
        title.add_subfield('c', "An Author");
        record.add_field(title);
        record
    }

    #[test]
    fn test_fragment_shape() {
        let xml = record_to_xml(&sample_record());

        assert!(xml.starts_with("  <marc:record>\n"));
        assert!(xml.ends_with("  </marc:record>\n"));
        assert_eq!(xml.matches("<marc:leader>").count(), 1);
        assert!(xml.contains("<marc:leader>00123nam a2200049   4500</marc:leader>"));
        assert!(xml.contains("<marc:controlfield tag=\"001\">12345</marc:controlfield>"));
        assert!(xml.contains("<marc:datafield tag=\"245\" ind1=\"1\" ind2=\"0\">"));
        assert!(xml.contains("<marc:subfield code=\"a\">Test title</marc:subfield>"));
        assert!(xml.contains("<marc:subfield code=\"c\">An Author</marc:subfield>"));
    }

    #[test]
    fn test_field_and_subfield_order_preserved() {
        let mut record = Record::new(Leader::default());
        let mut subject1 = Field::data(Tag::new("650"), ' ', '0');
        subject1.add_subfield('a', "First");
        record.add_field(subject1);
        record.add_field(Field::control(Tag::new("001"), "id"));
        let mut subject2 = Field::data(Tag::new("650"), ' ', '0');
        subject2.add_subfield('a', "Second");
        record.add_field(subject2);

        let xml = record_to_xml(&record);
        let first = xml.find("First").unwrap();
        let control = xml.find("tag=\"001\"").unwrap();
        let second = xml.find("Second").unwrap();
        assert!(first < control && control < second);
    }

    #[test]
    fn test_duplicate_subfields_not_deduplicated() {
        let mut record = Record::new(Leader::default());
        let mut field = Field::data(Tag::new("700"), '1', ' ');
        field.add_subfield('a', "Same value");
        field.add_subfield('a', "Same value");
        record.add_field(field);

        let xml = record_to_xml(&record);
        assert_eq!(xml.matches("Same value").count(), 2);
    }

    #[test]
    fn test_text_content_is_escaped() {
        let mut record = Record::new(Leader::default());
        let mut field = Field::data(Tag::new("245"), '0', '0');
        field.add_subfield('a', "Alice & Bob <eds.>");
        record.add_field(field);
        record.add_field(Field::control(Tag::new("001"), "a&b"));

        let xml = record_to_xml(&record);
        assert!(xml.contains("Alice &amp; Bob &lt;eds.&gt;"));
        assert!(xml.contains(">a&amp;b</marc:controlfield>"));
    }

    #[test]
    fn test_pre_escaped_text_not_double_escaped() {
        let mut record = Record::new(Leader::default());
        let mut field = Field::data(Tag::new("245"), '0', '0');
        field.add_subfield('a', "Dombey &amp; Son");
        record.add_field(field);

        let xml = record_to_xml(&record);
        assert!(xml.contains("Dombey &amp; Son"));
        assert!(!xml.contains("&amp;amp;"));
    }

    #[test]
    fn test_aleph_control_field_rendered_as_controlfield() {
        let mut record = Record::new(Leader::default());
        record.add_field(Field::control(Tag::new("SYS"), "000012345"));

        let xml = record_to_xml(&record);
        assert!(xml.contains("<marc:controlfield tag=\"SYS\">000012345</marc:controlfield>"));
        assert!(!xml.contains("<marc:datafield tag=\"SYS\""));
    }

    #[test]
    fn test_collection_envelope() {
        assert!(COLLECTION_START.starts_with("<?xml version=\"1.0\""));
        assert!(COLLECTION_START.contains("xmlns:marc=\"http://www.loc.gov/MARC21/slim\""));
        assert!(COLLECTION_END.contains("</marc:collection>"));
    }
}

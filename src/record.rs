//! MARC bibliographic record structures and operations.
//!
//! This module provides the core record types:
//! - [`Record`] — one bibliographic record: a leader plus fields in document order
//! - [`Field`] — a control field (opaque payload) or a data field
//!   (indicators plus subfields), decided once by its tag
//! - [`Subfield`] — named data element within a data field
//! - [`Tag`] — fixed-width three-character field tag
//!
//! Fields are stored as a flat ordered sequence, preserving the order in
//! which they appear in the source record even when tags interleave. This is
//! load-bearing for round-trip fidelity and for XML projection, which must
//! never reorder or deduplicate fields.
//!
//! # Examples
//!
//! ```ignore
//! use marclex::{Field, Leader, Record, Tag};
//!
//! let mut record = Record::new(Leader::default());
//! record.add_field(Field::control(Tag::new("001"), "12345"));
//!
//! let mut field = Field::data(Tag::new("245"), '1', '0');
//! field.add_subfield('a', "Title");
//! record.add_field(field);
//!
//! for field in record.fields() {
//!     println!("{}", field.tag());
//! }
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::leader::Leader;

/// Tags carried by Aleph system fields that hold control-style payloads
/// despite not being numeric tags below 010.
pub const ALEPH_CONTROL_TAGS: [&str; 2] = ["DB ", "SYS"];

/// Width of a field tag in characters.
pub const TAG_LENGTH: usize = 3;

/// A MARC field tag, normalized to exactly three characters.
///
/// Shorter tags are right-padded with spaces and longer tags truncated, so
/// the control-field test can compare tags as fixed-width strings. The tag
/// alone determines whether a field is a control field or a data field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag(String);

impl Tag {
    /// Create a tag, normalizing to exactly three characters.
    ///
    /// # Examples
    ///
    /// ```
    /// use marclex::Tag;
    ///
    /// assert_eq!(Tag::new("245").as_str(), "245");
    /// assert_eq!(Tag::new("DB").as_str(), "DB ");
    /// ```
    #[must_use]
    pub fn new(tag: &str) -> Self {
        let mut normalized: String = tag.chars().take(TAG_LENGTH).collect();
        while normalized.chars().count() < TAG_LENGTH {
            normalized.push(' ');
        }
        Tag(normalized)
    }

    /// The tag as a three-character string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this tag denotes a control field.
    ///
    /// Control tags are purely numeric and lexicographically below `"010"`
    /// (001-009), or one of the Aleph system tags in
    /// [`ALEPH_CONTROL_TAGS`]. The comparison is a fixed-width string
    /// comparison, not numeric.
    ///
    /// # Examples
    ///
    /// ```
    /// use marclex::Tag;
    ///
    /// assert!(Tag::new("001").is_control());
    /// assert!(Tag::new("SYS").is_control());
    /// assert!(!Tag::new("010").is_control());
    /// assert!(!Tag::new("245").is_control());
    /// ```
    #[must_use]
    pub fn is_control(&self) -> bool {
        if self.0.bytes().all(|b| b.is_ascii_digit()) && self.0.as_str() < "010" {
            return true;
        }
        ALEPH_CONTROL_TAGS.contains(&self.0.as_str())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Tag {
    fn from(tag: &str) -> Self {
        Tag::new(tag)
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A subfield within a data field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subfield {
    /// Subfield code (single character)
    pub code: char,
    /// Subfield value
    pub value: String,
}

/// A field in a MARC record.
///
/// The variant is derived solely from the tag when the field is constructed
/// and is never stored separately, so a field cannot desynchronize from its
/// tag's classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    /// A control field (numeric tag below 010, or an Aleph system tag):
    /// one opaque text payload, no indicators, no subfields.
    Control {
        /// Field tag
        tag: Tag,
        /// Opaque field payload
        data: String,
    },
    /// A data field: two single-character indicators and an ordered,
    /// repeatable sequence of subfields.
    Data {
        /// Field tag
        tag: Tag,
        /// First indicator
        indicator1: char,
        /// Second indicator
        indicator2: char,
        /// Subfields in original order; codes may repeat
        subfields: SmallVec<[Subfield; 4]>,
    },
}

impl Field {
    /// Create a control field with the given payload.
    #[must_use]
    pub fn control(tag: Tag, data: &str) -> Self {
        Field::Control {
            tag,
            data: data.to_string(),
        }
    }

    /// Create a data field with the given indicators and no subfields.
    #[must_use]
    pub fn data(tag: Tag, indicator1: char, indicator2: char) -> Self {
        Field::Data {
            tag,
            indicator1,
            indicator2,
            subfields: SmallVec::new(),
        }
    }

    /// The field's tag.
    #[must_use]
    pub fn tag(&self) -> &Tag {
        match self {
            Field::Control { tag, .. } | Field::Data { tag, .. } => tag,
        }
    }

    /// Whether this is a control field.
    #[must_use]
    pub fn is_control(&self) -> bool {
        matches!(self, Field::Control { .. })
    }

    /// The control payload, or `None` for data fields.
    #[must_use]
    pub fn control_data(&self) -> Option<&str> {
        match self {
            Field::Control { data, .. } => Some(data),
            Field::Data { .. } => None,
        }
    }

    /// The two indicators, or `None` for control fields.
    #[must_use]
    pub fn indicators(&self) -> Option<(char, char)> {
        match self {
            Field::Control { .. } => None,
            Field::Data {
                indicator1,
                indicator2,
                ..
            } => Some((*indicator1, *indicator2)),
        }
    }

    /// Append a subfield to a data field.
    ///
    /// Control fields have no subfields; calling this on a control field
    /// does nothing.
    pub fn add_subfield(&mut self, code: char, value: &str) {
        if let Field::Data { subfields, .. } = self {
            subfields.push(Subfield {
                code,
                value: value.to_string(),
            });
        }
    }

    /// Subfields in original order.
    ///
    /// Control fields yield an empty slice.
    #[must_use]
    pub fn subfields(&self) -> &[Subfield] {
        match self {
            Field::Control { .. } => &[],
            Field::Data { subfields, .. } => subfields,
        }
    }

    /// First value for a subfield code.
    #[must_use]
    pub fn get_subfield(&self, code: char) -> Option<&str> {
        self.subfields()
            .iter()
            .find(|sf| sf.code == code)
            .map(|sf| sf.value.as_str())
    }

    /// All values for a subfield code, in original order.
    ///
    /// Repeated codes are preserved, which matters for repeatable subfields
    /// such as multiple authors.
    #[must_use]
    pub fn get_subfields(&self, code: char) -> Vec<&str> {
        self.subfields()
            .iter()
            .filter(|sf| sf.code == code)
            .map(|sf| sf.value.as_str())
            .collect()
    }
}

/// A MARC bibliographic record.
///
/// Fields are held in document order. A record owns its fields exclusively;
/// fields are appended during decoding (or programmatic construction) and
/// the record is discarded after projection or re-encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Record leader (24 characters)
    pub leader: Leader,
    /// Fields in document order
    pub fields: Vec<Field>,
}

impl Record {
    /// Create an empty record with the given leader.
    #[must_use]
    pub fn new(leader: Leader) -> Self {
        Record {
            leader,
            fields: Vec::new(),
        }
    }

    /// Append a field, preserving document order.
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Iterate over all fields in document order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// All fields matching a tag, in document order.
    ///
    /// A lookup additionally matches any field tagged `"880"` (alternate
    /// graphic representation) whose subfield `6` begins with the requested
    /// tag. The linkage is resolved at lookup time; nothing is stored on
    /// either field.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // An 880 field with $6 "245-01" is returned by a lookup for "245".
    /// for field in record.get_fields("245") {
    ///     println!("{}", field.tag());
    /// }
    /// ```
    #[must_use]
    pub fn get_fields(&self, tag: &str) -> Vec<&Field> {
        let wanted = Tag::new(tag);
        self.fields
            .iter()
            .filter(|field| {
                if *field.tag() == wanted {
                    return true;
                }
                field.tag().as_str() == "880"
                    && field
                        .get_subfield('6')
                        .is_some_and(|linkage| linkage.starts_with(wanted.as_str()))
            })
            .collect()
    }

    /// First field matching a tag (880 linkage included), if any.
    #[must_use]
    pub fn get_field(&self, tag: &str) -> Option<&Field> {
        self.get_fields(tag).into_iter().next()
    }

    /// Whether any field matches a tag (880 linkage included).
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        !self.get_fields(tag).is_empty()
    }
}

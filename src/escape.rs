//! Escaping of field text for XML output.
//!
//! Legacy bibliographic data arrives in mixed states: some values carry raw
//! reserved characters, some are already entity-encoded, some are encoded
//! twice, and combining characters may or may not be composed. The
//! [`escape_text`] pipeline funnels all of these into one canonical form:
//!
//! 1. decode existing named or numeric character entities,
//! 2. normalize to Unicode NFC,
//! 3. decode entities a second time (for doubly encoded input),
//! 4. escape the five XML-significant characters,
//! 5. re-normalize to NFC.
//!
//! Running the pipeline on its own output changes nothing, so records that
//! pass through the converter repeatedly do not accumulate `&amp;amp;…`
//! chains. Entity-shaped substrings that do not parse are left verbatim;
//! the function never fails.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use unicode_normalization::UnicodeNormalization;

use crate::entities;

lazy_static! {
    /// Anything shaped like a character entity: `&name;`, `&#123;`, `&#x1F;`.
    static ref ENTITY: Regex = Regex::new(r"&#?\w+;").expect("entity pattern is valid");
}

/// Convert arbitrary text into XML-safe character data.
///
/// Total over all inputs: malformed entities pass through unchanged and the
/// empty string maps to the empty string. The result contains no bare `&`,
/// `<`, `>`, `"`, or `'`.
///
/// # Examples
///
/// ```
/// use marclex::escape::escape_text;
///
/// assert_eq!(escape_text("Dombey & Son"), "Dombey &amp; Son");
/// assert_eq!(escape_text("Dombey &amp; Son"), "Dombey &amp; Son");
/// assert_eq!(escape_text("&eacute;tude"), "\u{00e9}tude");
/// ```
#[must_use]
pub fn escape_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let decoded = decode_entities(text);
    let composed: String = decoded.nfc().collect();
    let decoded = decode_entities(&composed);
    let escaped = quick_xml::escape::escape(decoded.as_ref());
    escaped.nfc().collect()
}

/// Replace every parseable character entity in `text` with its character.
///
/// `&#NNN;` and `&#xHHH;` resolve through their numeric value; `&name;`
/// resolves through the named-entity table. Anything that fails to parse is
/// reproduced verbatim.
fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures<'_>| {
            let entity = &caps[0];
            match decode_entity(entity) {
                Some(ch) => ch.to_string(),
                None => entity.to_string(),
            }
        })
        .into_owned()
}

/// Decode one `&…;` substring, or `None` if it does not denote a character.
fn decode_entity(entity: &str) -> Option<char> {
    let body = &entity[1..entity.len() - 1];
    if let Some(reference) = body.strip_prefix('#') {
        let code = if let Some(hex) = reference
            .strip_prefix('x')
            .or_else(|| reference.strip_prefix('X'))
        {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            reference.parse::<u32>().ok()?
        };
        char::from_u32(code)
    } else {
        entities::lookup(body)
    }
}

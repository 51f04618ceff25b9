//! Decoding of the notes block (tag 6)

use std::collections::HashMap;

use crate::error::Result;
use crate::markup::Element;

/// Decodes a notes payload into a mapping of note name to text.
///
/// The root element is only a wrapper. Each of its child elements becomes one entry,
/// keyed by element name; a repeated name replaces the earlier value.
pub fn parse_notes(payload: &[u8]) -> Result<HashMap<String, String>> {
    let root = Element::parse(payload)?;
    Ok(root
        .elements()
        .map(|note| (note.name.clone(), note.inner_text()))
        .collect())
}

//! Decoding of the features block (tag 10)
//!
//! The payload is a `<Features>` document holding one `<Feature>` element per
//! annotation. Each feature has `<Segment>` children carrying the positions and
//! `<Q>` qualifier children carrying named values:
//!
//! ```xml
//! <Features nextValidID="2">
//!   <Feature recentID="0" name="lac operator" type="protein_bind" directionality="1">
//!     <Segment range="298-303" color="#a6acb3" type="standard"/>
//!     <Q name="label"><V text="lacO"/></Q>
//!     <Q name="codon_start"><V int="1"/></Q>
//!   </Feature>
//! </Features>
//! ```

use std::collections::HashMap;

use crate::error::{FormatError, Result};
use crate::markup::Element;
use crate::range::parse_range;
use crate::record::{Feature, FeatureSegment};

const ROOT: &str = "Features";

/// Decodes a features payload into features in document order.
///
/// A malformed segment range fails the whole payload.
pub fn parse_features(payload: &[u8]) -> Result<Vec<Feature>> {
    let root = Element::parse(payload)?;
    if root.name != ROOT {
        return Err(FormatError::UnexpectedRoot {
            expected: ROOT,
            found: root.name,
        }
        .into());
    }
    root.elements_named("Feature").map(feature_from).collect()
}

fn feature_from(element: &Element) -> Result<Feature> {
    let segments = element
        .elements_named("Segment")
        .map(segment_from)
        .collect::<Result<Vec<_>>>()?;

    let mut qualifiers = HashMap::new();
    for q in element.elements_named("Q") {
        let (name, value) = qualifier_from(q)?;
        qualifiers.insert(name, value);
    }

    let name = element.attr("name").unwrap_or_default().to_string();
    let label = qualifiers
        .get("label")
        .cloned()
        .unwrap_or_else(|| name.clone());

    // Multi-segment features keep the first segment's span, not the union.
    let (start, end) = segments.first().map_or((0, 0), |s| (s.start, s.end));

    let opt = |key: &str| element.attr(key).map(str::to_string);
    Ok(Feature {
        feature_type: element.attr("type").unwrap_or_default().to_string(),
        name,
        label,
        start,
        end,
        segments,
        qualifiers,
        recent_id: opt("recentID"),
        directionality: opt("directionality"),
        translation_mw: opt("translationMW"),
        swapped_segment_numbering: opt("swappedSegmentNumbering"),
        allow_segment_overlaps: opt("allowSegmentOverlaps"),
        cleavage_arrows: opt("cleavageArrows"),
        reading_frame: opt("readingFrame"),
        consecutive_translation_numbering: opt("consecutiveTranslationNumbering"),
        hits_stop_codon: opt("hitsStopCodon"),
        detection_mode: opt("detectionMode"),
    })
}

fn segment_from(element: &Element) -> Result<FeatureSegment> {
    let (start, end) = parse_range(element.attr("range").unwrap_or_default())?;
    Ok(FeatureSegment {
        name: element.attr("name").map(str::to_string),
        color: element.attr("color").unwrap_or_default().to_string(),
        segment_type: element.attr("type").map(str::to_string),
        start,
        end,
        is_translated: element.attr("translated") == Some("1"),
    })
}

/// Resolves a qualifier to its name and text form.
///
/// A `text` value is used as-is; otherwise an `int` value is rendered in decimal. When a
/// qualifier holds several values the last one wins.
fn qualifier_from(element: &Element) -> Result<(String, String)> {
    let name = element.attr("name").unwrap_or_default().to_string();
    let mut value = String::new();
    for v in element.elements_named("V") {
        if let Some(text) = v.attr("text") {
            value = text.to_string();
        } else if let Some(int) = v.attr("int") {
            let parsed: i64 = int.parse().map_err(|_| FormatError::InvalidQualifierInt {
                name: name.clone(),
                value: int.to_string(),
            })?;
            value = itoa::Buffer::new().format(parsed).to_string();
        }
    }
    Ok((name, value))
}

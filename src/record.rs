//! Decoded representation of a container
//!
//! A [`Record`] is built up block by block while the stream is read and handed to the
//! caller once the stream is exhausted.

use std::collections::HashMap;
use std::fmt;

use crate::header::Meta;

/// Whether the molecule is circular or linear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Topology {
    #[default]
    Linear,
    Circular,
}
impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Circular => write!(f, "circular"),
        }
    }
}

/// Whether the molecule is single or double stranded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Strandedness {
    #[default]
    Single,
    Double,
}
impl fmt::Display for Strandedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::Double => write!(f, "double"),
        }
    }
}

/// Physical properties of the stored sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct SequenceProperties {
    pub topology: Topology,
    pub stranded: Strandedness,
    pub a_methylated: bool,
    pub c_methylated: bool,
    pub ki_methylated: bool,

    /// Number of sequence bytes in the block
    pub length: u32,
}

/// A sub-span of a feature
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeatureSegment {
    pub name: Option<String>,
    pub color: String,

    /// Optional segment type marker (e.g. "standard" or "gap")
    pub segment_type: Option<String>,
    pub start: u64,
    pub end: u64,
    pub is_translated: bool,
}

/// A positioned, qualified annotation on the sequence
///
/// The optional string fields are carried verbatim from the source attributes and are
/// `None` when the attribute is absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Feature {
    pub name: String,

    /// Feature type (e.g. "CDS", "RBS", "promoter")
    pub feature_type: String,

    /// The `label` qualifier if present, otherwise `name`
    pub label: String,

    /// Start of the first segment, or 0 if there are no segments
    pub start: u64,

    /// End of the first segment, or 0 if there are no segments
    pub end: u64,

    pub segments: Vec<FeatureSegment>,
    pub qualifiers: HashMap<String, String>,

    pub recent_id: Option<String>,
    pub directionality: Option<String>,
    pub translation_mw: Option<String>,
    pub swapped_segment_numbering: Option<String>,
    pub allow_segment_overlaps: Option<String>,
    pub cleavage_arrows: Option<String>,
    pub reading_frame: Option<String>,
    pub consecutive_translation_numbering: Option<String>,
    pub hits_stop_codon: Option<String>,
    pub detection_mode: Option<String>,
}
impl Feature {
    /// Returns the value of a qualifier by name
    #[must_use]
    pub fn qualifier(&self, name: &str) -> Option<&str> {
        self.qualifiers.get(name).map(String::as_str)
    }
}

/// The fully decoded contents of a container
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    /// Identifier of the input this record was decoded from (e.g. a file path)
    pub source: String,

    /// Sequence letters exactly as stored
    pub sequence: Vec<u8>,
    pub properties: SequenceProperties,
    pub meta: Meta,

    /// Free-form notes, `None` if the container has no notes block
    pub notes: Option<HashMap<String, String>>,

    /// Features in document order
    pub features: Vec<Feature>,
}
impl Record {
    #[must_use]
    pub fn new(source: impl Into<String>, meta: Meta) -> Self {
        Self {
            source: source.into(),
            meta,
            ..Default::default()
        }
    }

    /// Returns the sequence as a string slice if it is valid UTF-8
    pub fn sequence_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.sequence)
    }

    /// Returns the value of a note by name
    #[must_use]
    pub fn note(&self, name: &str) -> Option<&str> {
        self.notes.as_ref()?.get(name).map(String::as_str)
    }

    /// Returns true if the molecule is circular
    #[must_use]
    pub fn is_circular(&self) -> bool {
        self.properties.topology == Topology::Circular
    }
}

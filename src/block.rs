//! Block framing
//!
//! After the header the body is a run of blocks, each a one-byte tag, a big-endian
//! `u32` payload length and the payload itself:
//!
//! ```text
//! ┌─────┬────────────┬──────────────────────┐
//! │ tag │ u32 length │ payload (length B)   │ ...
//! └─────┴────────────┴──────────────────────┘
//! ```

use std::fmt;

/// Size of a block's tag and length fields in bytes
pub const SIZE_BLOCK_HEADER: usize = 5;

/// The kinds of block this library recognizes by tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Flag byte and sequence letters (tag 0)
    Sequence,
    /// Primer markup (tag 5), skipped
    Primers,
    /// Notes markup (tag 6)
    Notes,
    /// Features markup (tag 10)
    Features,
    /// Any other tag, skipped by length
    Other(u8),
}
impl BlockKind {
    #[must_use]
    pub fn tag(self) -> u8 {
        match self {
            Self::Sequence => 0,
            Self::Primers => 5,
            Self::Notes => 6,
            Self::Features => 10,
            Self::Other(tag) => tag,
        }
    }

    /// Returns true if blocks of this kind are decoded into the record
    #[must_use]
    pub fn is_decoded(self) -> bool {
        matches!(self, Self::Sequence | Self::Notes | Self::Features)
    }
}
impl From<u8> for BlockKind {
    fn from(tag: u8) -> Self {
        match tag {
            0 => Self::Sequence,
            5 => Self::Primers,
            6 => Self::Notes,
            10 => Self::Features,
            tag => Self::Other(tag),
        }
    }
}
impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence => write!(f, "sequence"),
            Self::Primers => write!(f, "primers"),
            Self::Notes => write!(f, "notes"),
            Self::Features => write!(f, "features"),
            Self::Other(tag) => write!(f, "block {tag}"),
        }
    }
}

/// The framing of a single block as read from the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub kind: BlockKind,

    /// Declared payload length in bytes
    pub length: u32,

    /// Byte position of the tag in the input
    pub offset: u64,
}

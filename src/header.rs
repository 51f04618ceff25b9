//! Header module for the dnafile library
//!
//! Every container opens with a fixed 19-byte preamble. It is itself laid out as a block:
//! a tab tag, a big-endian length that is always 14, and a 14-byte descriptor holding the
//! `SnapGene` title, the molecule flag and the export/import versions.
//!
//! ```text
//! ┌──────┬────────────┬────────────┬─────────┬─────────┬─────────┐
//! │ 0x09 │ u32 = 14   │ "SnapGene" │ u16 dna │ u16 exp │ u16 imp │
//! └──────┴────────────┴────────────┴─────────┴─────────┴─────────┘
//!   1        4            8            2         2         2
//! ```

use std::io::{self, Read};

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::{HeaderError, Result};

/// Leading byte of every document
const LEADING_BYTE: u8 = b'\t';

/// Declared length of the document descriptor
const DOCUMENT_LENGTH: u32 = 14;

/// Title carried in the document descriptor
const TITLE: &[u8; 8] = b"SnapGene";

/// Size of the header in bytes
pub const SIZE_HEADER: usize = 19;

/// Format metadata read from the document preamble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Meta {
    /// Whether the molecule is DNA (flag value 1)
    pub is_dna: bool,

    /// Version of the application that exported the file
    pub export_version: u16,

    /// Version of the application that imported the file
    pub import_version: u16,
}
impl Meta {
    /// Reads and validates the document preamble.
    ///
    /// The three identifying fields are checked as soon as they are read, so a
    /// mismatch stops reading at the offending field.
    ///
    /// # Errors
    ///
    /// * `HeaderError` - if the leading byte, document length or title is wrong, or the
    ///   input ends inside them
    /// * `IoError` - if the input ends inside the flag or version fields
    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self> {
        let leading = reader.read_u8().map_err(truncated)?;
        if leading != LEADING_BYTE {
            return Err(HeaderError::InvalidLeadingByte(leading).into());
        }

        let length = reader.read_u32::<BigEndian>().map_err(truncated)?;
        if length != DOCUMENT_LENGTH {
            return Err(HeaderError::InvalidDocumentLength(length).into());
        }

        let mut title = [0u8; 8];
        reader.read_exact(&mut title).map_err(truncated)?;
        if &title != TITLE {
            return Err(HeaderError::InvalidTitle(title).into());
        }

        let dna_flag = reader.read_u16::<BigEndian>()?;
        let export_version = reader.read_u16::<BigEndian>()?;
        let import_version = reader.read_u16::<BigEndian>()?;

        Ok(Self {
            is_dna: dna_flag == 1,
            export_version,
            import_version,
        })
    }

    /// Parses the preamble from the beginning of a buffer that may be larger than it.
    pub fn from_buffer(mut buffer: &[u8]) -> Result<Self> {
        Self::from_reader(&mut buffer)
    }
}

/// Maps a short read inside the identifying fields to a header error.
///
/// Other I/O failures are passed through unchanged.
fn truncated(err: io::Error) -> crate::Error {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        HeaderError::Truncated.into()
    } else {
        err.into()
    }
}

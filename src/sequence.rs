//! Decoding of the sequence block (tag 0)
//!
//! The payload is one flag byte followed by the sequence letters:
//!
//! | bit | meaning when set  |
//! |-----|-------------------|
//! | 0   | circular topology |
//! | 1   | double stranded   |
//! | 2   | A-methylated      |
//! | 3   | C-methylated      |
//! | 4   | Ki-methylated     |
//!
//! The remaining bits are unused.

use std::io::Read;

use byteorder::ReadBytesExt;

use crate::error::{ReadError, Result};
use crate::record::{SequenceProperties, Strandedness, Topology};
use crate::utils::read_exact_vec;

const FLAG_CIRCULAR: u8 = 0x01;
const FLAG_DOUBLE_STRANDED: u8 = 0x02;
const FLAG_A_METHYLATED: u8 = 0x04;
const FLAG_C_METHYLATED: u8 = 0x08;
const FLAG_KI_METHYLATED: u8 = 0x10;

impl SequenceProperties {
    /// Interprets the flag byte of a sequence block
    #[must_use]
    pub fn from_flags(flags: u8, length: u32) -> Self {
        Self {
            topology: if flags & FLAG_CIRCULAR != 0 {
                Topology::Circular
            } else {
                Topology::Linear
            },
            stranded: if flags & FLAG_DOUBLE_STRANDED != 0 {
                Strandedness::Double
            } else {
                Strandedness::Single
            },
            a_methylated: flags & FLAG_A_METHYLATED != 0,
            c_methylated: flags & FLAG_C_METHYLATED != 0,
            ki_methylated: flags & FLAG_KI_METHYLATED != 0,
            length,
        }
    }
}

/// Reads a sequence block of `block_size` bytes directly from the stream.
///
/// Returns the properties together with the sequence so the caller can store both at once.
/// The letters are not validated against any alphabet.
pub fn read_sequence<R: Read>(
    reader: &mut R,
    block_size: u32,
) -> Result<(SequenceProperties, Vec<u8>)> {
    let length = block_size
        .checked_sub(1)
        .ok_or(ReadError::EmptySequenceBlock)?;
    let flags = reader.read_u8()?;
    let sequence = read_exact_vec(reader, length)?;

    Ok((SequenceProperties::from_flags(flags, length), sequence))
}

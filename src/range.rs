use crate::error::{FormatError, Result};

/// Parses a `<start>-<end>` span of unsigned decimal integers.
///
/// No sign, whitespace or trailing characters are accepted on either side.
pub fn parse_range(range: &str) -> Result<(u64, u64)> {
    let invalid = || FormatError::InvalidRange(range.to_string());
    let (start, end) = range.split_once('-').ok_or_else(invalid)?;
    let start = parse_unsigned(start).ok_or_else(invalid)?;
    let end = parse_unsigned(end).ok_or_else(invalid)?;
    Ok((start, end))
}

/// `u64::from_str` alone would accept a leading `+`
fn parse_unsigned(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

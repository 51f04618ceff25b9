/// Custom Result type for dnafile operations, wrapping the custom [`Error`] type
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the dnafile library, encompassing all possible error cases
/// that can occur while decoding a container.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub enum Error {
    /// Errors related to validating the document preamble
    HeaderError(#[from] HeaderError),
    /// Errors in the content of a block payload (ranges, markup)
    FormatError(#[from] FormatError),
    /// Errors in the structure of the block stream
    ReadError(#[from] ReadError),
    /// Standard I/O errors from the Rust standard library
    IoError(#[from] std::io::Error),
    /// Generic errors, typically raised by user-supplied processors
    AnyhowError(#[from] anyhow::Error),
}
impl Error {
    /// Returns true if the input was readable but is not a valid container.
    ///
    /// Header mismatches, malformed ranges and malformed markup all fall in this class.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::HeaderError(_) | Self::FormatError(_))
    }
}

/// Errors specific to validating the fixed document preamble
#[derive(thiserror::Error, Debug)]
pub enum HeaderError {
    /// The first byte of the document is not a tab character
    ///
    /// # Arguments
    /// * `u8` - The byte that was found
    #[error("Invalid leading byte: {0:#04x}. Expected: 0x09")]
    InvalidLeadingByte(u8),

    /// The declared length of the document descriptor is not 14
    ///
    /// # Arguments
    /// * `u32` - The declared length that was found
    #[error("Invalid document length: {0}. Expected: 14")]
    InvalidDocumentLength(u32),

    /// The document title is not "SnapGene"
    #[error("Invalid document title: {}", String::from_utf8_lossy(.0))]
    InvalidTitle([u8; 8]),

    /// The input ended before the identifying fields were complete
    #[error("Input ended inside the document header")]
    Truncated,
}

/// Errors in the content of a block payload
#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    /// A segment range is not of the form `<start>-<end>`
    #[error("Invalid range: {0:?}. Expected: <start>-<end>")]
    InvalidRange(String),

    /// The markup payload could not be tokenized or is not well formed
    #[error("Malformed markup: {0}")]
    MalformedMarkup(String),

    /// The markup payload contains no root element
    #[error("Markup payload has no root element")]
    MissingRoot,

    /// The root element of a markup payload has an unexpected name
    #[error("Unexpected root element <{found}>. Expected: <{expected}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },

    /// A qualifier's integer value could not be parsed
    #[error("Qualifier {name:?} has a non-integer int value: {value:?}")]
    InvalidQualifierInt { name: String, value: String },

    /// The markup payload is not valid UTF-8
    #[error("Markup payload is not valid UTF-8")]
    NonUtf8Markup,
}
impl From<quick_xml::Error> for FormatError {
    fn from(err: quick_xml::Error) -> Self {
        Self::MalformedMarkup(err.to_string())
    }
}
impl From<quick_xml::events::attributes::AttrError> for FormatError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::MalformedMarkup(err.to_string())
    }
}

/// Errors in the structure of the block stream
#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    /// The file being read is not a regular file (e.g., it might be a directory or special file)
    #[error("File is not regular")]
    IncompatibleFile,

    /// A block tag was read but its length field was cut short
    ///
    /// # Fields
    /// * `tag` - The tag of the truncated block
    /// * `offset` - The byte position of the tag in the input
    #[error("Stream truncated in the length of block {tag} at byte pos {offset}")]
    TruncatedBlockHeader { tag: u8, offset: u64 },

    /// A sequence block declared zero bytes and cannot hold its flag byte
    #[error("Sequence block has a declared length of 0")]
    EmptySequenceBlock,
}

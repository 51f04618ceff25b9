//! Block stream reader
//!
//! [`DnaReader`] validates the header when it is built and then walks the body one
//! block at a time. Recognized blocks are decoded into a [`Record`] and any other block
//! is skipped by its declared length. The stream ends cleanly when no further tag byte
//! can be read; running out of input anywhere else is an error.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use byteorder::{BigEndian, ReadBytesExt};
use memmap2::Mmap;

use crate::block::{BlockHeader, BlockKind, SIZE_BLOCK_HEADER};
use crate::error::{ReadError, Result};
use crate::features::parse_features;
use crate::header::{Meta, SIZE_HEADER};
use crate::notes::parse_notes;
use crate::observer::{BlockObserver, NoopObserver};
use crate::record::Record;
use crate::sequence::read_sequence;
use crate::utils::{read_exact_vec, skip_exact};

/// Decodes a complete container from a reader.
///
/// # Example
///
/// ```rust
/// let mut bytes = vec![b'\t', 0, 0, 0, 14];
/// bytes.extend_from_slice(b"SnapGene");
/// bytes.extend_from_slice(&[0, 1, 0, 15, 0, 19]);
/// bytes.extend_from_slice(&[0, 0, 0, 0, 5, 0x01, b'A', b'C', b'G', b'T']);
///
/// let record = dnafile::parse(bytes.as_slice()).unwrap();
/// assert_eq!(record.sequence, b"ACGT");
/// assert!(record.is_circular());
/// ```
pub fn parse<R: Read>(inner: R) -> Result<Record> {
    DnaReaderBuilder::new().build(inner)?.read_record()
}

/// Decodes a container file, using its path as the record source.
pub fn parse_path<P: AsRef<Path>>(path: P) -> Result<Record> {
    DnaReaderBuilder::new().read_path(path)
}

/// Builder for [`DnaReader`]
///
/// # Example
///
/// ```rust,no_run
/// use dnafile::{DnaReaderBuilder, LogObserver};
///
/// let record = DnaReaderBuilder::new()
///     .observer(LogObserver)
///     .read_path("pET-22b.dna")
///     .unwrap();
/// println!("{} bp", record.sequence.len());
/// ```
#[derive(Debug, Clone)]
pub struct DnaReaderBuilder<O = NoopObserver> {
    source: Option<String>,
    observer: O,
}
impl Default for DnaReaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
impl DnaReaderBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            observer: NoopObserver,
        }
    }
}
impl<O: BlockObserver> DnaReaderBuilder<O> {
    /// Sets the identifier stored in [`Record::source`]
    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the observer notified of block events
    pub fn observer<P: BlockObserver>(self, observer: P) -> DnaReaderBuilder<P> {
        DnaReaderBuilder {
            source: self.source,
            observer,
        }
    }

    /// Validates the header and returns a reader positioned at the first block
    pub fn build<R: Read>(self, mut inner: R) -> Result<DnaReader<R, O>> {
        let meta = Meta::from_reader(&mut inner)?;
        Ok(DnaReader {
            inner,
            record: Record::new(self.source.unwrap_or_default(), meta),
            observer: self.observer,
            offset: SIZE_HEADER as u64,
            n_blocks: 0,
        })
    }

    /// Memory-maps a file and decodes it completely.
    ///
    /// The source defaults to the path if none was set. The file is unmapped and closed
    /// before returning, whether or not decoding succeeded.
    pub fn read_path<P: AsRef<Path>>(mut self, path: P) -> Result<Record> {
        let path = path.as_ref();

        // Verify input file is a file before attempting to map
        let file = File::open(path)?;
        if !file.metadata()?.is_file() {
            return Err(ReadError::IncompatibleFile.into());
        }

        // Safety: the file is open and won't be modified while mapped
        let mmap = unsafe { Mmap::map(&file)? };

        if self.source.is_none() {
            self.source = Some(path.display().to_string());
        }
        self.build(&mmap[..])?.read_record()
    }
}

/// Reader over the block stream of a single container
#[derive(Debug)]
pub struct DnaReader<R: Read, O: BlockObserver = NoopObserver> {
    inner: R,
    record: Record,
    observer: O,

    /// Byte position of the next tag in the input
    offset: u64,

    /// Number of blocks read so far, decoded or skipped
    n_blocks: usize,
}
impl<R: Read> DnaReader<R> {
    /// Validates the header of `inner` with the default configuration
    pub fn new(inner: R) -> Result<Self> {
        DnaReaderBuilder::new().build(inner)
    }
}
impl<R: Read, O: BlockObserver> DnaReader<R, O> {
    /// Returns the metadata read from the header
    #[must_use]
    pub fn meta(&self) -> Meta {
        self.record.meta
    }

    /// Returns the number of blocks read so far
    #[must_use]
    pub fn n_blocks(&self) -> usize {
        self.n_blocks
    }

    /// Returns the record as decoded so far
    #[must_use]
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Reads the next tag byte, or `None` at the end of the input
    fn next_tag(&mut self) -> Result<Option<u8>> {
        match self.inner.read_u8() {
            Ok(tag) => Ok(Some(tag)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Reads the tag and length of the next block
    fn next_header(&mut self) -> Result<Option<BlockHeader>> {
        let Some(tag) = self.next_tag()? else {
            return Ok(None);
        };
        let length = self.inner.read_u32::<BigEndian>().map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                ReadError::TruncatedBlockHeader {
                    tag,
                    offset: self.offset,
                }
                .into()
            } else {
                crate::Error::from(e)
            }
        })?;
        Ok(Some(BlockHeader {
            kind: BlockKind::from(tag),
            length,
            offset: self.offset,
        }))
    }

    /// Reads one complete block, decoding or skipping its payload.
    ///
    /// Returns the header of the block that was read, or `None` once the stream is
    /// exhausted. An error leaves the reader in an unspecified position.
    pub fn read_block(&mut self) -> Result<Option<BlockHeader>> {
        let Some(header) = self.next_header()? else {
            return Ok(None);
        };

        match header.kind {
            BlockKind::Sequence => {
                let (properties, sequence) = read_sequence(&mut self.inner, header.length)?;
                self.record.properties = properties;
                self.record.sequence = sequence;
            }
            BlockKind::Notes => {
                let payload = read_exact_vec(&mut self.inner, header.length)?;
                self.record.notes = Some(parse_notes(&payload)?);
            }
            BlockKind::Features => {
                let payload = read_exact_vec(&mut self.inner, header.length)?;
                self.record.features = parse_features(&payload)?;
            }
            BlockKind::Primers | BlockKind::Other(_) => {
                skip_exact(&mut self.inner, header.length)?;
            }
        }

        if header.kind.is_decoded() {
            self.observer.on_block(&header);
        } else {
            self.observer.on_skip(&header);
        }
        self.offset += (SIZE_BLOCK_HEADER as u64) + u64::from(header.length);
        self.n_blocks += 1;
        Ok(Some(header))
    }

    /// Reads all remaining blocks and returns the finished record
    pub fn read_record(mut self) -> Result<Record> {
        while self.read_block()?.is_some() {}
        self.observer.on_finish(&self.record);
        Ok(self.record)
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::fixture::ContainerBuilder;
    use crate::{Error, FormatError, HeaderError};

    #[test]
    fn test_header_only() -> anyhow::Result<()> {
        let bytes = ContainerBuilder::new().finish();
        let record = parse(bytes.as_slice())?;
        assert!(record.meta.is_dna);
        assert!(record.sequence.is_empty());
        assert!(record.notes.is_none());
        assert!(record.features.is_empty());
        Ok(())
    }

    #[test]
    fn test_invalid_header_reads_no_blocks() {
        let mut bytes = ContainerBuilder::new().sequence(0x03, b"ACGT").finish();
        bytes[0] = 0;
        let err = parse(bytes.as_slice()).unwrap_err();
        assert!(matches!(
            err,
            Error::HeaderError(HeaderError::InvalidLeadingByte(0))
        ));
    }

    #[test]
    fn test_unknown_block_is_skipped() -> anyhow::Result<()> {
        let plain = ContainerBuilder::new().sequence(0x01, b"GATTACA").finish();
        let padded = ContainerBuilder::new()
            .block(17, &[0xff; 13])
            .sequence(0x01, b"GATTACA")
            .block(200, &[])
            .finish();
        let plain = parse(plain.as_slice())?;
        let padded = parse(padded.as_slice())?;
        assert_eq!(plain, padded);
        Ok(())
    }

    #[test]
    fn test_skip_advances_exactly() -> anyhow::Result<()> {
        let bytes = ContainerBuilder::new()
            .block(42, b"\x00\x00\x00\x00\x05\x01ACGT")
            .sequence(0x00, b"TT")
            .finish();
        let mut reader = DnaReader::new(bytes.as_slice())?;

        let skipped = reader.read_block()?.unwrap();
        assert_eq!(skipped.kind, BlockKind::Other(42));
        assert_eq!(skipped.length, 10);
        assert_eq!(skipped.offset, SIZE_HEADER as u64);
        assert!(reader.record().sequence.is_empty());

        let sequence = reader.read_block()?.unwrap();
        assert_eq!(sequence.kind, BlockKind::Sequence);
        assert_eq!(sequence.offset, (SIZE_HEADER + SIZE_BLOCK_HEADER + 10) as u64);
        assert_eq!(reader.record().sequence, b"TT");

        assert!(reader.read_block()?.is_none());
        assert_eq!(reader.n_blocks(), 2);
        Ok(())
    }

    #[test]
    fn test_primers_are_skipped() -> anyhow::Result<()> {
        let bytes = ContainerBuilder::new()
            .block(5, b"<Primers><Primer name=\"p\"/></Primers>")
            .finish();
        let mut reader = DnaReader::new(bytes.as_slice())?;
        assert_eq!(reader.read_block()?.map(|h| h.kind), Some(BlockKind::Primers));
        assert_eq!(reader.read_record()?, parse(ContainerBuilder::new().finish().as_slice())?);
        Ok(())
    }

    #[test]
    fn test_truncated_length() {
        let mut bytes = ContainerBuilder::new().sequence(0x00, b"AC").finish();
        bytes.extend_from_slice(&[6, 0, 0]);
        let err = parse(bytes.as_slice()).unwrap_err();
        assert!(matches!(
            err,
            Error::ReadError(ReadError::TruncatedBlockHeader { tag: 6, offset })
                if offset == (SIZE_HEADER + SIZE_BLOCK_HEADER + 3) as u64
        ));
    }

    #[test]
    fn test_short_payloads() {
        for tag in [0u8, 6, 10, 99] {
            let mut bytes = ContainerBuilder::new().finish();
            bytes.push(tag);
            bytes.extend_from_slice(&100u32.to_be_bytes());
            bytes.extend_from_slice(b"\x01ACGT");
            let err = parse(bytes.as_slice()).unwrap_err();
            assert!(
                matches!(&err, Error::IoError(e) if e.kind() == io::ErrorKind::UnexpectedEof),
                "tag {tag}: {err:?}"
            );
        }
    }

    #[test]
    fn test_decode_failure_aborts() {
        let bytes = ContainerBuilder::new()
            .features(br#"<Features><Feature name="x"><Segment range="1to2"/></Feature></Features>"#)
            .sequence(0x00, b"ACGT")
            .finish();
        let err = parse(bytes.as_slice()).unwrap_err();
        assert!(matches!(
            err,
            Error::FormatError(FormatError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_later_block_replaces_earlier() -> anyhow::Result<()> {
        let bytes = ContainerBuilder::new()
            .sequence(0x01, b"AAAA")
            .notes(b"<Notes><A>1</A></Notes>")
            .sequence(0x02, b"CC")
            .notes(b"<Notes><B>2</B></Notes>")
            .finish();
        let record = parse(bytes.as_slice())?;
        assert_eq!(record.sequence, b"CC");
        assert_eq!(record.properties.length, 2);
        assert!(!record.is_circular());
        assert_eq!(record.note("A"), None);
        assert_eq!(record.note("B"), Some("2"));
        Ok(())
    }

    #[test]
    fn test_builder_source() -> anyhow::Result<()> {
        let bytes = ContainerBuilder::new().finish();
        let record = DnaReaderBuilder::new()
            .source("in-memory")
            .build(bytes.as_slice())?
            .read_record()?;
        assert_eq!(record.source, "in-memory");
        Ok(())
    }

    #[derive(Default)]
    struct CountingObserver {
        decoded: Vec<BlockKind>,
        skipped: Vec<BlockKind>,
        finished: usize,
    }
    impl BlockObserver for CountingObserver {
        fn on_block(&mut self, header: &BlockHeader) {
            self.decoded.push(header.kind);
        }
        fn on_skip(&mut self, header: &BlockHeader) {
            self.skipped.push(header.kind);
        }
        fn on_finish(&mut self, _record: &Record) {
            self.finished += 1;
        }
    }

    #[test]
    fn test_observer_events() -> anyhow::Result<()> {
        let bytes = ContainerBuilder::new()
            .sequence(0x00, b"A")
            .block(8, b"props")
            .notes(b"<Notes/>")
            .features(b"<Features/>")
            .block(5, b"")
            .finish();

        let mut observer = CountingObserver::default();
        DnaReaderBuilder::new()
            .observer(&mut observer)
            .build(bytes.as_slice())?
            .read_record()?;

        assert_eq!(
            observer.decoded,
            [BlockKind::Sequence, BlockKind::Notes, BlockKind::Features]
        );
        assert_eq!(observer.skipped, [BlockKind::Other(8), BlockKind::Primers]);
        assert_eq!(observer.finished, 1);
        Ok(())
    }

    #[test]
    fn test_boxed_observer() -> anyhow::Result<()> {
        let bytes = ContainerBuilder::new().block(3, b"x").finish();
        let observer: Box<dyn BlockObserver> = Box::new(crate::LogObserver);
        let record = DnaReaderBuilder::new()
            .observer(observer)
            .build(bytes.as_slice())?
            .read_record()?;
        assert!(record.sequence.is_empty());
        Ok(())
    }

    #[test]
    fn test_read_path() -> anyhow::Result<()> {
        let bytes = ContainerBuilder::new().sequence(0x01, b"ACGT").finish();
        let mut file = tempfile::NamedTempFile::new()?;
        std::io::Write::write_all(&mut file, &bytes)?;

        let record = parse_path(file.path())?;
        assert_eq!(record.source, file.path().display().to_string());
        assert_eq!(record.sequence, b"ACGT");
        Ok(())
    }

    #[test]
    fn test_read_path_directory() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        assert!(parse_path(dir.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_read_path_missing() {
        let err = parse_path("does/not/exist.dna").unwrap_err();
        assert!(matches!(err, Error::IoError(e) if e.kind() == io::ErrorKind::NotFound));
    }
}

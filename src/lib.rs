//! # dnafile
//!
//! A decoder for the SnapGene `.dna` sequence container.
//!
//! A container is a 19-byte header followed by a stream of tagged, length-prefixed
//! blocks. This library decodes the blocks that describe the molecule itself:
//!
//! * **Sequence** (tag 0): topology, strandedness and methylation flags plus the
//!   sequence letters.
//! * **Notes** (tag 6): free-form document notes such as the description or UUID.
//! * **Features** (tag 10): positioned annotations with segments and qualifiers.
//!
//! Every other block is skipped by its declared length, so containers written by newer
//! versions remain readable. Decoding is read-only; there is no writer.
//!
//! ## Usage
//!
//! ```rust,no_run
//! let record = dnafile::parse_path("pET-22b.dna").unwrap();
//!
//! println!("{} ({} bp, {})", record.source, record.sequence.len(), record.properties.topology);
//! for feature in &record.features {
//!     println!("{}\t{}\t{}..{}", feature.feature_type, feature.label, feature.start, feature.end);
//! }
//! ```

mod block;
mod error;
mod features;
mod header;
mod markup;
mod notes;
mod observer;
mod parallel;
mod range;
mod reader;
mod record;
mod sequence;
mod utils;

#[cfg(test)]
mod fixture;

pub mod prelude;

pub use block::{BlockHeader, BlockKind, SIZE_BLOCK_HEADER};
pub use error::{Error, FormatError, HeaderError, ReadError, Result};
pub use features::parse_features;
pub use header::{Meta, SIZE_HEADER};
pub use markup::{Element, Node};
pub use notes::parse_notes;
pub use observer::{BlockObserver, LogObserver, NoopObserver};
pub use parallel::{process_parallel, ParallelProcessor};
pub use range::parse_range;
pub use reader::{parse, parse_path, DnaReader, DnaReaderBuilder};
pub use record::{Feature, FeatureSegment, Record, SequenceProperties, Strandedness, Topology};
pub use sequence::read_sequence;

//! Observation of block dispatch
//!
//! Decoding itself never prints. Callers that want to see which blocks were decoded or
//! skipped pass a [`BlockObserver`] to the reader builder.

use auto_impl::auto_impl;
use log::{debug, trace};

use crate::block::BlockHeader;
use crate::record::Record;

/// Receives events as the reader walks the block stream.
///
/// All methods default to doing nothing.
#[auto_impl(&mut, Box)]
pub trait BlockObserver {
    /// Called after a recognized block has been decoded into the record
    #[allow(unused_variables)]
    fn on_block(&mut self, header: &BlockHeader) {}

    /// Called after an unrecognized block has been skipped
    #[allow(unused_variables)]
    fn on_skip(&mut self, header: &BlockHeader) {}

    /// Called once the stream is exhausted, with the finished record
    #[allow(unused_variables)]
    fn on_finish(&mut self, record: &Record) {}
}

/// An observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;
impl BlockObserver for NoopObserver {}

/// An observer that forwards events to the [`log`] facade
///
/// Nothing is emitted unless the application installs a logger.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;
impl BlockObserver for LogObserver {
    fn on_block(&mut self, header: &BlockHeader) {
        debug!(
            "Decoded {} ({} bytes) at byte pos {}",
            header.kind, header.length, header.offset
        );
    }

    fn on_skip(&mut self, header: &BlockHeader) {
        trace!(
            "Skipping {} ({} bytes) at byte pos {}",
            header.kind,
            header.length,
            header.offset
        );
    }

    fn on_finish(&mut self, record: &Record) {
        debug!(
            "Finished {}: {} bp, {} notes, {} features",
            record.source,
            record.sequence.len(),
            record.notes.as_ref().map_or(0, std::collections::HashMap::len),
            record.features.len()
        );
    }
}

//! Decoding many containers concurrently
//!
//! Each container is decoded independently on a worker thread and handed to a
//! [`ParallelProcessor`]. Workers share no decoding state; anything the processors want
//! to aggregate goes through state they share themselves.

use std::path::{Path, PathBuf};

use crate::{reader::DnaReaderBuilder, Record, Result};

/// Trait for types that can process decoded records in parallel.
///
/// Each worker thread gets its own clone of the processor.
pub trait ParallelProcessor: Send + Clone {
    /// Process a single decoded record
    fn process_record(&mut self, record: Record) -> Result<()>;

    /// Called when a thread finishes processing its batch
    /// Default implementation does nothing
    fn on_batch_complete(&mut self) -> Result<()> {
        Ok(())
    }

    /// Set the thread ID for this processor
    ///
    /// Each thread should call this method with its own unique ID.
    #[allow(unused_variables)]
    fn set_tid(&mut self, tid: usize) {
        // Default implementation does nothing
    }

    /// Get the thread ID for this processor
    fn get_tid(&self) -> Option<usize> {
        None
    }
}

/// Decodes every path and passes each record to a clone of `processor`.
///
/// Paths are split into contiguous batches, one per thread. `num_threads == 0` uses
/// all available CPUs; larger requests are capped at that number. Processing stops at
/// the first error in a batch, and the first failing batch's error is returned.
pub fn process_parallel<P, I>(paths: I, processor: P, num_threads: usize) -> Result<()>
where
    P: ParallelProcessor,
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    let paths: Vec<PathBuf> = paths
        .into_iter()
        .map(|path| path.as_ref().to_path_buf())
        .collect();
    if paths.is_empty() {
        return Ok(());
    }

    // Calculate the number of threads to use
    let num_threads = if num_threads == 0 {
        num_cpus::get()
    } else {
        num_threads.min(num_cpus::get())
    };
    let paths_per_thread = paths.len().div_ceil(num_threads);

    std::thread::scope(|scope| -> Result<()> {
        let handles: Vec<_> = paths
            .chunks(paths_per_thread)
            .enumerate()
            .map(|(tid, batch)| {
                let mut processor = processor.clone();
                processor.set_tid(tid);
                scope.spawn(move || -> Result<()> {
                    for path in batch {
                        let record = DnaReaderBuilder::new().read_path(path)?;
                        processor.process_record(record)?;
                    }
                    processor.on_batch_complete()
                })
            })
            .collect();

        for handle in handles {
            match handle.join() {
                Ok(result) => result?,
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        Ok(())
    })
}

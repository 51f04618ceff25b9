pub use super::{
    parse, parse_path, BlockObserver, DnaReader, DnaReaderBuilder, Feature, FeatureSegment,
    ParallelProcessor, Record, Result, Strandedness, Topology,
};

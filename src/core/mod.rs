//! Core interval mapping functionality
//!
//! This module contains the interval and rule types, the multi-stage
//! pipeline, and the almanac parser that builds it.

pub mod almanac;
mod error;
mod interval;
pub mod io;
mod pipeline;
mod rule;

pub use almanac::{
    parse_almanac_bytes, parse_almanac_file, parse_almanac_reader, parse_almanac_str, Almanac,
};
pub use error::{
    AlmanacMapError, AlmanacParseError, AlmanacParseErrorKind, ParseResult, PipelineError,
    PipelineResult, Result, RuleError,
};
pub use interval::{is_disjoint, total_length, Interval};
pub use io::{detect_compression, open_input, CompressionFormat, LineIterator, DEFAULT_BUFFER_SIZE};
pub use pipeline::{build_initial_intervals, lowest_start, IntervalPipeline};
pub use rule::{Overlap, Rule, RuleTable};

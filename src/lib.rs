//! almanac-map - Range-based interval remapping
//!
//! Pushes integer intervals through an ordered chain of piecewise-linear
//! remapping tables without ever expanding them into individual values.
//!
//! # Features
//!
//! - Interval splitting with first-match-wins rule priority
//! - Scalar mapper kept alongside as a reference path
//! - Parallel seed-range processing with rayon
//! - Support for compressed almanac files (gzip, bzip2)
//!
//! # Example
//!
//! ```
//! use almanac_map::{lowest_start, Interval, IntervalPipeline, RuleTable};
//!
//! let pipeline = IntervalPipeline::new(vec![
//!     RuleTable::from_lines("seed-to-soil", ["50 98 2", "52 50 48"]),
//! ]);
//!
//! let locations = pipeline.run(vec![Interval::new(45, 10)?]);
//! assert_eq!(lowest_start(&locations)?, 45);
//! # Ok::<(), almanac_map::PipelineError>(())
//! ```

pub mod core;

// Re-export commonly used types
pub use crate::core::{
    build_initial_intervals, lowest_start, parse_almanac_file, parse_almanac_str, Almanac,
    AlmanacMapError, AlmanacParseError, Interval, IntervalPipeline, PipelineError, Rule,
    RuleError, RuleTable,
};

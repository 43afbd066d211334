//! Multi-stage interval pipeline
//!
//! Feeds an interval set through an ordered list of [`RuleTable`]s. The only
//! state carried between stages is the interval set itself, which is replaced
//! wholesale after each stage.
//!
//! The pipeline algorithm:
//! 1. Split every open interval against each rule of the current table
//! 2. Freeze translated pieces, keep leftovers open for later rules
//! 3. Pass leftovers through unchanged once the table is exhausted
//! 4. Hand the combined set to the next table

use crate::core::error::{PipelineError, PipelineResult};
use crate::core::interval::Interval;
use crate::core::rule::RuleTable;
use rayon::prelude::*;

/// Ordered sequence of remapping stages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalPipeline {
    tables: Vec<RuleTable>,
}

impl IntervalPipeline {
    pub fn new(tables: Vec<RuleTable>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &[RuleTable] {
        &self.tables
    }

    /// Number of stages
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Total malformed rule lines skipped across all stages
    pub fn skipped_rules(&self) -> usize {
        self.tables.iter().map(RuleTable::skipped).sum()
    }

    /// Run an interval set through every stage in order
    ///
    /// With no stages the input comes back unchanged.
    ///
    /// # Examples
    /// ```
    /// use almanac_map::core::{Interval, IntervalPipeline, RuleTable};
    ///
    /// let pipeline = IntervalPipeline::new(vec![
    ///     RuleTable::from_lines("seed-to-soil", ["50 98 2", "52 50 48"]),
    ///     RuleTable::from_lines("soil-to-fertilizer", ["0 15 37", "37 52 2", "39 0 15"]),
    /// ]);
    /// let out = pipeline.run(vec![Interval::new(79, 1).unwrap()]);
    /// assert_eq!(out, vec![Interval::new(81, 1).unwrap()]);
    /// ```
    pub fn run(&self, intervals: Vec<Interval>) -> Vec<Interval> {
        self.tables
            .iter()
            .fold(intervals, |current, table| table.apply_all(current))
    }

    /// Run each initial interval independently on a rayon pool
    ///
    /// Tables are shared read-only across workers. Output is the per-interval
    /// results concatenated in input order, which is the same multiset that
    /// [`run`](IntervalPipeline::run) produces.
    pub fn run_parallel(&self, intervals: Vec<Interval>, threads: usize) -> PipelineResult<Vec<Interval>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| PipelineError::ThreadPool(e.to_string()))?;

        let results: Vec<Vec<Interval>> = pool.install(|| {
            intervals
                .par_iter()
                .map(|interval| self.run(vec![*interval]))
                .collect()
        });

        Ok(results.into_iter().flatten().collect())
    }

    /// Map one value through every stage using the scalar scan
    ///
    /// Reference path for validating [`run`](IntervalPipeline::run) on
    /// single-value intervals.
    pub fn map_value(&self, value: i64) -> i64 {
        self.tables
            .iter()
            .fold(value, |current, table| table.map_value(current))
    }
}

/// Turn flat `(start, length)` pairs into intervals
///
/// Zero-length pairs cover nothing and are dropped. Negative lengths, an odd
/// number of values, or an end past `i64::MAX` are errors.
///
/// # Examples
/// ```
/// use almanac_map::core::{build_initial_intervals, Interval, PipelineError};
///
/// let seeds = build_initial_intervals(&[79, 14, 55, 13]).unwrap();
/// assert_eq!(seeds, vec![Interval::new(79, 14).unwrap(), Interval::new(55, 13).unwrap()]);
/// assert_eq!(build_initial_intervals(&[79]), Err(PipelineError::UnpairedSeed(1)));
/// ```
pub fn build_initial_intervals(raw_pairs: &[i64]) -> PipelineResult<Vec<Interval>> {
    if raw_pairs.len() % 2 != 0 {
        return Err(PipelineError::UnpairedSeed(raw_pairs.len()));
    }

    raw_pairs
        .chunks_exact(2)
        .filter(|pair| pair[1] != 0)
        .map(|pair| Interval::new(pair[0], pair[1]))
        .collect()
}

/// Smallest start across an interval set
///
/// # Examples
/// ```
/// use almanac_map::core::{lowest_start, Interval, PipelineError};
///
/// let set = [Interval::new(52, 5).unwrap(), Interval::new(45, 5).unwrap()];
/// assert_eq!(lowest_start(&set), Ok(45));
/// assert_eq!(lowest_start(&[]), Err(PipelineError::EmptyIntervalSet));
/// ```
pub fn lowest_start(intervals: &[Interval]) -> PipelineResult<i64> {
    intervals
        .iter()
        .map(Interval::start)
        .min()
        .ok_or(PipelineError::EmptyIntervalSet)
}

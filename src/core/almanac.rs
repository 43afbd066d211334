//! Almanac file parsing
//!
//! Parses the seed list and the named rule tables that feed the pipeline.
//!
//! # Almanac Format
//!
//! ```text
//! seeds: 79 14 55 13
//!
//! seed-to-soil map:
//! 50 98 2
//! 52 50 48
//!
//! soil-to-fertilizer map:
//! 0 15 37
//! ```
//!
//! - First non-empty line starts with "seeds:"
//! - Blocks are separated by blank lines
//! - Each block opens with a header ending in ':'; the table name is the
//!   header without its trailing "map:"
//! - Rule lines contain: destination start, source start, length
//!
//! Malformed rule lines are skipped with a warning and counted on their
//! table. Structural problems (no seeds line, rules without a header) abort
//! the parse.

use crate::core::error::{AlmanacParseError, ParseResult, PipelineError, PipelineResult};
use crate::core::interval::Interval;
use crate::core::io::{open_input, LineIterator};
use crate::core::pipeline::{build_initial_intervals, lowest_start, IntervalPipeline};
use crate::core::rule::{Rule, RuleTable};
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Seeds plus the ordered remapping stages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Almanac {
    /// Raw seed integers, in file order
    pub seeds: Vec<i64>,
    /// Stages in file order
    pub pipeline: IntervalPipeline,
}

impl Almanac {
    /// Seeds read as `(start, length)` pairs
    pub fn seed_intervals(&self) -> PipelineResult<Vec<Interval>> {
        build_initial_intervals(&self.seeds)
    }

    /// Final location of every individual seed, in seed order
    pub fn seed_locations(&self) -> Vec<(i64, i64)> {
        self.seeds
            .iter()
            .map(|&seed| (seed, self.pipeline.map_value(seed)))
            .collect()
    }

    /// Lowest location when every seed is a single value
    pub fn lowest_seed_location(&self) -> PipelineResult<i64> {
        self.seeds
            .iter()
            .map(|&seed| self.pipeline.map_value(seed))
            .min()
            .ok_or(PipelineError::EmptyIntervalSet)
    }

    /// Location intervals when seeds are `(start, length)` pairs
    ///
    /// `threads > 1` runs the seed ranges on a rayon pool.
    pub fn location_ranges(&self, threads: usize) -> PipelineResult<Vec<Interval>> {
        let seeds = self.seed_intervals()?;
        if threads > 1 {
            self.pipeline.run_parallel(seeds, threads)
        } else {
            Ok(self.pipeline.run(seeds))
        }
    }

    /// Lowest location when seeds are `(start, length)` pairs
    pub fn lowest_range_location(&self, threads: usize) -> PipelineResult<i64> {
        lowest_start(&self.location_ranges(threads)?)
    }
}

/// Table name from a block header: "seed-to-soil map:" -> "seed-to-soil"
fn table_name(header: &str) -> &str {
    let name = header.trim_end_matches(':').trim_end();
    name.strip_suffix(" map").unwrap_or(name).trim()
}

/// Parse the integers after "seeds:"
fn parse_seeds(line: &str, line_number: usize) -> ParseResult<Vec<i64>> {
    let values = line
        .strip_prefix("seeds:")
        .ok_or_else(|| AlmanacParseError::missing_seeds(line_number, line))?;

    values
        .split_whitespace()
        .map(|field| {
            field
                .parse::<i64>()
                .map_err(|_| AlmanacParseError::invalid_seed(field, line_number))
        })
        .collect()
}

/// Close the current table, reporting anything worth a warning
fn finish_table(table: RuleTable, pipeline: &mut Vec<RuleTable>) {
    if table.has_overlapping_sources() {
        log::warn!(
            "Table '{}' has overlapping source ranges; first listed rule wins",
            table.name()
        );
    }
    log::debug!(
        "Parsed table '{}': {} rules, {} skipped",
        table.name(),
        table.len(),
        table.skipped()
    );
    pipeline.push(table);
}

/// Parse an almanac from a reader
///
/// This function handles the core parsing logic, supporting any `BufRead` source.
pub fn parse_almanac_reader<R: BufRead>(reader: R) -> ParseResult<Almanac> {
    let mut lines = LineIterator::new(reader);
    let mut seeds: Option<Vec<i64>> = None;
    let mut tables = Vec::new();
    let mut current: Option<RuleTable> = None;
    let mut line_number: usize = 0;

    while let Some(line_result) = lines.next_line() {
        line_number += 1;
        let line = line_result?;
        let trimmed = line.trim();

        // Empty line marks end of a block
        if trimmed.is_empty() {
            if let Some(table) = current.take() {
                finish_table(table, &mut tables);
            }
            continue;
        }

        if seeds.is_none() {
            seeds = Some(parse_seeds(trimmed, line_number)?);
            continue;
        }

        match current.as_mut() {
            Some(table) => {
                let rule = Rule::parse(trimmed);
                if let Err(ref e) = rule {
                    log::warn!(
                        "Skipping malformed rule in '{}' at line {}: {}",
                        table.name(),
                        line_number,
                        e
                    );
                }
                table.push_parsed(rule);
            }
            None if trimmed.ends_with(':') => {
                current = Some(RuleTable::new(table_name(trimmed), Vec::new()));
            }
            None => return Err(AlmanacParseError::missing_map_header(line_number)),
        }
    }

    if let Some(table) = current.take() {
        finish_table(table, &mut tables);
    }

    let seeds = seeds.ok_or_else(|| AlmanacParseError::missing_seeds(line_number.max(1), ""))?;
    Ok(Almanac {
        seeds,
        pipeline: IntervalPipeline::new(tables),
    })
}

/// Parse an almanac from a string
pub fn parse_almanac_str(data: &str) -> ParseResult<Almanac> {
    parse_almanac_bytes(data.as_bytes())
}

/// Parse an almanac from bytes (for testing)
pub fn parse_almanac_bytes(data: &[u8]) -> ParseResult<Almanac> {
    parse_almanac_reader(BufReader::new(data))
}

/// Parse an almanac file
///
/// Automatically detects and handles compression:
/// - .gz extension or gzip magic bytes (1f 8b)
/// - .bz2 extension or bzip2 magic bytes (42 5a 68)
/// - Plain text otherwise
pub fn parse_almanac_file<P: AsRef<Path>>(path: P) -> ParseResult<Almanac> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AlmanacParseError::file_not_found(path.to_path_buf()));
    }
    parse_almanac_reader(open_input(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AlmanacParseErrorKind;

    const SAMPLE: &str = "\
seeds: 79 14 55 13

seed-to-soil map:
50 98 2
52 50 48

soil-to-fertilizer map:
0 15 37
37 52 2
39 0 15

fertilizer-to-water map:
49 53 8
0 11 42
42 0 7
57 7 4

water-to-light map:
88 18 7
18 25 70

light-to-temperature map:
45 77 23
81 45 19
68 64 13

temperature-to-humidity map:
0 69 1
1 0 69

humidity-to-location map:
60 56 37
56 93 4
";

    #[test]
    fn test_parse_sample() {
        let almanac = parse_almanac_str(SAMPLE).unwrap();
        assert_eq!(almanac.seeds, vec![79, 14, 55, 13]);
        assert_eq!(almanac.pipeline.len(), 7);

        let names: Vec<&str> = almanac.pipeline.tables().iter().map(RuleTable::name).collect();
        assert_eq!(names[0], "seed-to-soil");
        assert_eq!(names[6], "humidity-to-location");
        assert_eq!(almanac.pipeline.tables()[1].len(), 3);
        assert_eq!(almanac.pipeline.skipped_rules(), 0);
    }

    #[test]
    fn test_sample_answers() {
        let almanac = parse_almanac_str(SAMPLE).unwrap();
        assert_eq!(
            almanac.seed_locations(),
            vec![(79, 82), (14, 43), (55, 86), (13, 35)]
        );
        assert_eq!(almanac.lowest_seed_location(), Ok(35));
        assert_eq!(almanac.lowest_range_location(1), Ok(46));
        assert_eq!(almanac.lowest_range_location(4), Ok(46));
    }

    #[test]
    fn test_table_name() {
        assert_eq!(table_name("seed-to-soil map:"), "seed-to-soil");
        assert_eq!(table_name("stage:"), "stage");
    }

    #[test]
    fn test_malformed_rule_skipped() {
        let data = "seeds: 79\n\nseed-to-soil map:\n50 98 2\nthis is not a valid rule\n52 50 48\n";
        let almanac = parse_almanac_str(data).unwrap();
        assert_eq!(almanac.pipeline.skipped_rules(), 1);
        assert_eq!(almanac.pipeline.tables()[0].len(), 2);
        assert_eq!(almanac.lowest_seed_location(), Ok(81));
    }

    #[test]
    fn test_crlf_and_trailing_block() {
        let data = "seeds: 1 2\r\n\r\na map:\r\n10 0 5";
        let almanac = parse_almanac_str(data).unwrap();
        assert_eq!(almanac.pipeline.len(), 1);
        assert_eq!(almanac.pipeline.map_value(1), 11);
    }

    #[test]
    fn test_missing_seeds() {
        let err = parse_almanac_str("seed-to-soil map:\n50 98 2\n").unwrap_err();
        assert!(err.is_kind(AlmanacParseErrorKind::MissingSeeds));
        assert_eq!(err.line_number, Some(1));

        let err = parse_almanac_str("").unwrap_err();
        assert!(err.is_kind(AlmanacParseErrorKind::MissingSeeds));
    }

    #[test]
    fn test_invalid_seed() {
        let err = parse_almanac_str("seeds: 1 two 3\n").unwrap_err();
        assert!(err.is_kind(AlmanacParseErrorKind::InvalidSeed));
        assert!(err.to_string().contains("two"));
    }

    #[test]
    fn test_rule_without_header() {
        let err = parse_almanac_str("seeds: 1 2\n\n50 98 2\n").unwrap_err();
        assert!(err.is_kind(AlmanacParseErrorKind::MissingMapHeader));
        assert_eq!(err.line_number, Some(3));
    }

    #[test]
    fn test_no_tables_is_identity() {
        let almanac = parse_almanac_str("seeds: 10 3\n").unwrap();
        assert!(almanac.pipeline.is_empty());
        assert_eq!(almanac.lowest_seed_location(), Ok(3));
        assert_eq!(almanac.lowest_range_location(1), Ok(10));
    }

    #[test]
    fn test_empty_seed_list() {
        let almanac = parse_almanac_str("seeds:\n\na map:\n1 2 3\n").unwrap();
        assert_eq!(almanac.lowest_seed_location(), Err(PipelineError::EmptyIntervalSet));
        assert_eq!(almanac.lowest_range_location(1), Err(PipelineError::EmptyIntervalSet));
    }

    #[test]
    fn test_unpaired_seed_ranges() {
        let almanac = parse_almanac_str("seeds: 1 2 3\n").unwrap();
        assert_eq!(almanac.lowest_seed_location(), Ok(1));
        assert_eq!(almanac.lowest_range_location(1), Err(PipelineError::UnpairedSeed(3)));
    }
}

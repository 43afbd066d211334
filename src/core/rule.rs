//! Remap rules and rule tables
//!
//! A [`Rule`] shifts every value in its source range by a fixed offset. A
//! [`RuleTable`] is one named stage of the almanac ("seed-to-soil"): rules are
//! tried in listing order, the first one whose source range holds a value
//! wins, and values no rule covers map to themselves.

use crate::core::error::RuleError;
use crate::core::interval::Interval;

/// A `(destination_start, source_start, length)` remapping segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// First value of the destination range
    pub destination_start: i64,
    /// First value of the source range
    pub source_start: i64,
    /// Number of values covered (always positive)
    pub length: i64,
}

/// Result of splitting one interval against one rule
///
/// `before` and `after` are the parts of the input left of and right of the
/// rule's source range. With no overlap the whole input lands in exactly one
/// of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Overlap {
    /// Overlapping part, already translated into destination space
    pub mapped: Option<Interval>,
    pub before: Option<Interval>,
    pub after: Option<Interval>,
}

impl Overlap {
    /// Untranslated leftovers, `before` first
    pub fn leftovers(&self) -> impl Iterator<Item = Interval> {
        self.before.into_iter().chain(self.after)
    }
}

impl Rule {
    /// Create a rule, rejecting non-positive lengths and ranges whose end
    /// does not fit in `i64`
    ///
    /// # Examples
    /// ```
    /// use almanac_map::core::Rule;
    ///
    /// let rule = Rule::new(52, 50, 48).unwrap();
    /// assert_eq!(rule.offset(), 2);
    /// assert!(Rule::new(52, 50, 0).is_err());
    /// ```
    pub fn new(destination_start: i64, source_start: i64, length: i64) -> Result<Self, RuleError> {
        if length <= 0 {
            return Err(RuleError::NonPositiveLength(length));
        }
        for start in [source_start, destination_start] {
            if start.checked_add(length).is_none() {
                return Err(RuleError::Overflow { start, length });
            }
        }
        // The offset itself must be representable for the shift to be valid
        if destination_start.checked_sub(source_start).is_none() {
            return Err(RuleError::Overflow {
                start: destination_start,
                length,
            });
        }
        Ok(Self {
            destination_start,
            source_start,
            length,
        })
    }

    /// Parse a `destination source length` rule line
    ///
    /// # Examples
    /// ```
    /// use almanac_map::core::{Rule, RuleError};
    ///
    /// assert_eq!(Rule::parse("50 98 2").unwrap(), Rule::new(50, 98, 2).unwrap());
    /// assert_eq!(Rule::parse("50 98"), Err(RuleError::FieldCount(2)));
    /// ```
    pub fn parse(line: &str) -> Result<Self, RuleError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(RuleError::FieldCount(fields.len()));
        }

        let mut values = [0i64; 3];
        for (slot, field) in values.iter_mut().zip(&fields) {
            *slot = field
                .parse::<i64>()
                .map_err(|_| RuleError::InvalidNumber(field.to_string()))?;
        }

        let [destination_start, source_start, length] = values;
        Self::new(destination_start, source_start, length)
    }

    #[inline]
    pub fn source_end(&self) -> i64 {
        self.source_start + self.length
    }

    /// Signed shift applied to values in the source range
    #[inline]
    pub fn offset(&self) -> i64 {
        self.destination_start - self.source_start
    }

    /// Map a single value if it falls in the source range
    #[inline]
    pub fn map_value(&self, value: i64) -> Option<i64> {
        if value >= self.source_start && value < self.source_end() {
            Some(value + self.offset())
        } else {
            None
        }
    }

    /// Split an interval against this rule's source range
    ///
    /// # Examples
    /// ```
    /// use almanac_map::core::{Interval, Rule};
    ///
    /// let rule = Rule::new(52, 50, 48).unwrap();
    /// let split = rule.apply(Interval::new(45, 10).unwrap());
    /// assert_eq!(split.mapped, Interval::new(52, 5).ok());
    /// assert_eq!(split.before, Interval::new(45, 5).ok());
    /// assert_eq!(split.after, None);
    /// ```
    pub fn apply(&self, interval: Interval) -> Overlap {
        let overlap_start = interval.start().max(self.source_start);
        let overlap_end = interval.end().min(self.source_end());

        if overlap_start >= overlap_end {
            // No overlap: whole interval lies on one side of the source range
            return if interval.end() <= self.source_start {
                Overlap {
                    before: Some(interval),
                    ..Overlap::default()
                }
            } else {
                Overlap {
                    after: Some(interval),
                    ..Overlap::default()
                }
            };
        }

        Overlap {
            mapped: Interval::from_bounds(overlap_start, overlap_end).map(|iv| iv.shifted(self.offset())),
            before: Interval::from_bounds(interval.start(), overlap_start),
            after: Interval::from_bounds(overlap_end, interval.end()),
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.destination_start, self.source_start, self.length)
    }
}

/// One named remapping stage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    name: String,
    rules: Vec<Rule>,
    skipped: usize,
}

impl RuleTable {
    /// Create a table from already validated rules
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
            skipped: 0,
        }
    }

    /// Build a table from raw rule lines, skipping malformed ones
    ///
    /// Blank lines are ignored. Every other line that fails [`Rule::parse`]
    /// is dropped and counted in [`RuleTable::skipped`].
    ///
    /// # Examples
    /// ```
    /// use almanac_map::core::RuleTable;
    ///
    /// let table = RuleTable::from_lines("seed-to-soil", ["50 98 2", "garbage", "52 50 48"]);
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.skipped(), 1);
    /// assert_eq!(table.map_value(79), 81);
    /// ```
    pub fn from_lines<'a, I>(name: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut table = Self::new(name, Vec::new());
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            table.push_parsed(Rule::parse(line));
        }
        table
    }

    /// Append a rule or count a rejected one
    pub(crate) fn push_parsed(&mut self, rule: Result<Rule, RuleError>) {
        match rule {
            Ok(rule) => self.rules.push(rule),
            Err(_) => self.skipped += 1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of malformed rule lines dropped while building this table
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Whether any two source ranges share a value
    ///
    /// Well-formed almanacs never do; when they do, listing order decides.
    pub fn has_overlapping_sources(&self) -> bool {
        let mut sources: Vec<(i64, i64)> = self
            .rules
            .iter()
            .map(|rule| (rule.source_start, rule.source_end()))
            .collect();
        sources.sort_unstable();
        sources.windows(2).any(|pair| pair[1].0 < pair[0].1)
    }

    /// Map one value: first matching rule wins, identity if none match
    ///
    /// This is the plain linear scan used as the oracle for [`apply_all`].
    ///
    /// [`apply_all`]: RuleTable::apply_all
    pub fn map_value(&self, value: i64) -> i64 {
        self.rules
            .iter()
            .find_map(|rule| rule.map_value(value))
            .unwrap_or(value)
    }

    /// Map a whole interval set through this table
    ///
    /// Each rule splits the intervals that are still open; the translated
    /// piece is frozen into `mapped` and never tested against later rules.
    /// Whatever is still open after the last rule passes through unchanged.
    ///
    /// # Examples
    /// ```
    /// use almanac_map::core::{Interval, RuleTable};
    ///
    /// let table = RuleTable::from_lines("seed-to-soil", ["52 50 48", "50 98 2"]);
    /// let mut out = table.apply_all(vec![Interval::new(45, 10).unwrap()]);
    /// out.sort();
    /// assert_eq!(out, vec![Interval::new(45, 5).unwrap(), Interval::new(52, 5).unwrap()]);
    /// ```
    pub fn apply_all(&self, intervals: Vec<Interval>) -> Vec<Interval> {
        let mut mapped = Vec::with_capacity(intervals.len());
        let mut still_open = intervals;

        for rule in &self.rules {
            if still_open.is_empty() {
                break;
            }
            let mut next_open = Vec::with_capacity(still_open.len());
            for interval in still_open {
                let split = rule.apply(interval);
                mapped.extend(split.mapped);
                next_open.extend(split.leftovers());
            }
            still_open = next_open;
        }

        mapped.extend(still_open);
        mapped
    }
}

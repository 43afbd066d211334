//! Half-open integer intervals
//!
//! An [`Interval`] is `[start, start + length)` over `i64`. Every constructed
//! interval has a positive length and an end that fits in `i64`, so the
//! splitting code never has to re-check for overflow or empty pieces.

use crate::core::error::{PipelineError, PipelineResult};

/// Half-open range `[start, start + length)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval {
    start: i64,
    length: i64,
}

impl Interval {
    /// Create an interval, rejecting empty, negative or overflowing ranges
    ///
    /// # Examples
    /// ```
    /// use almanac_map::core::Interval;
    ///
    /// let iv = Interval::new(79, 14).unwrap();
    /// assert_eq!(iv.end(), 93);
    /// assert!(Interval::new(5, 0).is_err());
    /// assert!(Interval::new(i64::MAX, 1).is_err());
    /// ```
    pub fn new(start: i64, length: i64) -> PipelineResult<Self> {
        if length <= 0 || start.checked_add(length).is_none() {
            return Err(PipelineError::InvalidInterval { start, length });
        }
        Ok(Self { start, length })
    }

    /// Build from half-open bounds, `None` when `end <= start`
    ///
    /// Callers guarantee `end - start` does not overflow, which holds for any
    /// bounds clipped from an existing interval.
    #[inline]
    pub(crate) fn from_bounds(start: i64, end: i64) -> Option<Self> {
        if start < end {
            Some(Self {
                start,
                length: end - start,
            })
        } else {
            None
        }
    }

    /// Single-value interval `[value, value + 1)`
    pub fn point(value: i64) -> PipelineResult<Self> {
        Self::new(value, 1)
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn length(&self) -> i64 {
        self.length
    }

    /// Exclusive end
    pub fn end(&self) -> i64 {
        self.start + self.length
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.start && value < self.end()
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// Same interval moved by `offset`
    ///
    /// Only called for pieces clipped to a rule's source range, whose shifted
    /// image lies inside the rule's validated destination range.
    #[inline]
    pub(crate) fn shifted(self, offset: i64) -> Self {
        Self {
            start: self.start + offset,
            length: self.length,
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

/// Sum of lengths, widened so large sets cannot overflow
pub fn total_length(intervals: &[Interval]) -> i128 {
    intervals.iter().map(|iv| iv.length as i128).sum()
}

/// Check that no two intervals share a value
pub fn is_disjoint(intervals: &[Interval]) -> bool {
    let mut sorted = intervals.to_vec();
    sorted.sort_unstable();
    sorted.windows(2).all(|pair| pair[0].end() <= pair[1].start)
}

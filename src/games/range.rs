//! Integer ranges and the win-range partition used by the ranges mode
//!
//! A partition is accepted only when it is non-empty, gap free, free of
//! overlaps and starts at zero or above. Construction is the only place
//! these checks run; a [`RangePartition`] is valid for its whole life.

use crate::errors::RangeError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Inclusive integer interval with `from <= to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumericRange {
    from: i64,
    to: i64,
}

impl NumericRange {
    /// Bounds may be given in either order.
    pub fn new(a: i64, b: i64) -> Self {
        Self {
            from: a.min(b),
            to: a.max(b),
        }
    }

    pub fn from(&self) -> i64 {
        self.from
    }

    pub fn to(&self) -> i64 {
        self.to
    }

    pub fn contains(&self, n: i64) -> bool {
        self.from <= n && n <= self.to
    }

    pub fn overlaps(&self, other: &NumericRange) -> bool {
        self.from <= other.to && self.to >= other.from
    }

    /// True if `other` lies completely inside `self`
    pub fn includes(&self, other: &NumericRange) -> bool {
        self.from <= other.from && self.to >= other.to
    }
}

impl PartialOrd for NumericRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NumericRange {
    fn cmp(&self, other: &Self) -> Ordering {
        self.from
            .cmp(&other.from)
            .then_with(|| self.to.cmp(&other.to))
    }
}

/// What landing in a win range does
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WinRangeKind {
    Jackpot,
    Regular { multiplier: f64 },
}

/// A range of rolls and its payout rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WinRange {
    pub range: NumericRange,
    pub kind: WinRangeKind,
}

impl WinRange {
    pub fn jackpot(range: NumericRange) -> Self {
        Self {
            range,
            kind: WinRangeKind::Jackpot,
        }
    }

    pub fn regular(range: NumericRange, multiplier: f64) -> Self {
        Self {
            range,
            kind: WinRangeKind::Regular { multiplier },
        }
    }

    /// Converts a configured range. A normal range without multiplier pays 0.
    pub fn from_spec(spec: &RangeSpec) -> Self {
        let range = NumericRange::new(spec.from, spec.to);
        match spec.range_type {
            RangeType::Jackpot => Self::jackpot(range),
            RangeType::Normal => Self::regular(range, spec.mult.unwrap_or(0.0)),
        }
    }

    pub fn overlaps(&self, other: &WinRange) -> bool {
        self.range.overlaps(&other.range)
    }
}

/// Range type as written in the settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeType {
    Normal,
    Jackpot,
}

/// One configured row of the ranges table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSpec {
    pub from: i64,
    pub to: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mult: Option<f64>,
    pub range_type: RangeType,
}

impl RangeSpec {
    pub fn normal(from: i64, to: i64, mult: f64) -> Self {
        Self {
            from,
            to,
            mult: Some(mult),
            range_type: RangeType::Normal,
        }
    }

    pub fn jackpot(from: i64, to: i64) -> Self {
        Self {
            from,
            to,
            mult: None,
            range_type: RangeType::Jackpot,
        }
    }
}

/// Checks whether any two ranges overlap
pub fn any_range_overlap(ranges: &[WinRange]) -> bool {
    ranges
        .iter()
        .enumerate()
        .any(|(i, a)| ranges[i + 1..].iter().any(|b| a.overlaps(b)))
}

/// Checks that the union of `ranges` covers `full` without gaps.
///
/// Ranges fully included in an earlier (sorted) range are ignored for the
/// gap check.
pub fn covers_full_range(ranges: &[WinRange], full: NumericRange) -> bool {
    let mut sorted: Vec<NumericRange> = ranges.iter().map(|r| r.range).collect();
    sorted.sort();

    let mut kept: Vec<NumericRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match kept.last() {
            Some(last) if last.includes(&range) => {}
            _ => kept.push(range),
        }
    }

    let (Some(first), Some(last)) = (kept.first(), kept.last()) else {
        return false;
    };

    let has_gaps = kept.windows(2).any(|pair| pair[0].to < pair[1].from - 1);

    first.from <= full.from && last.to >= full.to && !has_gaps
}

/// Validated, sorted set of win ranges
#[derive(Debug, Clone, PartialEq)]
pub struct RangePartition {
    ranges: Vec<WinRange>,
    min: i64,
    max: i64,
}

impl RangePartition {
    /// Validates `ranges` and builds the partition.
    pub fn build(mut ranges: Vec<WinRange>) -> Result<Self, RangeError> {
        if ranges.is_empty() {
            return Err(RangeError::Empty);
        }

        ranges.sort_by(|a, b| a.range.cmp(&b.range));
        let min = ranges.iter().map(|r| r.range.from()).min().unwrap_or(0);
        let max = ranges.iter().map(|r| r.range.to()).max().unwrap_or(0);

        if any_range_overlap(&ranges) {
            Err(RangeError::Overlap)
        } else if !covers_full_range(&ranges, NumericRange::new(min, max)) {
            Err(RangeError::NonContiguous)
        } else if min < 0 {
            Err(RangeError::Negative)
        } else {
            Ok(Self { ranges, min, max })
        }
    }

    /// Builds the partition straight from configured rows
    pub fn from_specs(specs: &[RangeSpec]) -> Result<Self, RangeError> {
        Self::build(specs.iter().map(WinRange::from_spec).collect())
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn ranges(&self) -> &[WinRange] {
        &self.ranges
    }

    /// The range containing `roll`, if the roll is inside `[min, max]`
    pub fn matching(&self, roll: i64) -> Option<&WinRange> {
        self.ranges.iter().find(|r| r.range.contains(roll))
    }
}

/// Human-readable problems with configured ranges, empty when valid
pub fn validate_ranges(specs: &[RangeSpec]) -> Vec<String> {
    match RangePartition::from_specs(specs) {
        Ok(_) => Vec::new(),
        Err(e) => vec![e.to_string()],
    }
}

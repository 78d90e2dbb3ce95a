use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::Range;
use crate::error::{ChartError, ChartResult};

/// Strategy turning data bounds into the range an axis displays.
///
/// Implementations must return a range with finite bounds and positive
/// extent; [`Range::with_nonzero_extent`] does the substitution.
pub trait RangePolicy: fmt::Debug {
    fn apply(&self, data: Range) -> Range;
}

/// Always shows all data.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UnboundedRange;

impl RangePolicy for UnboundedRange {
    fn apply(&self, data: Range) -> Range {
        data.with_nonzero_extent()
    }
}

/// Ignores the data and shows a fixed window (zoom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedViewport {
    pub range: Range,
}

impl RangePolicy for FixedViewport {
    fn apply(&self, _data: Range) -> Range {
        self.range.with_nonzero_extent()
    }
}

/// Shows at least `range`, growing when data exceeds it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimumViewport {
    pub range: Range,
}

impl RangePolicy for MinimumViewport {
    fn apply(&self, data: Range) -> Range {
        data.union(self.range).with_nonzero_extent()
    }
}

/// Keeps `point` (typically 0) inside the displayed range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForcedPoint {
    pub point: f64,
}

impl RangePolicy for ForcedPoint {
    fn apply(&self, data: Range) -> Range {
        data.include(self.point).with_nonzero_extent()
    }
}

/// Trailing window of width `count` ending at the highest value.
///
/// `count` is expected to be non-negative; [`RangePolicyConfig::validate`]
/// rejects anything else. A negative count yields an inverted window, which
/// [`Range::with_nonzero_extent`] swaps into `(max, max + |count|)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighestValues {
    pub count: f64,
}

impl RangePolicy for HighestValues {
    fn apply(&self, data: Range) -> Range {
        if !data.max.is_finite() {
            return data.with_nonzero_extent();
        }
        Range::new(data.max - self.count, data.max).with_nonzero_extent()
    }
}

/// Serializable description of the built-in policies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RangePolicyConfig {
    #[default]
    Unbounded,
    FixedViewport {
        min: f64,
        max: f64,
    },
    MinimumViewport {
        min: f64,
        max: f64,
    },
    ForcedPoint {
        point: f64,
    },
    HighestValues {
        count: f64,
    },
}

impl RangePolicyConfig {
    pub fn validate(self) -> ChartResult<Self> {
        match self {
            Self::HighestValues { count } if !(count >= 0.0 && count.is_finite()) => {
                Err(ChartError::InvalidConfig(format!(
                    "highest values count must be finite and >= 0, got {count}"
                )))
            }
            _ => Ok(self),
        }
    }
}

impl RangePolicy for RangePolicyConfig {
    fn apply(&self, data: Range) -> Range {
        match *self {
            Self::Unbounded => UnboundedRange.apply(data),
            Self::FixedViewport { min, max } => FixedViewport {
                range: Range::new(min, max),
            }
            .apply(data),
            Self::MinimumViewport { min, max } => MinimumViewport {
                range: Range::new(min, max),
            }
            .apply(data),
            Self::ForcedPoint { point } => ForcedPoint { point }.apply(data),
            Self::HighestValues { count } => HighestValues { count }.apply(data),
        }
    }
}

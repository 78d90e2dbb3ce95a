use serde::{Deserialize, Serialize};

use crate::core::DataPoint;

/// Extent added to `max` when a range collapses onto a single value.
pub const DEGENERATE_RANGE_WIDENING: f64 = 10.0;

/// Inclusive `[min, max]` interval of one axis dimension.
///
/// `min <= max` is not enforced; [`Range::with_nonzero_extent`] turns any
/// range into one that is safe to divide by.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Bounds of nothing: folding any value into it yields that value.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    #[must_use]
    pub fn extent(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.min <= self.max)
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    #[must_use]
    pub fn include(self, value: f64) -> Self {
        if value.is_nan() {
            return self;
        }
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// X and Y bounds of a trace, skipping discontinuities.
    #[must_use]
    pub fn bounds_of(points: &[DataPoint]) -> (Self, Self) {
        points
            .iter()
            .filter(|point| !point.is_discontinuity())
            .fold((Self::empty(), Self::empty()), |(x, y), point| {
                (x.include(point.x), y.include(point.y))
            })
    }

    /// Returns a range that has finite bounds and a strictly positive extent.
    ///
    /// Non-finite bounds fall back to the finite one (or 0). Inverted bounds
    /// are swapped and a collapsed range is widened by
    /// [`DEGENERATE_RANGE_WIDENING`].
    #[must_use]
    pub fn with_nonzero_extent(self) -> Self {
        let (mut min, mut max) = match (self.min.is_finite(), self.max.is_finite()) {
            (true, true) => (self.min, self.max),
            (true, false) => (self.min, self.min),
            (false, true) => (self.max, self.max),
            (false, false) => (0.0, 0.0),
        };
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        let extent = max - min;
        if !(extent > 0.0) || !extent.is_finite() {
            max = min + DEGENERATE_RANGE_WIDENING;
        }
        Self { min, max }
    }

    /// Position of `value` relative to this range, 0 at `min` and 1 at `max`.
    #[must_use]
    pub fn normalize(self, value: f64) -> f64 {
        (value - self.min) / self.extent()
    }

    #[must_use]
    pub fn denormalize(self, normalized: f64) -> f64 {
        self.min + normalized * self.extent()
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::new(0.0, DEGENERATE_RANGE_WIDENING)
    }
}

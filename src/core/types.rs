use serde::{Deserialize, Serialize};

/// Pixel size of the drawing surface handed over by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One sample of a trace.
///
/// A NaN coordinate marks a discontinuity: the trace is not connected across
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Marker point that breaks a trace into separately drawn runs.
    #[must_use]
    pub fn discontinuity() -> Self {
        Self {
            x: f64::NAN,
            y: f64::NAN,
        }
    }

    #[must_use]
    pub fn is_discontinuity(self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    /// Equality that treats two discontinuities as the same point.
    #[must_use]
    pub fn same_as(self, other: Self) -> bool {
        if self.is_discontinuity() || other.is_discontinuity() {
            return self.is_discontinuity() && other.is_discontinuity();
        }
        self == other
    }
}

/// Point rescaled into the unit square of the current viewport.
///
/// Coordinates outside `[0, 1]` are off-screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaledPoint {
    pub x: f64,
    pub y: f64,
}

impl ScaledPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_visible(self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

use serde::{Deserialize, Serialize};

use crate::core::AxisDimension;
use crate::error::{ChartError, ChartResult};

/// Pixel-space line piece of one trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentPrimitive {
    /// Insertion index of the trace the segment belongs to.
    pub trace_index: usize,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl SegmentPrimitive {
    #[must_use]
    pub const fn new(trace_index: usize, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            trace_index,
            x1,
            y1,
            x2,
            y2,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "segment coordinates must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Tick mark and label placed along one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickLabelPrimitive {
    pub dimension: AxisDimension,
    /// Pixel coordinate along the axis (x for X, y for Y).
    pub pixel: f64,
    pub text: String,
    pub is_major_tick: bool,
}

impl TickLabelPrimitive {
    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "tick label must not be empty".to_owned(),
            ));
        }
        if !self.pixel.is_finite() {
            return Err(ChartError::InvalidData(
                "tick label position must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

use serde::{Deserialize, Serialize};

use crate::core::types::Viewport;
use crate::core::{DataPoint, Range, ScaledPoint};
use crate::error::{ChartError, ChartResult};

/// Mapping between data values and the space ticks and normalization use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AxisTransform {
    /// Uniform spacing in raw data units.
    #[default]
    Linear,
    /// Uniform spacing in decades. Non-positive values have no position.
    Log10,
}

impl AxisTransform {
    /// Maps a data value into axis space; NaN when it has no position.
    #[must_use]
    pub fn to_axis(self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Log10 if value > 0.0 => value.log10(),
            Self::Log10 => f64::NAN,
        }
    }

    #[must_use]
    pub fn from_axis(self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Log10 => 10_f64.powf(value),
        }
    }

    /// Transforms data bounds, dropping the non-positive part on log axes.
    #[must_use]
    pub fn range_to_axis(self, range: Range) -> Range {
        match self {
            Self::Linear => range,
            Self::Log10 => Range::empty()
                .include(self.to_axis(range.min))
                .include(self.to_axis(range.max)),
        }
    }
}

/// Chart dimension an axis is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisDimension {
    X,
    Y,
}

/// Pixel margins kept free around the plot for labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotInsets {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for PlotInsets {
    fn default() -> Self {
        Self {
            left: 48.0,
            right: 16.0,
            top: 16.0,
            bottom: 32.0,
        }
    }
}

/// Pixel rectangle the unit square is mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn new(viewport: Viewport, insets: PlotInsets) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let width = f64::from(viewport.width) - insets.left - insets.right;
        let height = f64::from(viewport.height) - insets.top - insets.bottom;
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "plot insets leave no drawable area: width={width}, height={height}"
            )));
        }

        Ok(Self {
            left: insets.left,
            top: insets.top,
            width,
            height,
        })
    }

    /// Pixels available along `dimension`.
    #[must_use]
    pub fn extent(self, dimension: AxisDimension) -> f64 {
        match dimension {
            AxisDimension::X => self.width,
            AxisDimension::Y => self.height,
        }
    }

    /// Pixel coordinate of a normalized position; Y grows downwards.
    #[must_use]
    pub fn to_pixel(self, dimension: AxisDimension, normalized: f64) -> f64 {
        match dimension {
            AxisDimension::X => self.left + normalized * self.width,
            AxisDimension::Y => self.top + (1.0 - normalized) * self.height,
        }
    }

    #[must_use]
    pub fn point_to_pixel(self, point: ScaledPoint) -> (f64, f64) {
        (
            self.to_pixel(AxisDimension::X, point.x),
            self.to_pixel(AxisDimension::Y, point.y),
        )
    }
}

/// Resolved axis state of one render pass: transform plus displayed range
/// in axis space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisFrame {
    pub transform: AxisTransform,
    pub range: Range,
}

impl AxisFrame {
    #[must_use]
    pub fn normalize(self, value: f64) -> f64 {
        self.range.normalize(self.transform.to_axis(value))
    }
}

/// Scales a data point into the unit square; `None` for discontinuities,
/// infinite values and values a log axis cannot place.
#[must_use]
pub fn scale_point(point: DataPoint, x: AxisFrame, y: AxisFrame) -> Option<ScaledPoint> {
    if point.is_discontinuity() {
        return None;
    }
    let scaled = ScaledPoint::new(x.normalize(point.x), y.normalize(point.y));
    if !scaled.is_finite() {
        return None;
    }
    Some(scaled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_transform_drops_non_positive_bounds() {
        let range = AxisTransform::Log10.range_to_axis(Range::new(-5.0, 1000.0));
        assert_eq!(range, Range::new(3.0, 3.0));
    }

    #[test]
    fn y_pixels_grow_downwards() {
        let area = PlotArea::new(Viewport::new(200, 100), PlotInsets {
            left: 0.0,
            right: 0.0,
            top: 0.0,
            bottom: 0.0,
        })
        .expect("valid area");
        assert_eq!(area.to_pixel(AxisDimension::Y, 1.0), 0.0);
        assert_eq!(area.to_pixel(AxisDimension::Y, 0.0), 100.0);
        assert_eq!(area.to_pixel(AxisDimension::X, 0.5), 100.0);
    }

    #[test]
    fn insets_larger_than_viewport_are_rejected() {
        let result = PlotArea::new(Viewport::new(40, 40), PlotInsets::default());
        assert!(result.is_err());
    }
}

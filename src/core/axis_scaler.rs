use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::{
    AxisDimension, AxisTransform, LabelFormatter, NumberLabelFormatter, Range, RangePolicy,
    TickRounder, TickRounding, TickSpacing, UnboundedRange,
};
use crate::error::{ChartError, ChartResult};

/// Upper bound on rounder calls per axis and pass.
pub const MAX_TICK_ITERATIONS: usize = 100;

/// Upper bound on [`LabelMetrics::padding_chars`].
pub const MAX_LABEL_PADDING_CHARS: usize = 64;

/// Tick label ready for a painter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledValue {
    /// Data value the label text stands for.
    pub value: f64,
    /// Position along the axis, 0 at the displayed minimum and 1 at the
    /// maximum.
    pub normalized_position: f64,
    pub text: String,
    pub is_major_tick: bool,
}

/// Result of one tick pass over an axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisTicks {
    /// Displayed range in axis space.
    pub range: Range,
    pub labels: Vec<LabeledValue>,
    /// Rounder calls performed.
    pub iterations: usize,
    /// The loop stopped at [`MAX_TICK_ITERATIONS`] before passing the maximum.
    pub truncated: bool,
    pub zero_hits: usize,
    /// Ticks left unlabeled because their text has no axis position.
    pub dropped: usize,
}

/// Pixel size of label glyphs; fonts themselves belong to the painter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelMetrics {
    pub char_width_px: f64,
    pub line_height_px: f64,
    /// Extra characters of spacing between two horizontal labels.
    pub padding_chars: usize,
}

impl Default for LabelMetrics {
    fn default() -> Self {
        Self {
            char_width_px: 7.0,
            line_height_px: 14.0,
            padding_chars: 2,
        }
    }
}

impl LabelMetrics {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.char_width_px.is_finite()
            || !self.line_height_px.is_finite()
            || self.char_width_px <= 0.0
            || self.line_height_px <= 0.0
        {
            return Err(ChartError::InvalidConfig(
                "label metrics must be finite and > 0".to_owned(),
            ));
        }
        if self.padding_chars > MAX_LABEL_PADDING_CHARS {
            return Err(ChartError::InvalidConfig(format!(
                "label padding must be <= {MAX_LABEL_PADDING_CHARS} characters, got {}",
                self.padding_chars
            )));
        }
        Ok(self)
    }

    /// Pixels one label occupies along an axis of `dimension`.
    #[must_use]
    pub fn pixels_per_label(self, dimension: AxisDimension, max_chars: usize) -> f64 {
        match dimension {
            AxisDimension::X => {
                max_chars.saturating_add(self.padding_chars) as f64 * self.char_width_px
            }
            AxisDimension::Y => self.line_height_px,
        }
    }
}

/// Computes the displayed range and tick labels of one axis.
#[derive(Debug)]
pub struct AxisScaler {
    dimension: AxisDimension,
    policy: Box<dyn RangePolicy + Send + Sync>,
    transform: AxisTransform,
    spacing: TickSpacing,
    start_major_tick: bool,
    formatter: Box<dyn LabelFormatter + Send + Sync>,
    metrics: LabelMetrics,
}

impl AxisScaler {
    #[must_use]
    pub fn new(dimension: AxisDimension) -> Self {
        Self {
            dimension,
            policy: Box::new(UnboundedRange),
            transform: AxisTransform::Linear,
            spacing: TickSpacing::default(),
            start_major_tick: false,
            formatter: Box::new(NumberLabelFormatter::default()),
            metrics: LabelMetrics::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: impl RangePolicy + Send + Sync + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    #[must_use]
    pub fn with_boxed_policy(mut self, policy: Box<dyn RangePolicy + Send + Sync>) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Box<dyn LabelFormatter + Send + Sync>) -> Self {
        self.formatter = formatter;
        self
    }

    #[must_use]
    pub fn with_transform(mut self, transform: AxisTransform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_spacing(mut self, spacing: TickSpacing) -> ChartResult<Self> {
        self.spacing = spacing.validate()?;
        Ok(self)
    }

    /// Drops labels until the first major tick.
    #[must_use]
    pub fn with_start_major_tick(mut self, start_major_tick: bool) -> Self {
        self.start_major_tick = start_major_tick;
        self
    }

    pub fn with_metrics(mut self, metrics: LabelMetrics) -> ChartResult<Self> {
        self.metrics = metrics.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn dimension(&self) -> AxisDimension {
        self.dimension
    }

    #[must_use]
    pub fn transform(&self) -> AxisTransform {
        self.transform
    }

    #[must_use]
    pub fn formatter(&self) -> &dyn LabelFormatter {
        self.formatter.as_ref()
    }

    /// Range to display for `data`, in axis space and never degenerate.
    #[must_use]
    pub fn displayed_range(&self, data: Range) -> Range {
        let range = self.policy.apply(data);
        self.transform.range_to_axis(range).with_nonzero_extent()
    }

    /// Pixels the widest label of `range` (axis space) needs.
    #[must_use]
    pub fn pixels_per_label(&self, range: Range) -> f64 {
        let data_range = Range::new(
            self.transform.from_axis(range.min),
            self.transform.from_axis(range.max),
        );
        let max_chars = self.formatter.max_label_chars(data_range);
        self.metrics.pixels_per_label(self.dimension, max_chars)
    }

    /// Minimum axis-space distance between two labels.
    #[must_use]
    pub fn resolution(&self, range: Range, pixel_extent: f64, min_pixels_per_label: f64) -> f64 {
        if !(pixel_extent > 0.0) {
            return 0.0;
        }
        let label_distance = range.extent() / pixel_extent * min_pixels_per_label;
        let shift = self.formatter.minimum_value_shift();
        match self.transform {
            AxisTransform::Linear => label_distance.max(shift),
            // The shift is in data units. Near the smallest value the
            // formatter can still tell apart, one shift spans at most
            // log10(2) decades.
            AxisTransform::Log10 => {
                let smallest = self.transform.from_axis(range.min).max(shift);
                let step = (1.0 + shift / smallest).log10();
                if step.is_finite() {
                    label_distance.max(step)
                } else {
                    label_distance
                }
            }
        }
    }

    /// Ticks for `data` laid out on `pixel_extent` pixels, sized by the
    /// configured label metrics.
    #[must_use]
    pub fn compute_ticks(&self, data: Range, pixel_extent: f64) -> AxisTicks {
        let range = self.displayed_range(data);
        let min_pixels_per_label = self.pixels_per_label(range);
        self.ticks_in_range(range, pixel_extent, min_pixels_per_label)
    }

    /// Ticks for `data` with an explicit pixel budget per label.
    #[must_use]
    pub fn compute_ticks_with_label_size(
        &self,
        data: Range,
        pixel_extent: f64,
        min_pixels_per_label: f64,
    ) -> AxisTicks {
        let range = self.displayed_range(data);
        self.ticks_in_range(range, pixel_extent, min_pixels_per_label)
    }

    fn ticks_in_range(&self, range: Range, pixel_extent: f64, min_pixels_per_label: f64) -> AxisTicks {
        let resolution = self.resolution(range, pixel_extent, min_pixels_per_label);
        let rounder = TickRounder::new(
            self.spacing,
            range,
            self.transform,
            self.formatter.as_ref(),
        );
        trace!(
            dimension = ?self.dimension,
            min = range.min,
            max = range.max,
            resolution,
            "computing axis ticks"
        );
        generate_ticks(
            &rounder,
            range,
            resolution,
            self.start_major_tick,
            self.transform,
        )
    }
}

/// Walks `range` in steps of `resolution`, rounding each step onto the tick
/// grid of `rounder`.
///
/// `range` must have positive extent. A non-positive or non-finite
/// resolution yields no labels.
pub fn generate_ticks<R: TickRounding + ?Sized>(
    rounder: &R,
    range: Range,
    resolution: f64,
    start_major_tick: bool,
    transform: AxisTransform,
) -> AxisTicks {
    let mut ticks = AxisTicks {
        range,
        ..AxisTicks::default()
    };
    if !(resolution > 0.0) || !resolution.is_finite() {
        return ticks;
    }

    let mut first_major_found = !start_major_tick;
    let mut last_labeled = f64::NEG_INFINITY;
    let mut value = range.min;
    while value <= range.max {
        if ticks.iterations == MAX_TICK_ITERATIONS {
            ticks.truncated = true;
            warn!(
                iterations = ticks.iterations,
                value,
                max = range.max,
                collected = ticks.labels.len(),
                "tick generation hit the iteration cap"
            );
            break;
        }
        ticks.iterations += 1;

        let tick = rounder.round_to_tick(value, false, !first_major_found);
        if tick.zero_hit {
            ticks.zero_hits += 1;
        }
        value = tick.value;
        if tick.is_major_tick {
            first_major_found = true;
        }
        if first_major_found {
            if value > range.max {
                break;
            }
            if !tick.placeable {
                ticks.dropped += 1;
            } else if value >= range.min && value > last_labeled {
                last_labeled = value;
                ticks.labels.push(LabeledValue {
                    value: transform.from_axis(value),
                    normalized_position: range.normalize(value),
                    text: tick.text,
                    is_major_tick: tick.is_major_tick,
                });
            }
        }
        value += resolution;
    }

    ticks
}

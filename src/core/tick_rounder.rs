use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{AxisTransform, LabelFormatter, Range};
use crate::error::{ChartError, ChartResult};

/// Tick spacing in units of the per-pass decade power.
///
/// With `minor = 1` and `major = 5`, a `0..100` axis gets a minor tick every
/// 10 and a major tick every 50.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickSpacing {
    pub minor: f64,
    pub major: f64,
}

impl Default for TickSpacing {
    fn default() -> Self {
        Self {
            minor: 1.0,
            major: 5.0,
        }
    }
}

impl TickSpacing {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.minor.is_finite() || !self.major.is_finite() || self.minor <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "tick spacing must be finite and > 0".to_owned(),
            ));
        }
        if self.major < self.minor {
            return Err(ChartError::InvalidConfig(
                "major tick spacing must be >= minor tick spacing".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// One rounded tick in axis space, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Re-parsed label value, in axis space.
    pub value: f64,
    pub text: String,
    pub is_major_tick: bool,
    /// A non-zero input rounded onto 0. Reported, not corrected.
    pub zero_hit: bool,
    /// `false` when the label text reads back as a value the axis cannot
    /// place, e.g. "0.00" on a log axis. Such ticks must not be labeled.
    pub placeable: bool,
}

/// Rounds values onto the tick grid of one axis.
pub trait TickRounding {
    fn round_to_tick(&self, value: f64, floor: bool, force_major: bool) -> Tick;
}

/// Power of ten that brings `extent` into `[1, 10]`.
///
/// Zero and non-finite extents count as 1.
#[must_use]
pub fn decade_power(extent: f64) -> f64 {
    let mut extent = extent.abs();
    if !extent.is_finite() || extent == 0.0 {
        extent = 1.0;
    }

    let mut exponent = 0_i32;
    while extent > 10.0 {
        extent /= 10.0;
        exponent += 1;
    }
    while extent < 1.0 {
        extent *= 10.0;
        exponent -= 1;
    }
    10_f64.powi(exponent)
}

/// Tick grid of one render pass: spacing scaled by the decade power of the
/// displayed range, plus the formatter that labels it.
#[derive(Debug, Clone, Copy)]
pub struct TickRounder<'a> {
    minor_tick: f64,
    major_tick: f64,
    transform: AxisTransform,
    formatter: &'a dyn LabelFormatter,
}

impl<'a> TickRounder<'a> {
    /// `range` is the displayed range in axis space.
    #[must_use]
    pub fn new(
        spacing: TickSpacing,
        range: Range,
        transform: AxisTransform,
        formatter: &'a dyn LabelFormatter,
    ) -> Self {
        let power = decade_power(range.extent());
        Self {
            minor_tick: spacing.minor * power,
            major_tick: spacing.major * power,
            transform,
            formatter,
        }
    }

    #[must_use]
    pub fn minor_tick(&self) -> f64 {
        self.minor_tick
    }

    #[must_use]
    pub fn major_tick(&self) -> f64 {
        self.major_tick
    }

    /// Formats an axis-space value and reads the label back, so the tick sits
    /// exactly where its text says. The flag is `false` when the text names a
    /// value without an axis position.
    fn label(&self, rounded: f64) -> (String, f64, bool) {
        let text = self.formatter.format(self.transform.from_axis(rounded));
        match self.formatter.parse(&text) {
            Ok(parsed) => {
                let value = self.transform.to_axis(parsed);
                if value.is_finite() {
                    (text, value, true)
                } else {
                    debug!(%text, rounded, "tick label has no position on this axis");
                    (text, rounded, false)
                }
            }
            Err(err) => {
                warn!(error = %err, rounded, "keeping unparsed tick value");
                (text, rounded, true)
            }
        }
    }
}

fn round_multiple(value: f64, tick: f64, floor: bool) -> f64 {
    let steps = value / tick;
    if floor { steps.floor() } else { steps.ceil() }
}

impl TickRounding for TickRounder<'_> {
    fn round_to_tick(&self, value: f64, floor: bool, force_major: bool) -> Tick {
        let major_steps = round_multiple(value, self.major_tick, floor);
        let minor_steps = round_multiple(value, self.minor_tick, floor);
        let zero_hit = value != 0.0 && (major_steps == 0.0 || minor_steps == 0.0);
        if zero_hit {
            debug!(
                value,
                major_tick = self.major_tick,
                minor_tick = self.minor_tick,
                "tick rounding landed on zero for a non-zero value"
            );
        }

        let major_round = major_steps * self.major_tick;
        let minor_round = minor_steps * self.minor_tick;
        let major_distance = (value - major_round).abs();
        let minor_distance = (value - minor_round).abs();

        let (rounded, is_major_tick) = if force_major || major_distance <= minor_distance {
            (major_round, true)
        } else {
            (minor_round, false)
        };

        // -0.0 would otherwise survive into the label of a linear axis.
        let rounded = if rounded == 0.0 { 0.0 } else { rounded };
        let (text, value, placeable) = self.label(rounded);
        Tick {
            value,
            text,
            is_major_tick,
            zero_hit,
            placeable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NumberLabelFormatter;

    #[test]
    fn decade_power_brackets_extent() {
        assert_eq!(decade_power(100.0), 10.0);
        assert_eq!(decade_power(5.0), 1.0);
        assert_eq!(decade_power(1000.0), 100.0);
        assert!((decade_power(0.5) - 0.1).abs() < 1e-15);
        assert_eq!(decade_power(0.0), 1.0);
        assert_eq!(decade_power(f64::INFINITY), 1.0);
    }

    #[test]
    fn exact_minor_multiple_stays_minor() {
        let formatter = NumberLabelFormatter::new(0).expect("formatter");
        let rounder = TickRounder::new(
            TickSpacing::default(),
            Range::new(0.0, 100.0),
            AxisTransform::Linear,
            &formatter,
        );
        let tick = rounder.round_to_tick(30.0, false, false);
        assert_eq!(tick.value, 30.0);
        assert_eq!(tick.text, "30");
        assert!(!tick.is_major_tick);
    }

    #[test]
    fn force_major_overrides_distance() {
        let formatter = NumberLabelFormatter::new(0).expect("formatter");
        let rounder = TickRounder::new(
            TickSpacing::default(),
            Range::new(0.0, 100.0),
            AxisTransform::Linear,
            &formatter,
        );
        let tick = rounder.round_to_tick(12.0, false, true);
        assert_eq!(tick.value, 50.0);
        assert!(tick.is_major_tick);
    }

    #[test]
    fn negative_value_rounding_up_to_zero_is_reported() {
        let formatter = NumberLabelFormatter::new(1).expect("formatter");
        let rounder = TickRounder::new(
            TickSpacing::default(),
            Range::new(-10.0, 10.0),
            AxisTransform::Linear,
            &formatter,
        );
        let tick = rounder.round_to_tick(-0.5, false, false);
        assert!(tick.zero_hit);
        assert_eq!(tick.value, 0.0);
        assert_eq!(tick.text, "0.0");
    }

    #[test]
    fn label_below_formatter_precision_is_not_placeable_on_log_axis() {
        let formatter = NumberLabelFormatter::default();
        let rounder = TickRounder::new(
            TickSpacing::default(),
            Range::new(-3.0, -1.0),
            AxisTransform::Log10,
            &formatter,
        );
        let tick = rounder.round_to_tick(-3.0, false, false);
        assert_eq!(tick.text, "0.00");
        assert!(!tick.placeable);
        assert_eq!(tick.value, -3.0);

        let tick = rounder.round_to_tick(-2.0, false, false);
        assert_eq!(tick.text, "0.01");
        assert!(tick.placeable);
    }
}

use std::fmt;
use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::core::Range;
use crate::error::{ChartError, ChartResult};

/// Turns axis values into label text and back.
///
/// Tick generation formats a rounded value and keeps the parsed text as the
/// tick position, so `parse(format(v))` must be stable under repetition.
pub trait LabelFormatter: fmt::Debug {
    fn format(&self, value: f64) -> String;

    fn parse(&self, text: &str) -> ChartResult<f64>;

    /// Smallest value delta that changes the formatted text.
    fn minimum_value_shift(&self) -> f64;

    /// Widest label (in characters) any value of `range` can produce.
    fn max_label_chars(&self, range: Range) -> usize {
        self.format(range.min)
            .chars()
            .count()
            .max(self.format(range.max).chars().count())
    }
}

/// Decimal numbers with a fixed amount of fraction digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLabelFormatter {
    fraction_digits: u32,
}

impl NumberLabelFormatter {
    /// Decimal's scale limit.
    pub const MAX_FRACTION_DIGITS: u8 = 28;

    pub fn new(fraction_digits: u8) -> ChartResult<Self> {
        if fraction_digits > Self::MAX_FRACTION_DIGITS {
            return Err(ChartError::InvalidConfig(format!(
                "number formatter supports at most {} fraction digits, got {fraction_digits}",
                Self::MAX_FRACTION_DIGITS
            )));
        }
        Ok(Self {
            fraction_digits: u32::from(fraction_digits),
        })
    }

    #[must_use]
    pub fn fraction_digits(self) -> u32 {
        self.fraction_digits
    }
}

impl Default for NumberLabelFormatter {
    fn default() -> Self {
        Self { fraction_digits: 2 }
    }
}

impl LabelFormatter for NumberLabelFormatter {
    fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return "nan".to_owned();
        }

        // Shortest round-trip text, so 2.675 rounds as written and not as
        // its binary expansion.
        let Ok(decimal) = Decimal::from_str(&value.to_string()) else {
            let precision = self.fraction_digits as usize;
            let value = if value.abs() < self.minimum_value_shift() / 2.0 {
                0.0
            } else {
                value
            };
            return format!("{value:.precision$}");
        };
        let mut rounded = decimal
            .round_dp_with_strategy(self.fraction_digits, RoundingStrategy::MidpointAwayFromZero);
        if rounded.is_zero() {
            rounded = Decimal::ZERO;
        }
        rounded.rescale(self.fraction_digits);
        rounded.to_string()
    }

    fn parse(&self, text: &str) -> ChartResult<f64> {
        text.trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| ChartError::LabelParse {
                text: text.to_owned(),
            })
    }

    fn minimum_value_shift(&self) -> f64 {
        10_f64.powi(-(self.fraction_digits as i32))
    }
}

/// Calendar labels for values holding unix milliseconds, rendered in UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLabelFormatter {
    pattern: String,
}

impl DateLabelFormatter {
    pub fn new(pattern: impl Into<String>) -> ChartResult<Self> {
        let pattern = pattern.into();
        if pattern.is_empty()
            || StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error))
        {
            return Err(ChartError::InvalidConfig(format!(
                "invalid date label pattern `{pattern}`"
            )));
        }
        Ok(Self { pattern })
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    fn has_field(&self, fields: &[&str]) -> bool {
        fields.iter().any(|field| self.pattern.contains(field))
    }
}

impl LabelFormatter for DateLabelFormatter {
    fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return "nan".to_owned();
        }
        match DateTime::from_timestamp_millis(value.round() as i64) {
            Some(time) => time.format(&self.pattern).to_string(),
            None => "nan".to_owned(),
        }
    }

    fn parse(&self, text: &str) -> ChartResult<f64> {
        // Time-only patterns cannot be parsed back without losing the day.
        let millis = NaiveDateTime::parse_from_str(text, &self.pattern)
            .map(|time| time.and_utc().timestamp_millis())
            .or_else(|_| {
                NaiveDate::parse_from_str(text, &self.pattern).map(|date| {
                    date.and_hms_opt(0, 0, 0)
                        .map_or(0, |time| time.and_utc().timestamp_millis())
                })
            })
            .map_err(|_| ChartError::LabelParse {
                text: text.to_owned(),
            })?;
        Ok(millis as f64)
    }

    fn minimum_value_shift(&self) -> f64 {
        if self.has_field(&["%f", "%.f", "%3f", "%6f", "%9f", "%.3f", "%.6f", "%.9f"]) {
            1.0
        } else if self.has_field(&["%S", "%T", "%X", "%s", "%c", "%+"]) {
            1_000.0
        } else if self.has_field(&["%M", "%R"]) {
            60_000.0
        } else if self.has_field(&["%H", "%I", "%k", "%l"]) {
            3_600_000.0
        } else {
            86_400_000.0
        }
    }
}

/// Serializable choice of built-in formatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LabelFormatterConfig {
    Number { fraction_digits: u8 },
    Date { pattern: String },
}

impl Default for LabelFormatterConfig {
    fn default() -> Self {
        Self::Number { fraction_digits: 2 }
    }
}

impl LabelFormatterConfig {
    pub fn build(&self) -> ChartResult<Box<dyn LabelFormatter + Send + Sync>> {
        Ok(match self {
            Self::Number { fraction_digits } => {
                Box::new(NumberLabelFormatter::new(*fraction_digits)?)
            }
            Self::Date { pattern } => Box::new(DateLabelFormatter::new(pattern.clone())?),
        })
    }
}

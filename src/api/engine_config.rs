use serde::{Deserialize, Serialize};

use crate::core::{
    AccumulationFunctionKind, AccumulationStrategy, AxisDimension, AxisScaler, AxisTransform,
    LabelFormatterConfig, LabelMetrics, PlotInsets, RangePolicyConfig, TickSpacing, Viewport,
};
use crate::error::{ChartError, ChartResult};

/// Serializable setup of one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AxisConfig {
    #[serde(default)]
    pub range_policy: RangePolicyConfig,
    #[serde(default)]
    pub transform: AxisTransform,
    #[serde(default)]
    pub tick_spacing: TickSpacing,
    #[serde(default)]
    pub start_major_tick: bool,
    #[serde(default)]
    pub label_formatter: LabelFormatterConfig,
    #[serde(default)]
    pub label_metrics: LabelMetrics,
}

impl AxisConfig {
    #[must_use]
    pub fn with_range_policy(mut self, policy: RangePolicyConfig) -> Self {
        self.range_policy = policy;
        self
    }

    #[must_use]
    pub fn with_transform(mut self, transform: AxisTransform) -> Self {
        self.transform = transform;
        self
    }

    #[must_use]
    pub fn with_tick_spacing(mut self, minor: f64, major: f64) -> Self {
        self.tick_spacing = TickSpacing { minor, major };
        self
    }

    #[must_use]
    pub fn with_start_major_tick(mut self, start_major_tick: bool) -> Self {
        self.start_major_tick = start_major_tick;
        self
    }

    #[must_use]
    pub fn with_label_formatter(mut self, formatter: LabelFormatterConfig) -> Self {
        self.label_formatter = formatter;
        self
    }

    #[must_use]
    pub fn with_label_metrics(mut self, metrics: LabelMetrics) -> Self {
        self.label_metrics = metrics;
        self
    }

    /// Builds the scaler for `dimension`, validating every part.
    pub fn build(&self, dimension: AxisDimension) -> ChartResult<AxisScaler> {
        AxisScaler::new(dimension)
            .with_boxed_policy(Box::new(self.range_policy.validate()?))
            .with_transform(self.transform)
            .with_start_major_tick(self.start_major_tick)
            .with_formatter(self.label_formatter.build()?)
            .with_spacing(self.tick_spacing)?
            .with_metrics(self.label_metrics)
    }
}

/// How traces are reduced before clipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AccumulationConfig {
    #[serde(default)]
    pub strategy: AccumulationStrategy,
    #[serde(default)]
    pub function: AccumulationFunctionKind,
    /// Output points per trace; the plot width in pixels when unset.
    #[serde(default)]
    pub target_points: Option<usize>,
}

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can persist chart setup as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub insets: PlotInsets,
    #[serde(default)]
    pub x_axis: AxisConfig,
    #[serde(default)]
    pub y_axis: AxisConfig,
    #[serde(default)]
    pub accumulation: AccumulationConfig,
}

impl ChartEngineConfig {
    /// Creates a config with default axes and no accumulation.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            insets: PlotInsets::default(),
            x_axis: AxisConfig::default(),
            y_axis: AxisConfig::default(),
            accumulation: AccumulationConfig::default(),
        }
    }

    #[must_use]
    pub fn with_insets(mut self, insets: PlotInsets) -> Self {
        self.insets = insets;
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, axis: AxisConfig) -> Self {
        self.x_axis = axis;
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, axis: AxisConfig) -> Self {
        self.y_axis = axis;
        self
    }

    #[must_use]
    pub fn with_accumulation(mut self, accumulation: AccumulationConfig) -> Self {
        self.accumulation = accumulation;
        self
    }

    /// Checks everything the engine would otherwise reject at build time.
    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.x_axis.build(AxisDimension::X)?;
        self.y_axis.build(AxisDimension::Y)?;
        if self.accumulation.target_points == Some(0) {
            return Err(ChartError::InvalidConfig(
                "accumulation target must be > 0 when set".to_owned(),
            ));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))
    }
}

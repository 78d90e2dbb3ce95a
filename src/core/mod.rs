pub mod accumulation;
pub mod axis_scaler;
pub mod clipper;
pub mod label_format;
pub mod range;
pub mod range_policy;
pub mod scale;
pub mod tick_rounder;
pub mod types;

pub use accumulation::{
    Accumulated, AccumulatingIterator, AccumulationFunction, AccumulationFunctionKind,
    AccumulationRequest, AccumulationStrategy, ArithmeticMean, MaxY, MinY, wrap,
};
pub use axis_scaler::{
    AxisScaler, AxisTicks, LabelMetrics, LabeledValue, MAX_LABEL_PADDING_CHARS, MAX_TICK_ITERATIONS,
    generate_ticks,
};
pub use clipper::{Boundary, ClipOutcome, ClippedSegment, ViewportClipper, interpolate_visible};
pub use label_format::{
    DateLabelFormatter, LabelFormatter, LabelFormatterConfig, NumberLabelFormatter,
};
pub use range::{DEGENERATE_RANGE_WIDENING, Range};
pub use range_policy::{
    FixedViewport, ForcedPoint, HighestValues, MinimumViewport, RangePolicy, RangePolicyConfig,
    UnboundedRange,
};
pub use scale::{AxisDimension, AxisFrame, AxisTransform, PlotArea, PlotInsets, scale_point};
pub use tick_rounder::{Tick, TickRounder, TickRounding, TickSpacing, decade_power};
pub use types::{DataPoint, ScaledPoint, Viewport};

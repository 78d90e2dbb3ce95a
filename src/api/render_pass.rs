use tracing::{debug, trace};

use crate::core::{
    AccumulationRequest, AxisDimension, AxisFrame, AxisScaler, AxisTicks, AxisTransform,
    DataPoint, PlotArea, Range, ScaledPoint, Viewport, ViewportClipper, scale_point,
};
use crate::render::{RenderFrame, SegmentPrimitive, TickLabelPrimitive};

use super::AccumulationConfig;

/// Everything one render pass reads.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub viewport: Viewport,
    pub plot_area: PlotArea,
    pub x_axis: &'a AxisScaler,
    pub y_axis: &'a AxisScaler,
    pub accumulation: AccumulationConfig,
}

/// Frame plus the per-axis tick diagnostics it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    pub frame: RenderFrame,
    pub x_ticks: AxisTicks,
    pub y_ticks: AxisTicks,
    /// Points left after accumulation, per trace, discontinuities included.
    pub rendered_points: Vec<usize>,
}

/// Union of the data bounds of all traces, counting only values the axis
/// transforms can place.
#[must_use]
pub fn data_bounds<'t>(
    traces: impl IntoIterator<Item = &'t [DataPoint]>,
    x_transform: AxisTransform,
    y_transform: AxisTransform,
) -> (Range, Range) {
    traces
        .into_iter()
        .flatten()
        .filter(|point| !point.is_discontinuity())
        .fold((Range::empty(), Range::empty()), |(x, y), point| {
            (
                include_placeable(x, x_transform, point.x),
                include_placeable(y, y_transform, point.y),
            )
        })
}

fn include_placeable(range: Range, transform: AxisTransform, value: f64) -> Range {
    if !transform.to_axis(value).is_finite() {
        range
    } else {
        range.include(value)
    }
}

/// Runs axis scaling, accumulation and clipping for `traces`.
///
/// Ticks are resolved first; their ranges define the unit square every trace
/// is clipped against.
#[must_use]
pub fn render_pass(context: &RenderContext<'_>, traces: &[&[DataPoint]]) -> RenderOutput {
    let area = context.plot_area;
    let (x_data, y_data) = data_bounds(
        traces.iter().copied(),
        context.x_axis.transform(),
        context.y_axis.transform(),
    );
    let x_ticks = context
        .x_axis
        .compute_ticks(x_data, area.extent(AxisDimension::X));
    let y_ticks = context
        .y_axis
        .compute_ticks(y_data, area.extent(AxisDimension::Y));

    let x_frame = AxisFrame {
        transform: context.x_axis.transform(),
        range: x_ticks.range,
    };
    let y_frame = AxisFrame {
        transform: context.y_axis.transform(),
        range: y_ticks.range,
    };

    let mut frame = RenderFrame::new(context.viewport, area);
    let mut rendered_points = Vec::with_capacity(traces.len());
    for (trace_index, points) in traces.iter().enumerate() {
        let rendered = clip_trace(context, trace_index, points, x_frame, y_frame, &mut frame);
        rendered_points.push(rendered);
    }

    for (dimension, ticks) in [(AxisDimension::X, &x_ticks), (AxisDimension::Y, &y_ticks)] {
        for label in &ticks.labels {
            frame.tick_labels.push(TickLabelPrimitive {
                dimension,
                pixel: area.to_pixel(dimension, label.normalized_position),
                text: label.text.clone(),
                is_major_tick: label.is_major_tick,
            });
        }
    }

    debug!(
        traces = traces.len(),
        segments = frame.segments.len(),
        x_labels = x_ticks.labels.len(),
        y_labels = y_ticks.labels.len(),
        x_truncated = x_ticks.truncated,
        y_truncated = y_ticks.truncated,
        "render pass complete"
    );

    RenderOutput {
        frame,
        x_ticks,
        y_ticks,
        rendered_points,
    }
}

fn clip_trace(
    context: &RenderContext<'_>,
    trace_index: usize,
    points: &[DataPoint],
    x_frame: AxisFrame,
    y_frame: AxisFrame,
    frame: &mut RenderFrame,
) -> usize {
    let area = context.plot_area;
    let accumulation = context.accumulation;
    let visible_x = Range::new(
        x_frame.transform.from_axis(x_frame.range.min),
        x_frame.transform.from_axis(x_frame.range.max),
    );
    let target_count = accumulation
        .target_points
        .unwrap_or(area.width.max(1.0) as usize);
    let request = AccumulationRequest {
        target_count,
        total_count: points.len(),
        visible_x,
    };
    let accumulated =
        accumulation
            .strategy
            .apply(points.iter().copied(), request, accumulation.function.build());

    let clipper = ViewportClipper;
    let mut previous: Option<ScaledPoint> = None;
    let mut rendered = 0;
    for point in accumulated {
        rendered += 1;
        let Some(current) = scale_point(point, x_frame, y_frame) else {
            previous = None;
            continue;
        };
        let outcome = clipper.clip(previous, current);
        if let Some(segment) = outcome.segment {
            let (x1, y1) = area.point_to_pixel(segment.start);
            let (x2, y2) = area.point_to_pixel(segment.end);
            frame
                .segments
                .push(SegmentPrimitive::new(trace_index, x1, y1, x2, y2));
        }
        previous = Some(outcome.carry);
    }

    trace!(
        trace_index,
        source_points = points.len(),
        rendered,
        "trace clipped"
    );
    rendered
}

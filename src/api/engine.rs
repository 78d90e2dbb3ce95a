use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::core::{AxisDimension, AxisScaler, DataPoint, PlotArea, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::render_pass::{RenderContext, RenderOutput, render_pass};
use super::{AccumulationConfig, AxisConfig, ChartEngineConfig};

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the named traces and both axis scalers, and hands each
/// resolved frame to its renderer. Traces keep insertion order, which is also
/// the `trace_index` of their segments.
#[derive(Debug)]
pub struct ChartEngine<R: Renderer> {
    renderer: R,
    config: ChartEngineConfig,
    plot_area: PlotArea,
    x_axis: AxisScaler,
    y_axis: AxisScaler,
    traces: IndexMap<String, Vec<DataPoint>>,
    dirty: bool,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        config.validate()?;
        let plot_area = PlotArea::new(config.viewport, config.insets)?;
        let x_axis = config.x_axis.build(AxisDimension::X)?;
        let y_axis = config.y_axis.build(AxisDimension::Y)?;

        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            "chart engine initialized"
        );

        Ok(Self {
            renderer,
            config,
            plot_area,
            x_axis,
            y_axis,
            traces: IndexMap::new(),
            dirty: true,
        })
    }

    /// Replaces or inserts the trace called `name`.
    pub fn set_trace(&mut self, name: impl Into<String>, points: Vec<DataPoint>) {
        let name = name.into();
        debug!(trace = %name, points = points.len(), "set trace");
        self.traces.insert(name, points);
        self.dirty = true;
    }

    /// Appends one point, creating the trace when missing.
    pub fn append_point(&mut self, name: &str, point: DataPoint) {
        match self.traces.get_mut(name) {
            Some(points) => points.push(point),
            None => {
                self.traces.insert(name.to_owned(), vec![point]);
            }
        }
        trace!(trace = name, x = point.x, y = point.y, "append point");
        self.dirty = true;
    }

    /// Removes a trace; later traces shift down by one index.
    pub fn remove_trace(&mut self, name: &str) -> Option<Vec<DataPoint>> {
        let removed = self.traces.shift_remove(name);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    pub fn clear_traces(&mut self) {
        if !self.traces.is_empty() {
            self.traces.clear();
            self.dirty = true;
        }
    }

    #[must_use]
    pub fn trace(&self, name: &str) -> Option<&[DataPoint]> {
        self.traces.get(name).map(Vec::as_slice)
    }

    pub fn trace_names(&self) -> impl Iterator<Item = &str> {
        self.traces.keys().map(String::as_str)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        self.plot_area = PlotArea::new(viewport, self.config.insets)?;
        self.config.viewport = viewport;
        self.dirty = true;
        Ok(())
    }

    pub fn set_x_axis_config(&mut self, axis: AxisConfig) -> ChartResult<()> {
        self.x_axis = axis.build(AxisDimension::X)?;
        self.config.x_axis = axis;
        self.dirty = true;
        Ok(())
    }

    pub fn set_y_axis_config(&mut self, axis: AxisConfig) -> ChartResult<()> {
        self.y_axis = axis.build(AxisDimension::Y)?;
        self.config.y_axis = axis;
        self.dirty = true;
        Ok(())
    }

    pub fn set_accumulation(&mut self, accumulation: AccumulationConfig) -> ChartResult<()> {
        if accumulation.target_points == Some(0) {
            return Err(ChartError::InvalidConfig(
                "accumulation target must be > 0 when set".to_owned(),
            ));
        }
        self.config.accumulation = accumulation;
        self.dirty = true;
        Ok(())
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.plot_area
    }

    #[must_use]
    pub fn x_axis(&self) -> &AxisScaler {
        &self.x_axis
    }

    #[must_use]
    pub fn y_axis(&self) -> &AxisScaler {
        &self.y_axis
    }

    /// Resolves ticks and clipped segments without touching the renderer.
    #[must_use]
    pub fn build_frame(&self) -> RenderOutput {
        let context = RenderContext {
            viewport: self.config.viewport,
            plot_area: self.plot_area,
            x_axis: &self.x_axis,
            y_axis: &self.y_axis,
            accumulation: self.config.accumulation,
        };
        let traces: Vec<&[DataPoint]> = self.traces.values().map(Vec::as_slice).collect();
        render_pass(&context, &traces)
    }

    /// Builds a frame and passes it to the renderer.
    pub fn render(&mut self) -> ChartResult<RenderOutput> {
        let output = self.build_frame();
        self.renderer.render(&output.frame)?;
        self.dirty = false;
        Ok(output)
    }

    /// Renders only when something changed since the last render.
    pub fn render_if_dirty(&mut self) -> ChartResult<bool> {
        if !self.dirty {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

use serde::{Deserialize, Serialize};

use crate::core::{PlotArea, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{SegmentPrimitive, TickLabelPrimitive};

/// Backend-agnostic output of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub plot_area: PlotArea,
    pub segments: Vec<SegmentPrimitive>,
    pub tick_labels: Vec<TickLabelPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport, plot_area: PlotArea) -> Self {
        Self {
            viewport,
            plot_area,
            segments: Vec::new(),
            tick_labels: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_segment(mut self, segment: SegmentPrimitive) -> Self {
        self.segments.push(segment);
        self
    }

    #[must_use]
    pub fn with_tick_label(mut self, label: TickLabelPrimitive) -> Self {
        self.tick_labels.push(label);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for segment in &self.segments {
            segment.validate()?;
        }
        for label in &self.tick_labels {
            label.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.tick_labels.is_empty()
    }

    /// Segments of the trace inserted at `trace_index`.
    pub fn trace_segments(&self, trace_index: usize) -> impl Iterator<Item = &SegmentPrimitive> {
        self.segments
            .iter()
            .filter(move |segment| segment.trace_index == trace_index)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

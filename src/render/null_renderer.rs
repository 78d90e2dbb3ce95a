use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op painter for tests and headless use.
///
/// It still validates frames so invalid geometry is caught without a real
/// backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_segment_count: usize,
    pub last_tick_label_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_segment_count = frame.segments.len();
        self.last_tick_label_count = frame.tick_labels.len();
        Ok(())
    }
}

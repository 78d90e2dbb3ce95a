mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{SegmentPrimitive, TickLabelPrimitive};

use crate::error::ChartResult;

/// Painter contract implemented by drawing backends.
///
/// Backends receive a fully resolved `RenderFrame` in pixel space, so stroke
/// styles, fonts and colors stay on their side.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

//! chart2d-core: headless 2D chart computation.
//!
//! Turns raw `(x, y)` traces into a displayed range, tick labels and clipped
//! line segments, leaving all drawing to a [`render::Renderer`].

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};

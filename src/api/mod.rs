mod engine;
mod engine_config;
mod render_pass;

pub use engine::ChartEngine;
pub use engine_config::{AccumulationConfig, AxisConfig, ChartEngineConfig};
pub use render_pass::{RenderContext, RenderOutput, data_bounds, render_pass};

pub mod adapters;
pub mod config;
pub mod controllers;
pub mod core;
pub mod input;
pub mod presenters;

pub use adapters::engine::mandelbrot::MandelbrotEngine;
pub use config::{ConfigError, ExplorerConfig};
pub use controllers::interactive::errors::RenderError;
pub use controllers::interactive::ports::clock::{FixedStepClock, FrameClock, SystemClock};
pub use controllers::interactive::ports::display_surface::{
    BoundingBox, DisplaySurface, SurfaceSize,
};
pub use controllers::interactive::ports::render_engine::{EngineError, RenderEngine};
pub use controllers::interactive::scheduler::{
    RedrawPolicy, RenderScheduler, RunSummary, TickOutcome,
};
pub use controllers::interactive::viewport::{
    SurfaceGeometry, ViewportController, ViewportError, WHEEL_DELTA_SCALE,
};
pub use crate::core::data::complex::Complex;
pub use crate::core::data::complex_rect::ComplexRect;
pub use crate::core::data::pixel_buffer::PixelBufferView;
pub use crate::core::data::view_state::ViewState;
pub use crate::core::stats::frame_stats::{FrameStatsSnapshot, FrameStatsTracker};
pub use input::bindings::{EventResponse, InputBindings, InputEvent};
pub use input::cli::ExplorerArgs;
#[cfg(feature = "gui")]
pub use input::gui::{GuiError, run_gui};
pub use presenters::memory::surface::MemorySurface;

use crate::core::data::complex_rect::{ComplexRect, ComplexRectError};
use crate::core::data::pixel_buffer::PixelBufferView;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("degenerate view region: {0}")]
    DegenerateRegion(#[from] ComplexRectError),
    #[error("view region {width:e}x{height:e} is below f64 resolution for a {plot_width}x{plot_height} plot")]
    PrecisionExhausted {
        width: f64,
        height: f64,
        plot_width: u32,
        plot_height: u32,
    },
    #[error("iteration depth {depth} outside supported range 1..={limit}")]
    DepthOutOfRange { depth: u32, limit: u32 },
    #[error("engine does not support {0}")]
    Unsupported(&'static str),
    #[error("render failed: {0}")]
    Render(String),
}

/// The rendering engine as seen by the scheduler.
///
/// Buffers returned by [`RenderEngine::pixel_buffer`] borrow the engine, so
/// they cannot outlive the next [`RenderEngine::regenerate`] call.
pub trait RenderEngine {
    /// Recomputes the image for `region` at the current iteration depth.
    fn regenerate(&mut self, region: ComplexRect) -> Result<(), EngineError>;

    /// RGBA output of the last regeneration, row-major, top-to-bottom.
    fn pixel_buffer(&self) -> PixelBufferView<'_>;

    fn set_iteration_depth(&mut self, depth: u32) -> Result<(), EngineError>;

    /// The iteration cap of the current depth setting. A count equal to this
    /// value marks a point that never escaped.
    fn max_iteration_depth(&self) -> u32;

    /// Largest depth the engine accepts.
    fn depth_limit(&self) -> u32;

    /// Raw single-byte iteration counts of the last regeneration, for engines
    /// that expose them.
    fn iteration_counts(&self) -> Option<&[u8]> {
        None
    }
}

use crate::controllers::interactive::ports::render_engine::EngineError;
use crate::controllers::interactive::viewport::ViewportError;
use thiserror::Error;

/// Everything that can go wrong while producing one frame or handling one
/// input event. None of these stop the tick loop.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("engine failure: {0}")]
    Engine(#[from] EngineError),
    #[error(
        "buffer size mismatch: expected {expected} bytes for {width}x{height} RGBA, got {actual}"
    )]
    BufferSizeMismatch {
        expected: usize,
        actual: usize,
        width: u32,
        height: u32,
    },
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ViewportError),
}

use crate::core::data::colour::Colour;
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum ColourMapError {
    #[error("iteration count {iterations} exceeds max iterations {max_iterations}")]
    IterationsExceedMax { iterations: u32, max_iterations: u32 },
}

/// Maps an escape-iteration count to a colour. Counts equal to the map's
/// max iterations denote points that never escaped.
pub trait ColourMap: Send + Sync {
    fn map(&self, iterations: u32) -> Result<Colour, ColourMapError>;

    fn max_iterations(&self) -> u32;

    fn display_name(&self) -> &str;
}

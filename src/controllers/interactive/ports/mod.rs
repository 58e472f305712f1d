//! Interfaces between the scheduler and the systems around it.

pub mod clock;
pub mod display_surface;
pub mod render_engine;

//! Interactive viewport control and the render loop.
//!
//! Input moves the [`viewport::ViewportController`]; the
//! [`scheduler::RenderScheduler`] notices the dirty view on its next tick,
//! asks the [`ports::render_engine::RenderEngine`] for a fresh image and
//! paints it onto a [`ports::display_surface::DisplaySurface`].

pub mod errors;
pub mod ports;
pub mod scheduler;
pub mod viewport;

pub mod memory;
#[cfg(feature = "gui")]
pub mod pixels;
pub mod surface;

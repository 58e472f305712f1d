pub mod bit_plane;
pub mod factory;
pub mod fire_gradient;
pub mod kinds;

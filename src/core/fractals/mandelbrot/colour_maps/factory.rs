use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::fractals::mandelbrot::colour_maps::bit_plane::BitPlanePalette;
use crate::core::fractals::mandelbrot::colour_maps::fire_gradient::FireGradient;
use crate::core::fractals::mandelbrot::colour_maps::kinds::ColourMapKind;

#[must_use]
pub fn colour_map_factory(kind: ColourMapKind, max_iterations: u32) -> Box<dyn ColourMap> {
    match kind {
        ColourMapKind::BitPlane => Box::new(BitPlanePalette::new(max_iterations)),
        ColourMapKind::FireGradient => Box::new(FireGradient::new(max_iterations)),
    }
}

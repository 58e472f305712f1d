use crate::core::actions::generate_pixel_buffer::ports::colour_map::{ColourMap, ColourMapError};
use crate::core::data::colour::Colour;
use crate::core::fractals::mandelbrot::colour_maps::kinds::ColourMapKind;

/// Black → red → orange → yellow → white across the iteration range.
#[derive(Debug)]
pub struct FireGradient {
    max_iterations: u32,
}

impl FireGradient {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }
}

impl ColourMap for FireGradient {
    fn map(&self, iterations: u32) -> Result<Colour, ColourMapError> {
        if iterations > self.max_iterations {
            return Err(ColourMapError::IterationsExceedMax {
                iterations,
                max_iterations: self.max_iterations,
            });
        }

        if iterations == self.max_iterations {
            return Ok(Colour::BLACK);
        }

        let t = f64::from(iterations) / f64::from(self.max_iterations);

        let (r, g, b) = if t < 0.25 {
            ((t / 0.25 * 255.0) as u8, 0, 0)
        } else if t < 0.5 {
            (255, ((t - 0.25) / 0.25 * 165.0) as u8, 0)
        } else if t < 0.75 {
            (255, (165.0 + (t - 0.5) / 0.25 * 90.0) as u8, 0)
        } else {
            (255, 255, ((t - 0.75) / 0.25 * 255.0) as u8)
        };

        Ok(Colour { r, g, b })
    }

    fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    fn display_name(&self) -> &str {
        ColourMapKind::FireGradient.display_name()
    }
}

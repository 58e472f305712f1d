use crate::core::actions::generate_pixel_buffer::ports::colour_map::{ColourMap, ColourMapError};
use crate::core::data::colour::Colour;
use crate::core::fractals::mandelbrot::colour_maps::kinds::ColourMapKind;

/// Spreads the low six bits of the count over the three channels, two bits
/// each, in steps of 64. Bounded points are black.
#[derive(Debug)]
pub struct BitPlanePalette {
    max_iterations: u32,
}

impl BitPlanePalette {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }
}

impl ColourMap for BitPlanePalette {
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

        let bits = (iterations & 0x3F) as u8;

        Ok(Colour {
            r: (bits & 0x03) * 64,
            g: ((bits & 0x0C) >> 2) * 64,
            b: ((bits & 0x30) >> 4) * 64,
        })
    }

    fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    fn display_name(&self) -> &str {
        ColourMapKind::BitPlane.display_name()
    }
}

use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::complex_rect::ComplexRect;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::util::pixel_to_complex_coords::{
    PixelToComplexCoordsError, pixel_to_complex_coords,
};
use thiserror::Error;

/// Escape radius squared.
const BAILOUT: f64 = 4.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum MandelbrotAlgorithmConstructorError {
    #[error("maximum iterations must be greater than zero")]
    ZeroMaxIterations,
}

/// Escape-time iteration of `z ← z² + c`. Each pixel yields the iteration at
/// which `|z|²` first exceeded the bailout, or `max_iterations` when it never did.
#[derive(Debug, Clone, PartialEq)]
pub struct MandelbrotAlgorithm {
    pixel_rect: PixelRect,
    complex_rect: ComplexRect,
    max_iterations: u8,
}

impl MandelbrotAlgorithm {
    pub fn new(
        pixel_rect: PixelRect,
        complex_rect: ComplexRect,
        max_iterations: u8,
    ) -> Result<Self, MandelbrotAlgorithmConstructorError> {
        if max_iterations == 0 {
            return Err(MandelbrotAlgorithmConstructorError::ZeroMaxIterations);
        }

        Ok(Self {
            pixel_rect,
            complex_rect,
            max_iterations,
        })
    }
}

impl FractalAlgorithm for MandelbrotAlgorithm {
    type Success = u8;
    type Failure = PixelToComplexCoordsError;

    fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
        let c = pixel_to_complex_coords(pixel, self.pixel_rect, self.complex_rect)?;
        let mut z = Complex::ZERO;

        for iteration in 0..self.max_iterations {
            z = z * z + c;
            if z.magnitude_squared() > BAILOUT {
                return Ok(iteration);
            }
        }

        Ok(self.max_iterations)
    }
}

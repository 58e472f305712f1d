use crate::core::data::complex::Complex;
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum ComplexRectError {
    #[error("complex rect size must be positive and finite: {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
}

/// Axis-aligned region of the complex plane. Imaginary values grow downwards,
/// matching pixel rows.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ComplexRect {
    top_left: Complex,
    bottom_right: Complex,
}

impl ComplexRect {
    pub fn new(top_left: Complex, bottom_right: Complex) -> Result<Self, ComplexRectError> {
        let width = bottom_right.real - top_left.real;
        let height = bottom_right.imag - top_left.imag;

        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ComplexRectError::InvalidSize { width, height });
        }

        Ok(Self {
            top_left,
            bottom_right,
        })
    }

    /// Builds the rect spanning `span` around `center`.
    pub fn from_center(center: Complex, span: Complex) -> Result<Self, ComplexRectError> {
        let half_real = span.real / 2.0;
        let half_imag = span.imag / 2.0;

        Self::new(
            Complex::new(center.real - half_real, center.imag - half_imag),
            Complex::new(center.real + half_real, center.imag + half_imag),
        )
    }

    #[must_use]
    pub fn top_left(&self) -> Complex {
        self.top_left
    }

    #[must_use]
    pub fn bottom_right(&self) -> Complex {
        self.bottom_right
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.bottom_right.real - self.top_left.real
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom_right.imag - self.top_left.imag
    }

    #[must_use]
    pub fn center(&self) -> Complex {
        Complex::new(
            self.top_left.real + self.width() / 2.0,
            self.top_left.imag + self.height() / 2.0,
        )
    }
}

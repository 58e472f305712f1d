use crate::core::data::complex::Complex;
use crate::core::data::complex_rect::ComplexRect;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum PixelToComplexCoordsError {
    #[error("point (x: {}, y: {}) is outside the {}x{} plot", .point.x, .point.y, .pixel_rect.width(), .pixel_rect.height())]
    PointOutsideRect { point: Point, pixel_rect: PixelRect },
}

/// Maps a plot pixel onto the region so that the first and last pixel of each
/// axis land exactly on the region edges.
pub fn pixel_to_complex_coords(
    pixel_position: Point,
    pixel_rect: PixelRect,
    complex_rect: ComplexRect,
) -> Result<Complex, PixelToComplexCoordsError> {
    if !pixel_rect.contains_point(pixel_position) {
        return Err(PixelToComplexCoordsError::PointOutsideRect {
            point: pixel_position,
            pixel_rect,
        });
    }

    let real = complex_rect.top_left().real
        + (f64::from(pixel_position.x) / f64::from(pixel_rect.width() - 1)) * complex_rect.width();
    let imag = complex_rect.top_left().imag
        + (f64::from(pixel_position.y) / f64::from(pixel_rect.height() - 1))
            * complex_rect.height();

    Ok(Complex { real, imag })
}

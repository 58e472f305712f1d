use crate::core::data::complex::Complex;

/// Logical view parameters: what part of the plane is shown, and how deep.
///
/// `zoom` scales the visible span: values above one show more of the plane
/// (zoomed out), values below one show less.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewState {
    pub center: Complex,
    pub zoom: f64,
    pub iteration_depth: u32,
}

impl ViewState {
    #[must_use]
    pub fn new(center: Complex, zoom: f64, iteration_depth: u32) -> Self {
        Self {
            center,
            zoom,
            iteration_depth,
        }
    }

    /// True when `zoom` is finite and strictly positive and the center is finite.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.center.is_finite() && self.zoom.is_finite() && self.zoom > 0.0 && self.iteration_depth > 0
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            center: Complex::ZERO,
            zoom: 1.0,
            iteration_depth: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_view_is_valid() {
        assert!(ViewState::default().is_valid());
    }

    #[test]
    fn zero_zoom_or_depth_is_invalid() {
        assert!(!ViewState::new(Complex::ZERO, 0.0, 10).is_valid());
        assert!(!ViewState::new(Complex::ZERO, f64::NAN, 10).is_valid());
        assert!(!ViewState::new(Complex::ZERO, 1.0, 0).is_valid());
    }
}

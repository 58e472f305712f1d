//! Logical view state and the transforms user input applies to it.
//!
//! The controller owns the [`ViewState`] and the dirty flag. Every accepted
//! transform sets the flag; only the scheduler clears it. No transform paints.

use crate::controllers::interactive::ports::display_surface::{BoundingBox, SurfaceSize};
use crate::core::data::complex::Complex;
use crate::core::data::complex_rect::{ComplexRect, ComplexRectError};
use crate::core::data::view_state::ViewState;
use thiserror::Error;

/// Wheel delta that changes the zoom by a factor of two at unit sensitivity.
pub const WHEEL_DELTA_SCALE: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewportError {
    #[error("zoom factor {factor} must be finite and positive")]
    InvalidZoomFactor { factor: f64 },
    #[error("zoom {zoom} would leave the representable range")]
    ZoomOutOfRange { zoom: f64 },
    #[error("iteration depth {value} is not a positive number")]
    InvalidDepth { value: f64 },
    #[error("iteration depth `{text}` is not a number")]
    UnparsableDepth { text: String },
    #[error("surface coordinates ({x}, {y}) are not finite")]
    InvalidCoordinate { x: f64, y: f64 },
    #[error("surface geometry {surface_width}x{surface_height} shown at {displayed_width}x{displayed_height} is unusable")]
    InvalidSurfaceGeometry {
        surface_width: f64,
        surface_height: f64,
        displayed_width: f64,
        displayed_height: f64,
    },
    #[error("initial view {0:?} is invalid")]
    InvalidInitialView(ViewState),
}

/// Ratio between a surface's backing resolution and its displayed size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceGeometry {
    pub surface_width: f64,
    pub surface_height: f64,
    pub displayed_width: f64,
    pub displayed_height: f64,
}

impl SurfaceGeometry {
    #[must_use]
    pub fn unscaled(width: f64, height: f64) -> Self {
        Self {
            surface_width: width,
            surface_height: height,
            displayed_width: width,
            displayed_height: height,
        }
    }

    #[must_use]
    pub fn from_surface(size: SurfaceSize, bounding_box: BoundingBox) -> Self {
        Self {
            surface_width: f64::from(size.width),
            surface_height: f64::from(size.height),
            displayed_width: bounding_box.width,
            displayed_height: bounding_box.height,
        }
    }

    fn validate(&self) -> Result<(), ViewportError> {
        let all = [
            self.surface_width,
            self.surface_height,
            self.displayed_width,
            self.displayed_height,
        ];

        if all.iter().all(|v| v.is_finite() && *v > 0.0) {
            Ok(())
        } else {
            Err(ViewportError::InvalidSurfaceGeometry {
                surface_width: self.surface_width,
                surface_height: self.surface_height,
                displayed_width: self.displayed_width,
                displayed_height: self.displayed_height,
            })
        }
    }
}

/// Zoom factor for a wheel movement: positive deltas (scrolling down) zoom
/// out, negative deltas zoom in.
#[must_use]
pub fn wheel_zoom_factor(delta_y: f64, sensitivity: f64) -> f64 {
    1.0 + delta_y * sensitivity / WHEEL_DELTA_SCALE
}

#[derive(Debug, Clone)]
pub struct ViewportController {
    view: ViewState,
    initial: ViewState,
    base_span: Complex,
    depth_limit: u32,
    dirty: bool,
}

impl ViewportController {
    /// Starts dirty so the first tick renders.
    pub fn new(initial: ViewState, base_span: Complex, depth_limit: u32) -> Result<Self, ViewportError> {
        let depth_limit = depth_limit.max(1);

        if !initial.is_valid()
            || initial.iteration_depth > depth_limit
            || !(base_span.is_finite() && base_span.real > 0.0 && base_span.imag > 0.0)
        {
            return Err(ViewportError::InvalidInitialView(initial));
        }

        Ok(Self {
            view: initial,
            initial,
            base_span,
            depth_limit,
            dirty: true,
        })
    }

    #[must_use]
    pub fn view(&self) -> ViewState {
        self.view
    }

    /// The view restored by [`Self::reset_view`].
    #[must_use]
    pub fn initial_view(&self) -> ViewState {
        self.initial
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn depth_limit(&self) -> u32 {
        self.depth_limit
    }

    /// Visible extent of the plane at the current zoom.
    #[must_use]
    pub fn span(&self) -> Complex {
        Complex::new(self.base_span.real * self.view.zoom, self.base_span.imag * self.view.zoom)
    }

    pub fn region(&self) -> Result<ComplexRect, ComplexRectError> {
        ComplexRect::from_center(self.view.center, self.span())
    }

    /// Moves the center to the clicked surface position.
    ///
    /// `surface_x`/`surface_y` are relative to the displayed surface's top-left
    /// corner, in displayed pixels; they are rescaled to backing pixels first.
    pub fn recenter(
        &mut self,
        surface_x: f64,
        surface_y: f64,
        geometry: SurfaceGeometry,
    ) -> Result<(), ViewportError> {
        if !(surface_x.is_finite() && surface_y.is_finite()) {
            return Err(ViewportError::InvalidCoordinate {
                x: surface_x,
                y: surface_y,
            });
        }
        geometry.validate()?;

        let x = surface_x * geometry.surface_width / geometry.displayed_width;
        let y = surface_y * geometry.surface_height / geometry.displayed_height;
        let span = self.span();

        let center = Complex::new(
            self.view.center.real + (x / geometry.surface_width - 0.5) * span.real,
            self.view.center.imag + (y / geometry.surface_height - 0.5) * span.imag,
        );

        if !center.is_finite() {
            return Err(ViewportError::InvalidCoordinate {
                x: surface_x,
                y: surface_y,
            });
        }

        self.view.center = center;
        self.dirty = true;
        Ok(())
    }

    /// Multiplies the zoom by `factor`. Above one zooms out.
    pub fn zoom(&mut self, factor: f64) -> Result<(), ViewportError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ViewportError::InvalidZoomFactor { factor });
        }

        let zoom = self.view.zoom * factor;
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(ViewportError::ZoomOutOfRange { zoom });
        }

        self.view.zoom = zoom;
        self.dirty = true;
        Ok(())
    }

    /// The depth `value` would be applied as: rounded to the nearest integer
    /// and clamped to the engine's limit. Leaves the view untouched.
    pub fn resolve_iteration_depth(&self, value: f64) -> Result<u32, ViewportError> {
        let rounded = value.round();
        if !rounded.is_finite() || rounded < 1.0 {
            return Err(ViewportError::InvalidDepth { value });
        }

        if rounded >= f64::from(self.depth_limit) {
            Ok(self.depth_limit)
        } else {
            Ok(rounded as u32)
        }
    }

    /// Sets the iteration depth as resolved by [`Self::resolve_iteration_depth`].
    /// Returns the depth actually applied.
    pub fn set_iteration_depth(&mut self, value: f64) -> Result<u32, ViewportError> {
        let depth = self.resolve_iteration_depth(value)?;

        self.view.iteration_depth = depth;
        self.dirty = true;
        Ok(depth)
    }

    pub fn reset_view(&mut self) {
        self.view = self.initial;
        self.dirty = true;
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

/// Parses a textual depth value, as typed into a numeric field.
pub fn parse_iteration_depth(text: &str) -> Result<f64, ViewportError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| ViewportError::UnparsableDepth {
            text: text.to_owned(),
        })
}

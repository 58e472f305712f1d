//! Explorer settings and the wiring that turns them into a running scheduler.

use thiserror::Error;

use crate::adapters::engine::mandelbrot::{MANDELBROT_DEPTH_LIMIT, MandelbrotEngine};
use crate::controllers::interactive::errors::RenderError;
use crate::controllers::interactive::ports::display_surface::{DisplaySurface, SurfaceSize};
use crate::controllers::interactive::ports::render_engine::{EngineError, RenderEngine};
use crate::controllers::interactive::scheduler::{RedrawPolicy, RenderScheduler};
use crate::controllers::interactive::viewport::{ViewportController, ViewportError};
use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::{PixelRect, PixelRectError};
use crate::core::data::view_state::ViewState;
use crate::core::fractals::mandelbrot::colour_maps::kinds::ColourMapKind;
use crate::core::stats::frame_stats::{DEFAULT_FRAME_HISTORY, FrameStatsTracker};
use crate::input::bindings::InputBindings;
use crate::presenters::surface::adapter::DisplaySurfaceAdapter;
use crate::presenters::surface::strategy::PaintMode;

const DEFAULT_PLOT_SIZE: u32 = 500;
const DEFAULT_BASE_SPAN: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("plot size {width}x{height} is too small")]
    PlotTooSmall {
        width: u32,
        height: u32,
        #[source]
        source: PixelRectError,
    },
    #[error("initial zoom {0} must be finite and positive")]
    InvalidZoom(f64),
    #[error("initial center ({real}, {imag}) is not finite")]
    InvalidCenter { real: f64, imag: f64 },
    #[error("base span {0} must be finite and positive")]
    InvalidBaseSpan(f64),
    #[error("wheel sensitivity {0} must be finite and positive")]
    InvalidWheelSensitivity(f64),
    #[error("frame history must hold at least one sample")]
    EmptyFrameHistory,
    #[error("max iteration depth {max} outside 1..={limit}")]
    InvalidMaxDepth { max: u32, limit: u32 },
    #[error("iteration depth {depth} outside 1..={max}")]
    DepthOutOfRange { depth: u32, max: u32 },
    #[error(transparent)]
    Viewport(#[from] ViewportError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl From<EngineError> for ConfigError {
    fn from(err: EngineError) -> Self {
        Self::Render(RenderError::Engine(err))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerConfig {
    pub plot_width: u32,
    pub plot_height: u32,
    pub initial_view: ViewState,
    /// Width of the plane shown at zoom 1. The height follows the plot's aspect.
    pub base_span: f64,
    pub wheel_sensitivity: f64,
    pub frame_history: usize,
    pub redraw_policy: RedrawPolicy,
    pub colour_map: ColourMapKind,
    pub paint_mode: PaintMode,
    pub max_iteration_depth: u32,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            plot_width: DEFAULT_PLOT_SIZE,
            plot_height: DEFAULT_PLOT_SIZE,
            initial_view: ViewState::default(),
            base_span: DEFAULT_BASE_SPAN,
            wheel_sensitivity: 1.0,
            frame_history: DEFAULT_FRAME_HISTORY,
            redraw_policy: RedrawPolicy::default(),
            colour_map: ColourMapKind::default(),
            paint_mode: PaintMode::default(),
            max_iteration_depth: MANDELBROT_DEPTH_LIMIT,
        }
    }
}

impl ExplorerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.plot_rect()?;

        let view = &self.initial_view;
        if !view.center.is_finite() {
            return Err(ConfigError::InvalidCenter {
                real: view.center.real,
                imag: view.center.imag,
            });
        }
        if !view.zoom.is_finite() || view.zoom <= 0.0 {
            return Err(ConfigError::InvalidZoom(view.zoom));
        }
        if !self.base_span.is_finite() || self.base_span <= 0.0 {
            return Err(ConfigError::InvalidBaseSpan(self.base_span));
        }
        if !self.wheel_sensitivity.is_finite() || self.wheel_sensitivity <= 0.0 {
            return Err(ConfigError::InvalidWheelSensitivity(self.wheel_sensitivity));
        }
        if self.frame_history == 0 {
            return Err(ConfigError::EmptyFrameHistory);
        }
        if self.max_iteration_depth == 0 || self.max_iteration_depth > MANDELBROT_DEPTH_LIMIT {
            return Err(ConfigError::InvalidMaxDepth {
                max: self.max_iteration_depth,
                limit: MANDELBROT_DEPTH_LIMIT,
            });
        }
        if view.iteration_depth == 0 || view.iteration_depth > self.max_iteration_depth {
            return Err(ConfigError::DepthOutOfRange {
                depth: view.iteration_depth,
                max: self.max_iteration_depth,
            });
        }

        Ok(())
    }

    pub fn plot_rect(&self) -> Result<PixelRect, ConfigError> {
        PixelRect::new(self.plot_width, self.plot_height).map_err(|source| {
            ConfigError::PlotTooSmall {
                width: self.plot_width,
                height: self.plot_height,
                source,
            }
        })
    }

    #[must_use]
    pub fn plot_size(&self) -> SurfaceSize {
        SurfaceSize {
            width: self.plot_width,
            height: self.plot_height,
        }
    }

    /// Visible extent at zoom 1, keeping pixels square.
    #[must_use]
    pub fn base_span(&self) -> Complex {
        let aspect = f64::from(self.plot_height) / f64::from(self.plot_width);
        Complex::new(self.base_span, self.base_span * aspect)
    }

    pub fn build_engine(&self) -> Result<MandelbrotEngine, ConfigError> {
        self.validate()?;
        Ok(MandelbrotEngine::new(
            self.plot_rect()?,
            self.colour_map,
            self.initial_view.iteration_depth,
        )?)
    }

    #[must_use]
    pub fn build_bindings(&self) -> InputBindings {
        InputBindings::new(self.wheel_sensitivity, self.initial_view.iteration_depth)
    }

    /// Wires a stopped scheduler around `engine` and `surface`.
    ///
    /// The viewport never allows a depth above what the engine accepts.
    pub fn build_scheduler<E, S>(
        &self,
        engine: E,
        surface: S,
    ) -> Result<RenderScheduler<E, S>, ConfigError>
    where
        E: RenderEngine,
        S: DisplaySurface,
    {
        self.validate()?;

        let depth_limit = self.max_iteration_depth.min(engine.depth_limit());
        if self.initial_view.iteration_depth > depth_limit {
            return Err(ConfigError::DepthOutOfRange {
                depth: self.initial_view.iteration_depth,
                max: depth_limit,
            });
        }

        let viewport =
            ViewportController::new(self.initial_view, self.base_span(), depth_limit)?;
        let display = DisplaySurfaceAdapter::new(
            surface,
            self.plot_size(),
            self.paint_mode.build(self.colour_map),
        );

        Ok(RenderScheduler::new(
            viewport,
            engine,
            display,
            FrameStatsTracker::new(self.frame_history),
            self.redraw_policy,
        )?)
    }
}

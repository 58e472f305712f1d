use clap::Parser;

use crate::config::{ConfigError, ExplorerConfig};
use crate::controllers::interactive::scheduler::RedrawPolicy;
use crate::core::data::complex::Complex;
use crate::core::data::view_state::ViewState;
use crate::core::fractals::mandelbrot::colour_maps::kinds::ColourMapKind;
use crate::presenters::surface::strategy::PaintMode;

/// Command-line options shared by the headless runner and the GUI.
#[derive(Parser, Debug, Clone)]
#[command(name = "fractal-viewport", about = "Interactive Mandelbrot viewport")]
pub struct ExplorerArgs {
    /// Plot width in pixels.
    #[arg(long, env = "FRACTAL_WIDTH", default_value_t = 500)]
    pub width: u32,

    /// Plot height in pixels.
    #[arg(long, env = "FRACTAL_HEIGHT", default_value_t = 500)]
    pub height: u32,

    /// Real part of the initial center.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub center_re: f64,

    /// Imaginary part of the initial center.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub center_im: f64,

    /// Initial zoom; above one shows more of the plane.
    #[arg(long, default_value_t = 1.0)]
    pub zoom: f64,

    /// Initial iteration depth.
    #[arg(long, env = "FRACTAL_DEPTH", default_value_t = 100)]
    pub depth: u32,

    /// Multiplier applied to wheel deltas.
    #[arg(long, default_value_t = 1.0)]
    pub wheel_sensitivity: f64,

    /// Frames kept for the fps statistics.
    #[arg(long, default_value_t = 100)]
    pub frame_history: usize,

    /// `when-dirty` or `every-tick`.
    #[arg(long, default_value = "when-dirty")]
    pub redraw: RedrawPolicy,

    /// `bit-plane` or `fire`.
    #[arg(long, default_value = "bit-plane")]
    pub colour_map: ColourMapKind,

    /// `rgba` or `iteration`.
    #[arg(long, default_value = "rgba")]
    pub paint: PaintMode,

    /// Ticks to run in headless mode.
    #[arg(long, default_value_t = 120)]
    pub ticks: usize,

    /// Zoom factors applied, one per tick, before the remaining ticks run
    /// (headless mode).
    #[arg(long, value_delimiter = ',')]
    pub zoom_script: Vec<f64>,
}

impl TryFrom<&ExplorerArgs> for ExplorerConfig {
    type Error = ConfigError;

    fn try_from(args: &ExplorerArgs) -> Result<Self, Self::Error> {
        let config = ExplorerConfig {
            plot_width: args.width,
            plot_height: args.height,
            initial_view: ViewState::new(
                Complex::new(args.center_re, args.center_im),
                args.zoom,
                args.depth,
            ),
            wheel_sensitivity: args.wheel_sensitivity,
            frame_history: args.frame_history,
            redraw_policy: args.redraw,
            colour_map: args.colour_map,
            paint_mode: args.paint,
            ..ExplorerConfig::default()
        };

        config.validate()?;
        Ok(config)
    }
}

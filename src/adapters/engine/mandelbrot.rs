use tracing::trace;

use crate::controllers::interactive::ports::render_engine::{EngineError, RenderEngine};
use crate::core::actions::generate_fractal::generate_fractal_rayon::generate_fractal_rayon;
use crate::core::actions::generate_pixel_buffer::generate_pixel_buffer::generate_pixel_buffer;
use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::complex_rect::ComplexRect;
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferView};
use crate::core::data::pixel_rect::PixelRect;
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
use crate::core::fractals::mandelbrot::colour_maps::factory::colour_map_factory;
use crate::core::fractals::mandelbrot::colour_maps::kinds::ColourMapKind;

/// Iteration counts are stored as single bytes.
pub const MANDELBROT_DEPTH_LIMIT: u32 = u8::MAX as u32;

/// Mandelbrot renderer behind the [`RenderEngine`] port.
///
/// Keeps one byte of iteration count and four bytes of RGBA per plot pixel.
/// Both are overwritten in place by every successful [`regenerate`]; a failed
/// regeneration leaves the previous image untouched.
///
/// [`regenerate`]: RenderEngine::regenerate
pub struct MandelbrotEngine {
    plot: PixelRect,
    colour_map_kind: ColourMapKind,
    colour_map: Box<dyn ColourMap>,
    depth: u32,
    counts: Vec<u8>,
    rgba: PixelBuffer,
}

impl MandelbrotEngine {
    pub fn new(plot: PixelRect, colour_map_kind: ColourMapKind, depth: u32) -> Result<Self, EngineError> {
        check_depth(depth)?;

        Ok(Self {
            plot,
            colour_map_kind,
            colour_map: colour_map_factory(colour_map_kind, depth),
            depth,
            counts: vec![0; plot.pixel_count()],
            rgba: PixelBuffer::new(plot),
        })
    }

    #[must_use]
    pub fn plot(&self) -> PixelRect {
        self.plot
    }

    #[must_use]
    pub fn colour_map_kind(&self) -> ColourMapKind {
        self.colour_map_kind
    }

    /// Switches palettes. Takes effect at the next regeneration.
    pub fn set_colour_map(&mut self, kind: ColourMapKind) {
        self.colour_map_kind = kind;
        self.colour_map = colour_map_factory(kind, self.depth);
    }

    fn check_precision(&self, region: ComplexRect) -> Result<(), EngineError> {
        let step_real = region.width() / f64::from(self.plot.width() - 1);
        let step_imag = region.height() / f64::from(self.plot.height() - 1);
        let top_left = region.top_left();
        let bottom_right = region.bottom_right();

        let edge_real = top_left.real.abs().max(bottom_right.real.abs());
        let edge_imag = top_left.imag.abs().max(bottom_right.imag.abs());

        // Neighbouring pixels would sample the same f64 value.
        if edge_real + step_real == edge_real || edge_imag + step_imag == edge_imag {
            return Err(EngineError::PrecisionExhausted {
                width: region.width(),
                height: region.height(),
                plot_width: self.plot.width(),
                plot_height: self.plot.height(),
            });
        }

        Ok(())
    }
}

fn check_depth(depth: u32) -> Result<u8, EngineError> {
    match u8::try_from(depth) {
        Ok(depth) if depth > 0 => Ok(depth),
        _ => Err(EngineError::DepthOutOfRange {
            depth,
            limit: MANDELBROT_DEPTH_LIMIT,
        }),
    }
}

impl RenderEngine for MandelbrotEngine {
    fn regenerate(&mut self, region: ComplexRect) -> Result<(), EngineError> {
        self.check_precision(region)?;

        let depth = check_depth(self.depth)?;
        let algorithm = MandelbrotAlgorithm::new(self.plot, region, depth)
            .map_err(|err| EngineError::Render(err.to_string()))?;

        let counts = generate_fractal_rayon(self.plot, &algorithm)
            .map_err(|err| EngineError::Render(err.to_string()))?;
        generate_pixel_buffer(&counts, self.colour_map.as_ref(), &mut self.rgba)
            .map_err(|err| EngineError::Render(err.to_string()))?;
        self.counts = counts;

        trace!(
            real = region.center().real,
            imag = region.center().imag,
            width = region.width(),
            depth = self.depth,
            "regenerated mandelbrot plot"
        );
        Ok(())
    }

    fn pixel_buffer(&self) -> PixelBufferView<'_> {
        self.rgba.view()
    }

    fn set_iteration_depth(&mut self, depth: u32) -> Result<(), EngineError> {
        check_depth(depth)?;

        if depth != self.depth {
            self.depth = depth;
            self.colour_map = colour_map_factory(self.colour_map_kind, depth);
        }
        Ok(())
    }

    fn max_iteration_depth(&self) -> u32 {
        self.depth
    }

    fn depth_limit(&self) -> u32 {
        MANDELBROT_DEPTH_LIMIT
    }

    fn iteration_counts(&self) -> Option<&[u8]> {
        Some(&self.counts)
    }
}

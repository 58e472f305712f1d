//! Ways of turning engine output into an RGBA frame.

use crate::controllers::interactive::errors::RenderError;
use crate::controllers::interactive::ports::render_engine::{EngineError, RenderEngine};
use crate::core::actions::generate_pixel_buffer::generate_pixel_buffer::{
    GeneratePixelBufferError, generate_pixel_buffer,
};
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError, PixelBufferView};
use crate::core::data::pixel_rect::PixelRect;
use crate::core::fractals::mandelbrot::colour_maps::factory::colour_map_factory;
use crate::core::fractals::mandelbrot::colour_maps::kinds::ColourMapKind;

pub trait PaintStrategy {
    /// The frame to paint for the engine's latest regeneration. The frame may
    /// borrow from the engine or from the strategy itself.
    fn frame<'a>(&'a mut self, engine: &'a dyn RenderEngine) -> Result<PixelBufferView<'a>, RenderError>;

    fn name(&self) -> &'static str;
}

/// Paints the engine's RGBA buffer as is.
#[derive(Debug, Default, Clone, Copy)]
pub struct RgbaPaint;

impl PaintStrategy for RgbaPaint {
    fn frame<'a>(&'a mut self, engine: &'a dyn RenderEngine) -> Result<PixelBufferView<'a>, RenderError> {
        Ok(engine.pixel_buffer())
    }

    fn name(&self) -> &'static str {
        "rgba"
    }
}

/// Colours the engine's raw iteration counts per pixel, classifying counts
/// equal to the engine's max depth as bounded.
pub struct IterationPaint {
    colour_map: ColourMapKind,
    scratch: Option<PixelBuffer>,
}

impl IterationPaint {
    #[must_use]
    pub fn new(colour_map: ColourMapKind) -> Self {
        Self {
            colour_map,
            scratch: None,
        }
    }

    fn scratch_for(&mut self, width: u32, height: u32) -> Result<&mut PixelBuffer, RenderError> {
        let pixel_rect = PixelRect::new(width, height)
            .map_err(|err| EngineError::Render(err.to_string()))?;

        let scratch = match self.scratch.take() {
            Some(buffer) if buffer.pixel_rect() == pixel_rect => buffer,
            _ => PixelBuffer::new(pixel_rect),
        };

        Ok(self.scratch.insert(scratch))
    }
}

impl PaintStrategy for IterationPaint {
    fn frame<'a>(&'a mut self, engine: &'a dyn RenderEngine) -> Result<PixelBufferView<'a>, RenderError> {
        let counts = engine
            .iteration_counts()
            .ok_or(EngineError::Unsupported("iteration counts"))?;
        let reference = engine.pixel_buffer();
        let colour_map = colour_map_factory(self.colour_map, engine.max_iteration_depth());
        let scratch = self.scratch_for(reference.width(), reference.height())?;

        generate_pixel_buffer(counts, colour_map.as_ref(), scratch).map_err(|err| match err {
            GeneratePixelBufferError::PixelBuffer(PixelBufferError::BoundsMismatch {
                pixel_rect_size,
                buffer_size,
            }) => RenderError::BufferSizeMismatch {
                expected: pixel_rect_size,
                actual: buffer_size,
                width: reference.width(),
                height: reference.height(),
            },
            other => RenderError::Engine(EngineError::Render(other.to_string())),
        })?;

        Ok(scratch.view())
    }

    fn name(&self) -> &'static str {
        "iteration"
    }
}

/// Selects a [`PaintStrategy`] by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintMode {
    #[default]
    Rgba,
    Iteration,
}

impl PaintMode {
    #[must_use]
    pub fn build(self, colour_map: ColourMapKind) -> Box<dyn PaintStrategy> {
        match self {
            Self::Rgba => Box::new(RgbaPaint),
            Self::Iteration => Box::new(IterationPaint::new(colour_map)),
        }
    }
}

impl std::str::FromStr for PaintMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rgba" => Ok(Self::Rgba),
            "iteration" | "iterations" => Ok(Self::Iteration),
            other => Err(format!("unknown paint mode `{other}` (expected rgba or iteration)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::complex_rect::ComplexRect;

    struct CountsEngine {
        rgba: Vec<u8>,
        counts: Option<Vec<u8>>,
        depth: u32,
    }

    impl RenderEngine for CountsEngine {
        fn regenerate(&mut self, _: ComplexRect) -> Result<(), EngineError> {
            Ok(())
        }

        fn pixel_buffer(&self) -> PixelBufferView<'_> {
            PixelBufferView::new(&self.rgba, 2, 2)
        }

        fn set_iteration_depth(&mut self, depth: u32) -> Result<(), EngineError> {
            self.depth = depth;
            Ok(())
        }

        fn max_iteration_depth(&self) -> u32 {
            self.depth
        }

        fn depth_limit(&self) -> u32 {
            255
        }

        fn iteration_counts(&self) -> Option<&[u8]> {
            self.counts.as_deref()
        }
    }

    #[test]
    fn rgba_paint_borrows_engine_buffer() {
        let engine = CountsEngine {
            rgba: (0..16).collect(),
            counts: None,
            depth: 16,
        };

        let mut paint = RgbaPaint;
        let frame = paint.frame(&engine).unwrap();

        assert_eq!(frame.data(), engine.rgba.as_slice());
    }

    #[test]
    fn iteration_paint_classifies_max_depth_as_bounded() {
        let engine = CountsEngine {
            rgba: vec![0; 16],
            counts: Some(vec![1, 16, 4, 16]),
            depth: 16,
        };
        let mut strategy = IterationPaint::new(ColourMapKind::BitPlane);

        let frame = strategy.frame(&engine).unwrap();

        assert_eq!(
            frame.data(),
            &[
                64, 0, 0, 255, //
                0, 0, 0, 255, //
                0, 64, 0, 255, //
                0, 0, 0, 255,
            ]
        );
    }

    #[test]
    fn iteration_paint_requires_counts() {
        let engine = CountsEngine {
            rgba: vec![0; 16],
            counts: None,
            depth: 16,
        };
        let mut strategy = IterationPaint::new(ColourMapKind::BitPlane);

        assert_eq!(
            strategy.frame(&engine).unwrap_err(),
            RenderError::Engine(EngineError::Unsupported("iteration counts"))
        );
    }

    #[test]
    fn paint_mode_builds_named_strategy() {
        assert_eq!(PaintMode::default().build(ColourMapKind::BitPlane).name(), "rgba");
        assert_eq!(
            "iteration"
                .parse::<PaintMode>()
                .unwrap()
                .build(ColourMapKind::FireGradient)
                .name(),
            "iteration"
        );
    }

    #[test]
    fn iteration_paint_rejects_short_counts() {
        let engine = CountsEngine {
            rgba: vec![0; 16],
            counts: Some(vec![1]),
            depth: 16,
        };
        let mut strategy = IterationPaint::new(ColourMapKind::BitPlane);

        assert!(matches!(
            strategy.frame(&engine),
            Err(RenderError::BufferSizeMismatch { .. })
        ));
    }
}

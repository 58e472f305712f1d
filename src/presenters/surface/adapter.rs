use crate::controllers::interactive::errors::RenderError;
use crate::controllers::interactive::ports::display_surface::{DisplaySurface, SurfaceSize};
use crate::controllers::interactive::ports::render_engine::RenderEngine;
use crate::core::data::pixel_buffer::{BYTES_PER_PIXEL, PixelBufferView};
use crate::presenters::surface::strategy::PaintStrategy;

/// Copies engine frames onto a display surface sized to the plot.
///
/// Every paint replaces the whole previous image; a frame whose byte length
/// or dimensions disagree with the plot is refused before any byte is read.
pub struct DisplaySurfaceAdapter<S: DisplaySurface> {
    surface: S,
    plot: SurfaceSize,
    strategy: Box<dyn PaintStrategy>,
}

impl<S: DisplaySurface> DisplaySurfaceAdapter<S> {
    #[must_use]
    pub fn new(surface: S, plot: SurfaceSize, strategy: Box<dyn PaintStrategy>) -> Self {
        Self {
            surface,
            plot,
            strategy,
        }
    }

    /// Paints `buffer` at the surface origin.
    pub fn paint(&mut self, buffer: PixelBufferView<'_>) -> Result<(), RenderError> {
        paint_surface(&mut self.surface, self.plot, buffer)
    }

    /// Lets the configured strategy turn the engine's output into a frame,
    /// then paints it.
    pub fn paint_from_engine(&mut self, engine: &dyn RenderEngine) -> Result<(), RenderError> {
        let frame = self.strategy.frame(engine)?;
        paint_surface(&mut self.surface, self.plot, frame)
    }

    #[must_use]
    pub fn plot(&self) -> SurfaceSize {
        self.plot
    }

    #[must_use]
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

fn paint_surface<S: DisplaySurface>(
    surface: &mut S,
    plot: SurfaceSize,
    buffer: PixelBufferView<'_>,
) -> Result<(), RenderError> {
    let expected = plot.width as usize * plot.height as usize * BYTES_PER_PIXEL;

    if buffer.width() != plot.width
        || buffer.height() != plot.height
        || buffer.data().len() != expected
    {
        return Err(RenderError::BufferSizeMismatch {
            expected,
            actual: buffer.data().len(),
            width: plot.width,
            height: plot.height,
        });
    }

    surface.draw_image(buffer, 0, 0);
    Ok(())
}

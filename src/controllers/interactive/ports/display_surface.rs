use crate::core::data::pixel_buffer::PixelBufferView;

/// Backing resolution of a surface, in surface pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

/// Where the surface is displayed, in host (window) coordinates. Its size can
/// differ from [`SurfaceSize`] when the host scales the surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && y >= self.top && x < self.left + self.width && y < self.top + self.height
    }
}

/// A 2D raster sink.
pub trait DisplaySurface {
    fn bounding_box(&self) -> BoundingBox;

    fn size(&self) -> SurfaceSize;

    /// Copies `image` with its top-left corner at (`x`, `y`), clipping at the
    /// surface edges.
    fn draw_image(&mut self, image: PixelBufferView<'_>, x: u32, y: u32);
}

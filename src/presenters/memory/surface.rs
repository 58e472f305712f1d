use crate::controllers::interactive::ports::display_surface::{
    BoundingBox, DisplaySurface, SurfaceSize,
};
use crate::core::data::pixel_buffer::{BYTES_PER_PIXEL, PixelBufferView};

/// Off-screen RGBA surface. Backs the headless runner and tests.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    size: SurfaceSize,
    bounding_box: BoundingBox,
    pixels: Vec<u8>,
    draw_count: u64,
}

impl MemorySurface {
    /// A surface displayed unscaled at the host origin.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_display(
            width,
            height,
            BoundingBox {
                left: 0.0,
                top: 0.0,
                width: f64::from(width),
                height: f64::from(height),
            },
        )
    }

    /// A surface whose on-screen placement differs from its backing size.
    #[must_use]
    pub fn with_display(width: u32, height: u32, bounding_box: BoundingBox) -> Self {
        Self {
            size: SurfaceSize { width, height },
            bounding_box,
            pixels: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
            draw_count: 0,
        }
    }

    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA of a single surface pixel, if it lies on the surface.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let index = (y as usize * self.size.width as usize + x as usize) * BYTES_PER_PIXEL;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[index..index + BYTES_PER_PIXEL]);
        Some(rgba)
    }

    #[must_use]
    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }
}

impl DisplaySurface for MemorySurface {
    fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Misshapen images are dropped without drawing.
    fn draw_image(&mut self, image: PixelBufferView<'_>, x: u32, y: u32) {
        if !image.is_well_formed() {
            return;
        }
        self.draw_count += 1;

        if x >= self.size.width || y >= self.size.height {
            return;
        }

        let columns = image.width().min(self.size.width - x) as usize;
        let rows = image.height().min(self.size.height - y);
        let stride = self.size.width as usize * BYTES_PER_PIXEL;

        for (offset, source) in (0..rows).map_while(|row| image.row(row)).enumerate() {
            let source = &source[..columns * BYTES_PER_PIXEL];
            let start = (y as usize + offset) * stride + x as usize * BYTES_PER_PIXEL;
            self.pixels[start..start + source.len()].copy_from_slice(source);
        }
    }
}

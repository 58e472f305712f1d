use crate::core::data::pixel_rect::PixelRect;
use thiserror::Error;

pub const BYTES_PER_PIXEL: usize = 4;

fn pixel_rect_to_buffer_size(pixel_rect: PixelRect) -> usize {
    pixel_rect.pixel_count() * BYTES_PER_PIXEL
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PixelBufferError {
    #[error("pixel rect size {pixel_rect_size} does not match buffer size {buffer_size}")]
    BoundsMismatch {
        pixel_rect_size: usize,
        buffer_size: usize,
    },
}

pub type PixelBufferData = Vec<u8>;

/// Owned RGBA raster, row-major, top-to-bottom, 4 bytes per pixel.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    pixel_rect: PixelRect,
    buffer: PixelBufferData,
}

impl PixelBuffer {
    /// Zeroed (fully transparent) buffer.
    #[must_use]
    pub fn new(pixel_rect: PixelRect) -> Self {
        Self {
            pixel_rect,
            buffer: vec![0; pixel_rect_to_buffer_size(pixel_rect)],
        }
    }

    pub fn from_data(
        pixel_rect: PixelRect,
        buffer: PixelBufferData,
    ) -> Result<Self, PixelBufferError> {
        let buffer_size = pixel_rect_to_buffer_size(pixel_rect);

        if buffer_size != buffer.len() {
            return Err(PixelBufferError::BoundsMismatch {
                pixel_rect_size: buffer_size,
                buffer_size: buffer.len(),
            });
        }

        Ok(Self { pixel_rect, buffer })
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    /// Borrows the buffer for painting. The view lives only as long as the
    /// owner is not mutated, so a regeneration invalidates it.
    #[must_use]
    pub fn view(&self) -> PixelBufferView<'_> {
        PixelBufferView {
            data: &self.buffer,
            width: self.pixel_rect.width(),
            height: self.pixel_rect.height(),
        }
    }
}

/// Borrowed RGBA region handed out by a rendering engine.
///
/// The claimed `width`/`height` are not checked against `data` here; the
/// display adapter validates them before anything is read.
#[derive(Debug, Copy, Clone)]
pub struct PixelBufferView<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> PixelBufferView<'a> {
    #[must_use]
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * BYTES_PER_PIXEL
    }

    /// The data holds exactly `width * height` RGBA pixels.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.data.len() == self.expected_len()
    }

    /// One row of RGBA bytes, or `None` past the end of the data.
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.width as usize * BYTES_PER_PIXEL;
        let start = y as usize * stride;
        self.data.get(start..start + stride)
    }
}

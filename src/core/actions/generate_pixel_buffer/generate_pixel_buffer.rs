use rayon::prelude::*;

use crate::core::actions::generate_pixel_buffer::ports::colour_map::{ColourMap, ColourMapError};
use crate::core::data::pixel_buffer::{BYTES_PER_PIXEL, PixelBuffer, PixelBufferError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratePixelBufferError {
    #[error("colour map error: {0}")]
    ColourMap(#[from] ColourMapError),
    #[error("pixel buffer error: {0}")]
    PixelBuffer(#[from] PixelBufferError),
}

/// Colours `iterations` (one count per pixel, row-major) into `target` in place.
///
/// `target` keeps its allocation between frames; its pixel rect decides how
/// many counts are expected.
pub fn generate_pixel_buffer<M>(
    iterations: &[u8],
    mapper: &M,
    target: &mut PixelBuffer,
) -> Result<(), GeneratePixelBufferError>
where
    M: ColourMap + ?Sized,
{
    let pixel_count = target.pixel_rect().pixel_count();

    if iterations.len() != pixel_count {
        return Err(PixelBufferError::BoundsMismatch {
            pixel_rect_size: pixel_count * BYTES_PER_PIXEL,
            buffer_size: iterations.len() * BYTES_PER_PIXEL,
        }
        .into());
    }

    target
        .buffer_mut()
        .par_chunks_exact_mut(BYTES_PER_PIXEL)
        .zip(iterations.par_iter())
        .try_for_each(|(pixel, &count)| {
            let colour = mapper.map(u32::from(count))?;
            pixel.copy_from_slice(&colour.to_rgba());
            Ok::<(), ColourMapError>(())
        })?;

    Ok(())
}

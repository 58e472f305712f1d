use rayon::prelude::*;

use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;

/// Evaluates `algorithm` for every pixel of `pixel_rect` on rayon's pool.
///
/// Results are row-major, top-to-bottom. The first failing pixel aborts the
/// whole plot.
pub fn generate_fractal_rayon<Alg>(
    pixel_rect: PixelRect,
    algorithm: &Alg,
) -> Result<Vec<Alg::Success>, Alg::Failure>
where
    Alg: FractalAlgorithm + Sync,
    Alg::Success: Send,
    Alg::Failure: Send,
{
    let width = pixel_rect.width() as usize;

    (0..pixel_rect.pixel_count())
        .into_par_iter()
        .map(|index| {
            algorithm.compute(Point {
                x: (index % width) as i32,
                y: (index / width) as i32,
            })
        })
        .collect()
}

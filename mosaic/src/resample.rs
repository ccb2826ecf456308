//! Centered nearest-neighbor resampling into Lab space.
//!
//! No blending happens here: every target cell takes exactly one source pixel. Averaging is left
//! to the bucket pass, which works in Lab space.

use rayon::prelude::*;

use crate::{
    colorspace::{Lab, Rgb},
    image::Image,
};

/// Returns the source coordinate sampled for target cell `i` along an axis of `source` pixels
/// resampled to `target` cells: the pixel containing the center of the cell, which is the pixel
/// whose own center lies nearest to it. Exact ties go to the later pixel.
pub fn source_coordinate(i: usize, source: usize, target: usize) -> usize {
    let (i, source_f, target_f) = (i as f64, source as f64, target as f64);
    let center = source_f / (2.0 * target_f) + i * source_f / target_f;
    (center.floor() as usize).min(source - 1)
}

/// Resamples `image` to `width`×`height` and converts every sampled pixel to Lab.
///
/// Both the source and target dimensions must be non-zero.
pub fn resample(image: &Image<Rgb>, width: usize, height: usize) -> Image<Lab> {
    debug_assert!(image.width > 0 && image.height > 0);
    debug_assert!(width > 0 && height > 0);

    let columns: Vec<_> = (0..width)
        .map(|j| source_coordinate(j, image.width, width))
        .collect();
    let rows: Vec<_> = (0..height)
        .map(|i| source_coordinate(i, image.height, height))
        .collect();

    let pixels = (0..width * height)
        .into_par_iter()
        .map(|index| {
            let (x, y) = (columns[index % width], rows[index / width]);
            image[(x, y)].to_lab()
        })
        .collect();

    Image {
        width,
        height,
        pixels,
    }
}

//! The pixel grid being quantized.

use tracing::{debug, debug_span, trace};

use crate::{
    bucket::Membership,
    colorspace::Rgb,
    error::Error,
    image::Image,
    palette::{self, Palette},
    resample::resample,
};

/// Bytes per pixel in the interleaved input buffer. Alpha is skipped.
const RGBA_STRIDE: usize = 4;

/// Checks that both dimensions are non-zero and returns their pixel count.
fn pixel_count(width: usize, height: usize) -> Result<usize, Error> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(Error::InvalidDimensions { width, height })
}

/// An image of 8-bit sRGB pixels whose width, height, and pixel count always agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    image: Image<Rgb>,
}

impl PixelGrid {
    /// Reads a grid out of an interleaved, row-major RGBA buffer. Trailing bytes past
    /// `4 * width * height` are ignored.
    pub fn from_rgba(bytes: &[u8], width: usize, height: usize) -> Result<Self, Error> {
        let count = pixel_count(width, height)?;
        let expected = count
            .checked_mul(RGBA_STRIDE)
            .ok_or(Error::InvalidDimensions { width, height })?;
        if bytes.len() < expected {
            return Err(Error::BufferTooShort {
                len: bytes.len(),
                expected,
            });
        }

        let pixels = bytes[..expected]
            .chunks_exact(RGBA_STRIDE)
            .map(|rgba| Rgb::new(rgba[0], rgba[1], rgba[2]))
            .collect();
        Ok(Self {
            image: Image {
                width,
                height,
                pixels,
            },
        })
    }

    pub fn from_pixels(pixels: Vec<Rgb>, width: usize, height: usize) -> Result<Self, Error> {
        let count = pixel_count(width, height)?;
        if pixels.len() != count {
            return Err(Error::PixelCountMismatch {
                len: pixels.len(),
                width,
                height,
            });
        }
        Ok(Self {
            image: Image {
                width,
                height,
                pixels,
            },
        })
    }

    pub fn width(&self) -> usize {
        self.image.width
    }

    pub fn height(&self) -> usize {
        self.image.height
    }

    /// The pixels in row-major order.
    pub fn pixels(&self) -> &[Rgb] {
        &self.image.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        self.image.get((x, y)).copied()
    }

    /// Downsamples the grid to `width`×`height` and reduces it to at most one color per bucket,
    /// returning the colors used.
    ///
    /// On error the grid is left as it was.
    pub fn quantize(&mut self, width: usize, height: usize) -> Result<Palette, Error> {
        pixel_count(width, height)?;
        let _span = debug_span!(
            "quantize",
            source_width = self.width(),
            source_height = self.height(),
            width,
            height
        )
        .entered();

        let resampled = resample(&self.image, width, height);
        let membership = Membership::classify(&resampled);
        trace!(buckets = membership.occupied_count(), "classified cells");
        let (averaged, palette) = palette::reduce(&resampled, &membership);

        self.image = averaged.map(|color| color.to_rgb());
        debug!(colors = palette.len(), "quantized");

        Ok(palette)
    }

    /// Encodes the grid as interleaved RGB bytes.
    pub fn to_rgb(&self) -> Vec<u8> {
        self.image
            .pixels
            .iter()
            .flat_map(|color| color.to_array())
            .collect()
    }

    /// Encodes the grid as interleaved RGBA bytes with every pixel fully opaque.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.image
            .pixels
            .iter()
            .flat_map(|color| [color.r, color.g, color.b, 255])
            .collect()
    }
}

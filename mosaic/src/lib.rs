//! Image-to-mosaic color quantization.
//!
//! A [`PixelGrid`] is downsampled to a small grid with centered nearest-neighbor sampling, every
//! cell is sorted into one of fifteen fixed perceptual [`Bucket`]s by lightness and hue, and each
//! occupied bucket is flattened to its mean Lab color. The means form the returned [`Palette`].
//!
//! ```
//! use mosaic::{PixelGrid, Rgb};
//!
//! let mut grid = PixelGrid::from_rgba(&[255, 0, 0, 255].repeat(16), 4, 4)?;
//! let palette = grid.quantize(2, 2)?;
//! assert_eq!(grid.pixels().len(), 4);
//! assert_eq!(palette.len(), 1);
//! assert_eq!(grid.pixels()[0], Rgb::new(255, 0, 0));
//! # Ok::<(), mosaic::Error>(())
//! ```

pub mod bucket;
pub mod colorspace;
mod error;
pub mod grid;
pub mod image;
pub mod palette;
pub mod resample;

pub use bucket::{Bucket, Membership};
pub use colorspace::{Lab, Rgb};
pub use error::Error;
pub use grid::PixelGrid;
pub use image::Image;
pub use palette::{Palette, Swatch};

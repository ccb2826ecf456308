//! Rendering of quantized grids and palettes to images.

use image::{Rgb, RgbImage};
use mosaic::{Palette, PixelGrid};

use crate::error::Error;

fn scaled(cells: usize, cell_size: u32) -> Option<u32> {
    u32::try_from(cells).ok()?.checked_mul(cell_size)
}

fn canvas(width: usize, height: usize, cell_size: u32) -> Result<(u32, u32), Error> {
    if cell_size == 0 {
        return Err(Error::ZeroCellSize);
    }
    let too_large = || Error::OutputTooLarge {
        width,
        height,
        cell_size,
    };
    Ok((
        scaled(width, cell_size).ok_or_else(too_large)?,
        scaled(height, cell_size).ok_or_else(too_large)?,
    ))
}

/// Draws every cell of the grid as a `cell_size`×`cell_size` square.
pub fn render_grid(grid: &PixelGrid, cell_size: u32) -> Result<RgbImage, Error> {
    let (width, height) = canvas(grid.width(), grid.height(), cell_size)?;
    let pixels = grid.pixels();
    Ok(RgbImage::from_fn(width, height, |x, y| {
        let (column, row) = ((x / cell_size) as usize, (y / cell_size) as usize);
        Rgb(pixels[column + row * grid.width()].to_array())
    }))
}

/// Draws the palette as a single row of `cell_size`×`cell_size` squares.
pub fn render_palette(palette: &Palette, cell_size: u32) -> Result<RgbImage, Error> {
    // An empty palette still produces a valid (blank) image.
    let (width, height) = canvas(palette.len().max(1), 1, cell_size)?;
    let colors: Vec<_> = palette.colors().collect();
    Ok(RgbImage::from_fn(width, height, |x, _| {
        colors
            .get((x / cell_size) as usize)
            .map_or(Rgb([0, 0, 0]), |color| Rgb(color.to_array()))
    }))
}

//! Row-major pixel grids.

use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image<T> {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<T>,
}

impl<T> Image<T> {
    /// Builds an image by evaluating `f(x, y)` for every cell, row by row.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn pixel_index(&self, (x, y): (usize, usize)) -> usize {
        x + y * self.width
    }

    pub fn position(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    pub fn get(&self, (x, y): (usize, usize)) -> Option<&T> {
        if x < self.width && y < self.height {
            self.pixels.get(self.pixel_index((x, y)))
        } else {
            None
        }
    }

    /// Maps every pixel into a new image of the same size.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Image<U> {
        Image {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(f).collect(),
        }
    }
}

impl<T> Index<(usize, usize)> for Image<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.pixels[index.0 + index.1 * self.width]
    }
}

impl<T> IndexMut<(usize, usize)> for Image<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self.pixels[index.0 + index.1 * self.width]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_is_row_major() {
        let image = Image::from_fn(3, 2, |x, y| (x, y));
        assert_eq!(image.pixels.len(), 6);
        assert_eq!(image.pixels[1], (1, 0));
        assert_eq!(image.pixels[3], (0, 1));
        assert_eq!(image[(2, 1)], (2, 1));
        assert_eq!(image.position(5), (2, 1));
        assert_eq!(image.pixel_index((2, 1)), 5);
    }

    #[test]
    fn get_is_bounds_checked() {
        let image = Image::from_fn(2, 2, |x, y| x + y);
        assert_eq!(image.get((1, 1)), Some(&2));
        assert_eq!(image.get((2, 0)), None);
        assert_eq!(image.get((0, 2)), None);
    }
}

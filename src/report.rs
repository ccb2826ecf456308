//! Palette reports printed after quantization.

use mosaic::{Palette, PixelGrid};
use serde::Serialize;

use crate::{config::ReportFormat, error::Error};

#[derive(Serialize)]
pub struct Report<'a> {
    pub width: usize,
    pub height: usize,
    pub palette: &'a Palette,
}

impl<'a> Report<'a> {
    pub fn new(grid: &PixelGrid, palette: &'a Palette) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            palette,
        }
    }

    pub fn render(&self, format: ReportFormat) -> Result<String, Error> {
        match format {
            ReportFormat::Text => Ok(self.to_text()),
            ReportFormat::Toml => Ok(toml::to_string(self)?),
        }
    }

    fn to_text(&self) -> String {
        self.palette
            .iter()
            .map(|swatch| format!("{} {}\n", swatch.bucket, swatch.color))
            .collect()
    }
}

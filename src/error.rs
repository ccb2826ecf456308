use image::ImageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error while loading or saving image: {0}")]
    Image(#[from] ImageError),
    #[error("Cannot read config file {path}: {source}")]
    ConfigRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Config TOML deserialization error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Cannot serialize report: {0}")]
    Report(#[from] toml::ser::Error),
    #[error(transparent)]
    Quantize(#[from] mosaic::Error),

    #[error("Cell size must be at least 1 pixel")]
    ZeroCellSize,
    #[error("Image is too large ({width}x{height} cells at cell size {cell_size})")]
    OutputTooLarge {
        width: usize,
        height: usize,
        cell_size: u32,
    },
}

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid dimensions {width}x{height} (both must be non-zero)")]
    InvalidDimensions { width: usize, height: usize },
    #[error("Pixel buffer is too short: got {len} bytes, expected at least {expected}")]
    BufferTooShort { len: usize, expected: usize },
    #[error("Got {len} pixels, which does not match dimensions {width}x{height}")]
    PixelCountMismatch {
        len: usize,
        width: usize,
        height: usize,
    },
}

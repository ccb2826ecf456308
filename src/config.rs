use std::{io::ErrorKind, path::Path};

use serde::Deserialize;
use tracing::debug;

use crate::error::Error;

pub const PATH: &str = "picrossify.toml";

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub mosaic: MosaicConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MosaicConfig {
    /// The number of columns in the quantized grid.
    pub width: usize,
    /// The number of rows in the quantized grid.
    pub height: usize,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// The size of a single mosaic cell in rendered PNGs, in pixels. Must be at least 1.
    pub cell_size: u32,
    /// How the palette is printed to stdout.
    pub format: ReportFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            cell_size: 16,
            format: ReportFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// One `<bucket> #rrggbb` line per palette color.
    Text,
    /// A TOML document with the grid size and palette.
    Toml,
}

impl Config {
    pub fn from_toml(source: &str) -> Result<Self, Error> {
        Ok(toml::from_str(source)?)
    }

    /// Loads the config from `path`, or from [`PATH`] when no path is given.
    ///
    /// A missing file at the default location yields the default config. A missing file that was
    /// asked for explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let explicit = path.is_some();
        let path = path.unwrap_or_else(|| Path::new(PATH));

        debug!("loading config from {}", path.display());
        match std::fs::read_to_string(path) {
            Ok(source) => Self::from_toml(&source),
            Err(error) if error.kind() == ErrorKind::NotFound && !explicit => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(Error::ConfigRead {
                path: path.display().to_string(),
                source,
            }),
        }
    }
}

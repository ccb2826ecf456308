mod config;
mod error;
mod render;
mod report;

use std::path::PathBuf;

use clap::Parser;
use mosaic::PixelGrid;
use tracing::{debug, info};

use crate::{
    config::{Config, ReportFormat},
    error::Error,
    report::Report,
};

/// Turns an image into a small mosaic with a palette of at most 15 colors.
#[derive(Parser)]
struct Args {
    /// The image to quantize.
    image: PathBuf,
    /// Path to the config file. Defaults to `picrossify.toml` in the working directory.
    #[clap(long)]
    config: Option<PathBuf>,
    /// Number of columns in the mosaic. Overrides `mosaic.width`.
    #[clap(long)]
    width: Option<usize>,
    /// Number of rows in the mosaic. Overrides `mosaic.height`.
    #[clap(long)]
    height: Option<usize>,
    /// Where to write the mosaic as a PNG.
    #[clap(long)]
    output: Option<PathBuf>,
    /// Where to write the palette as a strip of color squares.
    #[clap(long)]
    palette_output: Option<PathBuf>,
    /// Palette report format. Overrides `output.format`.
    #[clap(long, value_enum)]
    format: Option<ReportFormat>,
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.mosaic.width = width;
    }
    if let Some(height) = args.height {
        config.mosaic.height = height;
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }
    debug!(?config);

    info!("loading image {}", args.image.display());
    let image = image::open(&args.image)?.to_rgba8();
    let (width, height) = (image.width() as usize, image.height() as usize);
    let mut grid = PixelGrid::from_rgba(image.as_raw(), width, height)?;

    let palette = grid.quantize(config.mosaic.width, config.mosaic.height)?;
    info!(
        "quantized {width}x{height} image to {}x{} cells with {} colors",
        grid.width(),
        grid.height(),
        palette.len()
    );

    if let Some(path) = &args.output {
        render::render_grid(&grid, config.output.cell_size)?.save(path)?;
        info!("wrote mosaic to {}", path.display());
    }
    if let Some(path) = &args.palette_output {
        render::render_palette(&palette, config.output.cell_size)?.save(path)?;
        info!("wrote palette to {}", path.display());
    }

    print!(
        "{}",
        Report::new(&grid, &palette).render(config.output.format)?
    );

    Ok(())
}

//! Command-line entry point: render a listing image to PNG.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use listing_render::config::RenderConfig;
use listing_render::output::write_png;
use listing_render::scene::{render, Preset};

/// Render a product listing image.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Scene to render (laptop or monitor)
    #[arg(short, long)]
    preset: Option<Preset>,

    /// Output PNG path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory holding the TTF font files
    #[arg(long)]
    font_dir: Option<PathBuf>,

    /// JSON configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Use fast PNG compression instead of the smallest output
    #[arg(long)]
    no_optimize: bool,
}

impl Args {
    fn into_config(self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::from_json_file(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?,
            None => RenderConfig::default(),
        };
        if let Some(preset) = self.preset {
            config.preset = preset;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(dir) = self.font_dir {
            config.font_dir = dir;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.no_optimize {
            config.optimize = false;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Args::parse().into_config()?;
    info!("Creating {} listing image...", config.preset);

    let image = render(&config).context("Render failed")?;
    let size = write_png(&image, &config.output, config.optimize)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;

    info!("Saved to: {}", config.output.display());
    info!(
        "Size: {}x{}, file size: {:.2} MB",
        image.width,
        image.height,
        size as f64 / 1024.0 / 1024.0
    );
    Ok(())
}

use std::path::PathBuf;

use altar_cutout::{try_extract_subject, EncodedImage, SegmentationConfig};
use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Cut the subject out of a photograph and write it as a transparent PNG.
///
/// When the input cannot be decoded the original bytes are copied to the
/// output unchanged.
#[derive(Parser, Debug)]
#[command(name = "altar-cutout", version)]
struct Cli {
    /// Input image (PNG or JPEG).
    input: PathBuf,

    /// Output PNG path.
    output: PathBuf,

    /// Longest side processed; larger inputs are downscaled first.
    #[arg(long, default_value_t = 1200, conflicts_with = "no_limit")]
    max_dimension: u32,

    /// Process the input at full size.
    #[arg(long)]
    no_limit: bool,

    /// Search radius of the edge feathering stage.
    #[arg(long, default_value_t = 2)]
    feather_radius: u32,

    /// Number of region-growing passes.
    #[arg(long, default_value_t = 2)]
    passes: usize,

    /// Fraction of width and height sampled in each corner for the background color.
    #[arg(long, default_value_t = 0.15)]
    corner_fraction: f32,

    /// Window radius of the edge-density field.
    #[arg(long, default_value_t = 5)]
    density_radius: u32,

    /// Confidence above which a pixel is treated as subject.
    #[arg(long, default_value_t = 0.4)]
    confidence_threshold: f32,

    /// Log every stage at debug level.
    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> SegmentationConfig {
        SegmentationConfig::default()
            .with_max_dimension((!self.no_limit).then_some(self.max_dimension))
            .with_feather_radius(self.feather_radius)
            .with_region_growth_passes(self.passes)
            .with_corner_fraction(self.corner_fraction)
            .with_density_radius(self.density_radius)
            .with_confidence_threshold(self.confidence_threshold)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config();
    config.validate().context("invalid segmentation parameters")?;

    let bytes = std::fs::read(&cli.input)
        .with_context(|| format!("read input '{}'", cli.input.display()))?;

    let result = try_extract_subject(&EncodedImage(&bytes), &config);
    let output = match result {
        Ok(png) => png,
        Err(error) if error.is_unavailable() => {
            tracing::warn!(%error, "cutout unavailable, copying the original image");
            bytes
        }
        Err(error) => {
            return Err(anyhow::Error::new(error)
                .context(format!("segment '{}'", cli.input.display())));
        }
    };

    if let Some(parent) = cli.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&cli.output, &output)
        .with_context(|| format!("write output '{}'", cli.output.display()))?;

    tracing::info!(
        input = %cli.input.display(),
        output = %cli.output.display(),
        bytes = output.len(),
        "done"
    );
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

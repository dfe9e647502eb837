use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dither_core::{get_palette, DitherAlgorithm, Ditherer, PaletteMode, Parameters};
use ditherbox::frames::{CancelFlag, FrameDriver, PngDirSink, PngDirSource};
use ditherbox::io::{load_png, save_png};
use ditherbox::models::Preset;

#[derive(Parser)]
#[command(name = "ditherbox")]
#[command(about = "Palette dithering for images and frame sequences")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dither a single PNG image
    Image {
        /// Input PNG file
        input: PathBuf,

        /// Output PNG file
        output: PathBuf,

        #[command(flatten)]
        options: DitherArgs,
    },
    /// Dither every PNG in a directory as a frame sequence
    Frames {
        /// Directory of input frames (read in file-name order)
        input_dir: PathBuf,

        /// Directory for frame_000001.png, frame_000002.png, ...
        output_dir: PathBuf,

        #[command(flatten)]
        options: DitherArgs,
    },
    /// List available algorithms
    Algorithms,
    /// List palette presets and their colors
    Palettes {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Dithering options shared by `image` and `frames`.
///
/// Anything left unset comes from `--config`, or from the defaults.
#[derive(Args, Debug, Default)]
struct DitherArgs {
    /// YAML preset to start from
    #[arg(long, value_name = "YAML")]
    config: Option<PathBuf>,

    /// Algorithm name (see `ditherbox algorithms`)
    #[arg(short, long)]
    algorithm: Option<String>,

    /// Palette name (see `ditherbox palettes`)
    #[arg(short, long)]
    palette: Option<String>,

    /// Custom palette as comma-separated hex colors (e.g. "#000,#F80,#FFF")
    #[arg(long, value_delimiter = ',')]
    colors: Option<Vec<String>>,

    /// Error/threshold scaling, 0..2
    #[arg(short, long)]
    strength: Option<f32>,

    /// Gamma, 0.1..3
    #[arg(short, long)]
    gamma: Option<f32>,

    /// Contrast, 0..3
    #[arg(short, long)]
    contrast: Option<f32>,

    /// Brightness, -1..1
    #[arg(short, long, allow_negative_numbers = true)]
    brightness: Option<f32>,

    /// Saturation, 0..2
    #[arg(long)]
    saturation: Option<f32>,

    /// Alternate scan direction on odd rows
    #[arg(long, overrides_with = "no_serpentine")]
    serpentine: bool,

    /// Always scan left to right
    #[arg(long)]
    no_serpentine: bool,

    /// Bayer matrix size for the `bayer` algorithm: 2, 4, 8 or 16
    #[arg(long)]
    bayer_size: Option<usize>,

    /// Seed for noise-based algorithms
    #[arg(long)]
    seed: Option<u64>,

    /// Halftone cell size in pixels
    #[arg(long)]
    pattern_scale: Option<u32>,
}

impl DitherArgs {
    /// Merge flags over the preset (or defaults) into engine parameters.
    fn to_parameters(&self) -> anyhow::Result<Parameters> {
        let mut preset = match &self.config {
            Some(path) => Preset::load(path)
                .with_context(|| format!("Failed to load preset {}", path.display()))?,
            None => Preset::default(),
        };

        if let Some(algorithm) = &self.algorithm {
            preset.algorithm = algorithm.clone();
        }
        if let Some(palette) = &self.palette {
            preset.palette = palette.clone();
        }
        if let Some(colors) = &self.colors {
            preset.colors = Some(colors.clone());
        }
        if let Some(v) = self.strength {
            preset.strength = v;
        }
        if let Some(v) = self.gamma {
            preset.gamma = v;
        }
        if let Some(v) = self.contrast {
            preset.contrast = v;
        }
        if let Some(v) = self.brightness {
            preset.brightness = v;
        }
        if let Some(v) = self.saturation {
            preset.saturation = v;
        }
        if self.serpentine {
            preset.serpentine = true;
        }
        if self.no_serpentine {
            preset.serpentine = false;
        }
        if let Some(v) = self.bayer_size {
            preset.bayer_size = v;
        }
        if let Some(v) = self.seed {
            preset.seed = v;
        }
        if let Some(v) = self.pattern_scale {
            preset.pattern_scale = v;
        }

        Ok(preset.to_parameters()?)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ditherbox=info,dither_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Commands::Image {
            input,
            output,
            options,
        } => run_image_command(&input, &output, &options),
        Commands::Frames {
            input_dir,
            output_dir,
            options,
        } => run_frames_command(&input_dir, &output_dir, &options),
        Commands::Algorithms => {
            run_algorithms_command();
            Ok(())
        }
        Commands::Palettes { json } => run_palettes_command(json),
    }
}

/// Dither one PNG file
fn run_image_command(input: &Path, output: &Path, options: &DitherArgs) -> anyhow::Result<()> {
    let ditherer = Ditherer::new(options.to_parameters()?)?;

    let image = load_png(input).with_context(|| format!("Failed to read {}", input.display()))?;

    let start = Instant::now();
    let result = ditherer.dither(&image);
    let elapsed_ms = start.elapsed().as_millis() as u64;

    save_png(&result, output).with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!(
        width = image.width(),
        height = image.height(),
        algorithm = ditherer.algorithm().name(),
        palette = ditherer.params().palette_mode.name(),
        elapsed_ms,
        "Dithered image"
    );
    println!("Wrote {}", output.display());
    Ok(())
}

/// Dither a directory of PNG frames
fn run_frames_command(
    input_dir: &Path,
    output_dir: &Path,
    options: &DitherArgs,
) -> anyhow::Result<()> {
    let ditherer = Ditherer::new(options.to_parameters()?)?;

    let mut source = PngDirSource::open(input_dir)
        .with_context(|| format!("Failed to open frames in {}", input_dir.display()))?;
    let mut sink = PngDirSink::create(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    tracing::info!(
        frames = source.paths().len(),
        algorithm = ditherer.algorithm().name(),
        palette = ditherer.params().palette_mode.name(),
        "Processing frames"
    );

    let driver = FrameDriver::new(ditherer);
    let written = driver.run(
        &mut source,
        &mut sink,
        |p| eprint!("\r{:5.1}% ({}/{})", p.fraction() * 100.0, p.done, p.total),
        &CancelFlag::new(),
    );
    eprintln!();

    let written = written.context("Frame processing failed")?;
    println!("Wrote {written} frames to {}", output_dir.display());
    Ok(())
}

/// Print slug and display name for every algorithm
fn run_algorithms_command() {
    for algorithm in DitherAlgorithm::ALL {
        println!("  {:<24} {}", algorithm.slug(), algorithm.name());
    }
}

#[derive(Serialize)]
struct PaletteListing {
    slug: &'static str,
    name: &'static str,
    colors: Vec<String>,
}

/// Print every preset palette
fn run_palettes_command(json: bool) -> anyhow::Result<()> {
    let listings: Vec<PaletteListing> = PaletteMode::ALL
        .into_iter()
        .filter(|mode| *mode != PaletteMode::Custom)
        .map(|mode| {
            let colors = get_palette(mode, None)
                .map(|p| p.colors().iter().map(|c| c.to_hex()).collect())
                .unwrap_or_default();
            PaletteListing {
                slug: mode.slug(),
                name: mode.name(),
                colors,
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
        return Ok(());
    }

    for listing in &listings {
        println!("  {:<12} {:<14} {}", listing.slug, listing.name, listing.colors.join(" "));
    }
    println!("  {:<12} {:<14} {}", "custom", "Custom", "(--colors \"#000,#FFF\")");
    Ok(())
}

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use cmf_quicklook::logger;
use cmf_quicklook::quicklook::{
    EnviReader, Finisher, ImageMagickFinisher, NoopFinisher, OutputFormat, OutputMode,
    QuicklookConfig, QuicklookPipeline, StandardImageWriter, TiffCompression,
    finish::DEFAULT_MAX_EDGE,
    scale::{DEFAULT_HIGH_CLIP, DEFAULT_LOW_CLIP},
};

use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Png,
    Tiff,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CompressionArg {
    None,
    Lzw,
    DeflateFast,
    DeflateBalanced,
    DeflateBest,
}

/// Convert 4-band ENVI CMF rasters into 8-bit RGB quicklook images.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Raster files to convert; each needs a sibling `<file>.hdr`
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory the quicklooks are written to
    #[arg(short, long)]
    output_dir: PathBuf,

    /// rgb_image, gray_image, cmf_layer, rgb_detections or blue_detections
    #[arg(long, default_value = "rgb_image", value_parser = OutputMode::from_str)]
    output_type: OutputMode,

    #[arg(long, value_enum, default_value_t = FormatArg::Png)]
    format: FormatArg,

    /// Compression for TIFF output
    #[arg(long, value_enum, default_value_t = CompressionArg::DeflateBalanced)]
    compression: CompressionArg,

    /// Fraction of positive samples stretched to black
    #[arg(long, default_value_t = DEFAULT_LOW_CLIP)]
    low_clip: f64,

    /// Fraction of positive samples below full white
    #[arg(long, default_value_t = DEFAULT_HIGH_CLIP)]
    high_clip: f64,

    /// Run ImageMagick afterwards: key black to transparent and write a resized copy
    #[arg(long)]
    finish: bool,

    /// ImageMagick `convert` executable
    #[arg(long, default_value = "convert")]
    convert_exe: PathBuf,

    /// Longest edge of the resized copy, in pixels
    #[arg(long, default_value_t = DEFAULT_MAX_EDGE)]
    max_edge: u32,

    /// Make written images readable and writable by everyone
    #[arg(long)]
    chmod: bool,

    /// Print per-step timings after each conversion
    #[arg(long)]
    timings: bool,

    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Tiff => OutputFormat::Tiff,
        }
    }
}

impl From<CompressionArg> for TiffCompression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::None => TiffCompression::None,
            CompressionArg::Lzw => TiffCompression::Lzw,
            CompressionArg::DeflateFast => TiffCompression::DeflateFast,
            CompressionArg::DeflateBalanced => TiffCompression::DeflateBalanced,
            CompressionArg::DeflateBest => TiffCompression::DeflateBest,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init(args.verbose);

    info!("Output type is {}", args.output_type);

    let config = QuicklookConfig::builder()
        .clip(args.low_clip, args.high_clip)
        .format(args.format.into())
        .compression(args.compression.into())
        .share_permissions(args.chmod)
        .build();

    let finisher: Box<dyn Finisher> = if args.finish {
        Box::new(ImageMagickFinisher::new(&args.convert_exe, args.max_edge))
    } else {
        Box::new(NoopFinisher)
    };

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating output directory {}", args.output_dir.display()))?;

    let pipeline = QuicklookPipeline::with_custom(EnviReader, StandardImageWriter, finisher, config);

    let results = pipeline.convert_batch(&args.inputs, &args.output_dir, args.output_type);

    let mut failures = 0usize;
    for (input, result) in &results {
        match result {
            Ok((output, timings)) => {
                info!(output = %output.image_path.display(), "Wrote quicklook");
                for path in output.finished.iter().flatten() {
                    info!(path = %path.display(), "Finished copy");
                }
                if args.timings {
                    println!("\n{}\n{}", input.display(), timings);
                }
            }
            Err(_) => failures += 1,
        }
    }

    if failures > 0 {
        bail!("{} of {} conversions failed", failures, results.len());
    }
    Ok(())
}

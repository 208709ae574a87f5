use tracing::{info, info_span};

use crate::quicklook::common::error::{QuicklookError, Result};
use crate::quicklook::common::image::{CHANNELS, RgbImage};
use crate::quicklook::compose::mode::{ANALYTE_BAND, BASE_BAND, OutputMode};
use crate::quicklook::config::QuicklookConfig;
use crate::quicklook::envi::BandSource;
use crate::quicklook::overlay::{ColorPolicy, build_overlay};
use crate::quicklook::scale::{enhance_layer, linear_scale};

const CHANNEL_NAMES: [&str; CHANNELS] = ["red", "green", "blue"];

fn stretched_gray<S: BandSource + ?Sized>(source: &S, config: &QuicklookConfig) -> Result<RgbImage> {
    info!(channel = CHANNEL_NAMES[0], "Working on channel");
    let plane = linear_scale(source.read_plane(BASE_BAND)?, config.low_clip, config.high_clip)?;
    Ok(RgbImage::from_gray(&plane))
}

fn with_detections<S: BandSource + ?Sized>(
    source: &S,
    config: &QuicklookConfig,
    policy: ColorPolicy,
) -> Result<RgbImage> {
    let base = stretched_gray(source, config)?;
    let analyte = source.read_plane(ANALYTE_BAND)?;

    let _span = info_span!("detections", ?policy, thresholds = config.overlay.thresholds.len()).entered();
    build_overlay(&analyte, &config.overlay, policy).composite(base)
}

/// Builds the 3-channel display image for `mode` from the bands of `source`.
pub fn compose<S: BandSource + ?Sized>(
    source: &S,
    mode: OutputMode,
    config: &QuicklookConfig,
) -> Result<RgbImage> {
    let header = source.header();
    if header.bands < mode.required_bands() {
        return Err(QuicklookError::InsufficientBands {
            mode: mode.as_str(),
            required: mode.required_bands(),
            available: header.bands,
        });
    }

    match mode {
        OutputMode::FullColor => {
            let mut image = RgbImage::new(header.lines, header.samples);
            for (channel, name) in CHANNEL_NAMES.iter().enumerate() {
                info!(channel = name, "Working on channel");
                let plane = linear_scale(source.read_plane(channel)?, config.low_clip, config.high_clip)?;
                image.set_channel(channel, &plane)?;
            }
            Ok(image)
        }
        OutputMode::Grayscale => stretched_gray(source, config),
        OutputMode::AnalyteGray => {
            info!("Converting analyte layer to grayscale");
            let reference = source.read_plane(BASE_BAND)?;
            let plane = enhance_layer(source.read_plane(ANALYTE_BAND)?, &reference)?;
            Ok(RgbImage::from_gray(&plane))
        }
        OutputMode::ColorDetections => with_detections(source, config, ColorPolicy::HueRamp),
        OutputMode::BlueDetections => with_detections(source, config, ColorPolicy::BlueRamp),
    }
}

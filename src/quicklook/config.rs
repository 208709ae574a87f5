//! Quicklook conversion configuration

use crate::quicklook::output::types::{OutputFormat, TiffCompression};
use crate::quicklook::overlay::types::OverlayParams;
use crate::quicklook::scale::{DEFAULT_HIGH_CLIP, DEFAULT_LOW_CLIP};

/// Configuration for ENVI to quicklook conversion
#[derive(Debug, Clone)]
pub struct QuicklookConfig {
    /// Fraction of positive samples stretched to black
    pub low_clip: f64,
    /// Fraction of positive samples below full white
    pub high_clip: f64,
    /// Image container to write
    pub format: OutputFormat,
    /// Compression for TIFF output
    pub compression: TiffCompression,
    /// Predictor for TIFF output (2 for horizontal differencing)
    pub predictor: Option<u16>,
    /// Whether to check raster dimensions before processing
    pub validate_dimensions: bool,
    /// Largest accepted line or sample count when validating
    pub max_dimension: Option<usize>,
    /// Threshold, smoothing and structuring element for detection overlays
    pub overlay: OverlayParams,
    /// Make the written image readable and writable by everyone (unix)
    pub share_permissions: bool,
}

impl Default for QuicklookConfig {
    fn default() -> Self {
        Self {
            low_clip: DEFAULT_LOW_CLIP,
            high_clip: DEFAULT_HIGH_CLIP,
            format: OutputFormat::Png,
            compression: TiffCompression::DeflateBalanced,
            predictor: None,
            validate_dimensions: true,
            max_dimension: Some(100_000),
            overlay: OverlayParams::default(),
            share_permissions: false,
        }
    }
}

impl QuicklookConfig {
    pub fn builder() -> QuicklookConfigBuilder {
        QuicklookConfigBuilder::default()
    }
}

/// Builder for QuicklookConfig
#[derive(Default)]
pub struct QuicklookConfigBuilder {
    low_clip: Option<f64>,
    high_clip: Option<f64>,
    format: Option<OutputFormat>,
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
    overlay: Option<OverlayParams>,
    share_permissions: Option<bool>,
}

impl QuicklookConfigBuilder {
    pub fn clip(mut self, low: f64, high: f64) -> Self {
        self.low_clip = Some(low);
        self.high_clip = Some(high);
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn overlay(mut self, overlay: OverlayParams) -> Self {
        self.overlay = Some(overlay);
        self
    }

    pub fn share_permissions(mut self, share: bool) -> Self {
        self.share_permissions = Some(share);
        self
    }

    pub fn build(self) -> QuicklookConfig {
        let default = QuicklookConfig::default();
        QuicklookConfig {
            low_clip: self.low_clip.unwrap_or(default.low_clip),
            high_clip: self.high_clip.unwrap_or(default.high_clip),
            format: self.format.unwrap_or(default.format),
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            overlay: self.overlay.unwrap_or(default.overlay),
            share_permissions: self.share_permissions.unwrap_or(default.share_permissions),
        }
    }
}

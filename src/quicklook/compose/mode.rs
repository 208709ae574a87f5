use std::fmt;
use std::str::FromStr;

use crate::quicklook::common::error::QuicklookError;
use crate::quicklook::output::types::OutputFormat;

/// The closed set of quicklook products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputMode {
    /// Bands 0, 1, 2 stretched into red, green, blue
    FullColor,
    /// Band 0 stretched into all channels
    Grayscale,
    /// Band 3 on its fixed range, masked by band 0
    AnalyteGray,
    /// Grayscale base with a hue-ramp detection overlay from band 3
    ColorDetections,
    /// Grayscale base with a blue-ramp detection overlay from band 3
    BlueDetections,
}

/// Band holding the visible base image (and the no-data reference).
pub const BASE_BAND: usize = 0;
/// Band holding the matched-filter analyte.
pub const ANALYTE_BAND: usize = 3;

impl OutputMode {
    pub const ALL: [OutputMode; 5] = [
        OutputMode::FullColor,
        OutputMode::Grayscale,
        OutputMode::AnalyteGray,
        OutputMode::ColorDetections,
        OutputMode::BlueDetections,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputMode::FullColor => "rgb_image",
            OutputMode::Grayscale => "gray_image",
            OutputMode::AnalyteGray => "cmf_layer",
            OutputMode::ColorDetections => "rgb_detections",
            OutputMode::BlueDetections => "blue_detections",
        }
    }

    /// Bands the raster must carry for this mode.
    pub fn required_bands(self) -> usize {
        match self {
            OutputMode::FullColor => 3,
            OutputMode::Grayscale => 1,
            OutputMode::AnalyteGray | OutputMode::ColorDetections | OutputMode::BlueDetections => {
                ANALYTE_BAND + 1
            }
        }
    }

    /// Output file name for a raster named `basename`.
    pub fn file_name(self, basename: &str, format: OutputFormat) -> String {
        let ext = format.extension();
        match self {
            OutputMode::FullColor => format!(
                "{}.{}",
                basename.replace("_cmf_", "_rdn_").replace("_ch4mf_", "_rdn_"),
                ext
            ),
            OutputMode::Grayscale => format!("{}_gray.{}", basename.replace("_cmf_", "_rdn_"), ext),
            OutputMode::AnalyteGray => format!("{}_gray.{}", basename, ext),
            OutputMode::ColorDetections => format!("{}_rgb.{}", basename.replace("_img", "_det"), ext),
            OutputMode::BlueDetections => format!("{}_blue.{}", basename.replace("_img", "_det"), ext),
        }
    }
}

impl FromStr for OutputMode {
    type Err = QuicklookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| QuicklookError::UnsupportedMode(s.to_string()))
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

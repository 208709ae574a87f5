use std::io::Write;

use tracing::debug;

use crate::quicklook::common::error::{QuicklookError, Result};
use crate::quicklook::common::image::RgbImage;
use crate::quicklook::config::QuicklookConfig;
use crate::quicklook::output::writer::ImageWriter;

/// Writes 8-bit RGB PNG files.
pub struct PngWriter;

impl ImageWriter for PngWriter {
    fn write_image(&self, image: &RgbImage, output: &mut dyn Write, _config: &QuicklookConfig) -> Result<()> {
        debug!("Encoding PNG image: {}x{}", image.samples(), image.lines());

        let mut encoder = png::Encoder::new(output, image.samples() as u32, image.lines() as u32);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| QuicklookError::EncodeError(e.to_string()))?;
        writer
            .write_image_data(image.data())
            .map_err(|e| QuicklookError::EncodeError(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| QuicklookError::EncodeError(e.to_string()))?;

        debug!("PNG encoding complete");
        Ok(())
    }
}

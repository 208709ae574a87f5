use std::io::Write;

use crate::quicklook::common::error::Result;
use crate::quicklook::common::image::RgbImage;
use crate::quicklook::config::QuicklookConfig;
use crate::quicklook::output::png_writer::PngWriter;
use crate::quicklook::output::tiff_writer::TiffWriter;
use crate::quicklook::output::types::OutputFormat;
use crate::quicklook::output::writer::ImageWriter;

/// Picks the PNG or TIFF encoder from `config.format`.
pub struct StandardImageWriter;

impl ImageWriter for StandardImageWriter {
    fn write_image(&self, image: &RgbImage, output: &mut dyn Write, config: &QuicklookConfig) -> Result<()> {
        match config.format {
            OutputFormat::Png => PngWriter.write_image(image, output, config),
            OutputFormat::Tiff => TiffWriter.write_image(image, output, config),
        }
    }
}

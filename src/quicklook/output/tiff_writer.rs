use std::io::Write;

use tracing::debug;

use crate::quicklook::common::error::{QuicklookError, Result};
use crate::quicklook::common::image::RgbImage;
use crate::quicklook::config::QuicklookConfig;
use crate::quicklook::output::types::TiffCompression;
use crate::quicklook::output::writer::ImageWriter;

/// Writes 8-bit RGB TIFF files with the configured compression.
pub struct TiffWriter;

impl ImageWriter for TiffWriter {
    fn write_image(&self, image: &RgbImage, output: &mut dyn Write, config: &QuicklookConfig) -> Result<()> {
        debug!("Encoding TIFF image: {}x{}", image.samples(), image.lines());

        // The encoder needs to seek, so encode into memory first.
        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
            TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Best),
        };

        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| QuicklookError::EncodeError(e.to_string()))?
            .with_compression(compression);

        if let Some(predictor_val) = config.predictor {
            let predictor = match predictor_val {
                2 => tiff::tags::Predictor::Horizontal,
                _ => tiff::tags::Predictor::None,
            };
            encoder = encoder.with_predictor(predictor);
        }

        encoder
            .write_image::<tiff::encoder::colortype::RGB8>(
                image.samples() as u32,
                image.lines() as u32,
                image.data(),
            )
            .map_err(|e| QuicklookError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}

use std::io::Write;

use crate::quicklook::common::error::Result;
use crate::quicklook::common::image::RgbImage;
use crate::quicklook::config::QuicklookConfig;

pub trait ImageWriter {
    fn write_image(&self, image: &RgbImage, output: &mut dyn Write, config: &QuicklookConfig) -> Result<()>;
}

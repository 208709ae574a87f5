//! 8-bit RGB output image

use crate::quicklook::common::error::{QuicklookError, Result};
use crate::quicklook::common::plane::Plane;

pub const RED: usize = 0;
pub const GREEN: usize = 1;
pub const BLUE: usize = 2;
pub const CHANNELS: usize = 3;

/// Interleaved `[R, G, B, R, G, B, ...]` image, `lines x samples` pixels.
///
/// Every channel starts at 0, which the finishing step keys to transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    lines: usize,
    samples: usize,
    data: Vec<u8>,
}

impl RgbImage {
    pub fn new(lines: usize, samples: usize) -> Self {
        Self {
            lines,
            samples,
            data: vec![0; lines * samples * CHANNELS],
        }
    }

    /// Copies one display plane into all three channels.
    pub fn from_gray(plane: &Plane) -> Self {
        let mut image = Self::new(plane.lines(), plane.samples());
        for (pixel, value) in image.data.chunks_exact_mut(CHANNELS).zip(plane.to_u8()) {
            pixel.fill(value);
        }
        image
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// `(lines, samples, 3)`
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.lines, self.samples, CHANNELS)
    }

    /// Narrows `plane` into one channel.
    pub fn set_channel(&mut self, channel: usize, plane: &Plane) -> Result<()> {
        if plane.shape() != (self.lines, self.samples) {
            return Err(QuicklookError::ShapeMismatch {
                expected: (self.lines, self.samples),
                actual: plane.shape(),
            });
        }
        for (pixel, value) in self.data.chunks_exact_mut(CHANNELS).zip(plane.to_u8()) {
            pixel[channel] = value;
        }
        Ok(())
    }

    pub fn pixel(&self, row: usize, col: usize) -> [u8; CHANNELS] {
        let i = (row * self.samples + col) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    pub fn put_pixel(&mut self, row: usize, col: usize, rgb: [u8; CHANNELS]) {
        let i = (row * self.samples + col) * CHANNELS;
        self.data[i..i + CHANNELS].copy_from_slice(&rgb);
    }

    pub fn channel(&self, channel: usize) -> Vec<u8> {
        self.data.iter().skip(channel).step_by(CHANNELS).copied().collect()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let image = RgbImage::new(2, 3);
        assert_eq!(image.shape(), (2, 3, 3));
        assert!(image.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_set_channel_and_pixel() {
        let mut image = RgbImage::new(1, 2);
        let plane = Plane::new(1, 2, vec![10.7, 200.0]).unwrap();
        image.set_channel(GREEN, &plane).unwrap();
        assert_eq!(image.pixel(0, 0), [0, 10, 0]);
        assert_eq!(image.pixel(0, 1), [0, 200, 0]);
        assert_eq!(image.channel(GREEN), vec![10, 200]);
    }

    #[test]
    fn test_set_channel_rejects_other_shape() {
        let mut image = RgbImage::new(2, 2);
        let result = image.set_channel(RED, &Plane::filled(1, 4, 1.0));
        assert!(matches!(result, Err(QuicklookError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_from_gray_replicates() {
        let image = RgbImage::from_gray(&Plane::new(1, 2, vec![0.0, 128.0]).unwrap());
        assert_eq!(image.data(), &[0, 0, 0, 128, 128, 128]);
    }
}

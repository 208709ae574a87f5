use tracing::debug;

use crate::quicklook::common::error::{QuicklookError, Result};
use crate::quicklook::common::image::RgbImage;
use crate::quicklook::common::plane::Plane;
use crate::quicklook::overlay::color::ColorPolicy;
use crate::quicklook::overlay::gaussian::gaussian_blur;
use crate::quicklook::overlay::morphology::opening;
use crate::quicklook::overlay::types::{Mask, OverlayParams};

/// Pixels detected above one threshold and the color they are painted with.
#[derive(Debug, Clone)]
pub struct OverlayLayer {
    pub threshold: f64,
    pub color: [u8; 3],
    pub mask: Mask,
}

/// Detection layers in ascending threshold order.
#[derive(Debug, Clone)]
pub struct Overlay {
    lines: usize,
    samples: usize,
    layers: Vec<OverlayLayer>,
}

impl Overlay {
    pub fn layers(&self) -> &[OverlayLayer] {
        &self.layers
    }

    /// Paints every layer onto `image`, lowest threshold first.
    ///
    /// Nested detections therefore end up with the color of the highest
    /// threshold they exceed.
    pub fn composite(&self, mut image: RgbImage) -> Result<RgbImage> {
        if (image.lines(), image.samples()) != (self.lines, self.samples) {
            return Err(QuicklookError::ShapeMismatch {
                expected: (self.lines, self.samples),
                actual: (image.lines(), image.samples()),
            });
        }
        for layer in &self.layers {
            for row in 0..self.lines {
                for col in 0..self.samples {
                    if layer.mask.get(row, col) {
                        image.put_pixel(row, col, layer.color);
                    }
                }
            }
        }
        Ok(image)
    }
}

/// Smooths the analyte plane once, then thresholds, opens and colors it per threshold.
pub fn build_overlay(analyte: &Plane, params: &OverlayParams, policy: ColorPolicy) -> Overlay {
    let smoothed = gaussian_blur(analyte, params.sigma, params.truncate);
    let count = params.thresholds.len();

    let layers = params
        .thresholds
        .values()
        .iter()
        .enumerate()
        .map(|(index, &threshold)| {
            let mask = opening(&Mask::above(&smoothed, threshold), params.element);
            let color = policy.color(index, count);
            debug!(threshold, hits = mask.count(), ?color, "Detection layer");
            OverlayLayer {
                threshold,
                color,
                mask,
            }
        })
        .collect();

    Overlay {
        lines: analyte.lines(),
        samples: analyte.samples(),
        layers,
    }
}

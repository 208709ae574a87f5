//! Single-band numeric planes shared by the scaler and the overlay engine.

use crate::quicklook::common::error::{QuicklookError, Result};

/// Sample value that marks a cell without a valid measurement.
pub const NODATA: f64 = -9999.0;

/// A `lines x samples` buffer of one band, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    lines: usize,
    samples: usize,
    data: Vec<f64>,
}

impl Plane {
    pub fn new(lines: usize, samples: usize, data: Vec<f64>) -> Result<Self> {
        if lines == 0 || samples == 0 {
            return Err(QuicklookError::InvalidDimensions(lines, samples));
        }
        if data.len() != lines * samples {
            return Err(QuicklookError::BufferLength {
                expected: lines * samples,
                actual: data.len(),
            });
        }
        Ok(Self { lines, samples, data })
    }

    pub fn filled(lines: usize, samples: usize, value: f64) -> Self {
        Self {
            lines,
            samples,
            data: vec![value; lines * samples],
        }
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.lines, self.samples)
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.samples + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.samples + col] = value;
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Cells exactly equal to [`NODATA`].
    pub fn nodata_mask(&self) -> Vec<bool> {
        self.data.iter().map(|&v| v == NODATA).collect()
    }

    /// Applies `f` to every cell, consuming and returning the plane.
    pub fn map(mut self, f: impl Fn(f64) -> f64) -> Self {
        for v in &mut self.data {
            *v = f(*v);
        }
        self
    }

    /// Forces cells flagged in `mask` to zero.
    pub fn apply_mask(mut self, mask: &[bool]) -> Self {
        for (v, &masked) in self.data.iter_mut().zip(mask) {
            if masked {
                *v = 0.0;
            }
        }
        self
    }

    /// Narrows to bytes; values are truncated toward zero and saturate at the `u8` bounds.
    pub fn to_u8(&self) -> Vec<u8> {
        self.data.iter().map(|&v| v as u8).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_wrong_length() {
        let result = Plane::new(2, 3, vec![0.0; 5]);
        assert!(matches!(result, Err(QuicklookError::BufferLength { expected: 6, actual: 5 })));
    }

    #[test]
    fn test_new_rejects_empty_shape() {
        let result = Plane::new(0, 3, Vec::new());
        assert!(matches!(result, Err(QuicklookError::InvalidDimensions(0, 3))));
    }

    #[test]
    fn test_to_u8_truncates() {
        let plane = Plane::new(1, 4, vec![0.0, 1.9, 254.99, 255.0]).unwrap();
        assert_eq!(plane.to_u8(), vec![0, 1, 254, 255]);
    }

    #[test]
    fn test_apply_mask_zeroes_flagged_cells() {
        let plane = Plane::filled(1, 3, 7.0).apply_mask(&[false, true, false]);
        assert_eq!(plane.data(), &[7.0, 0.0, 7.0]);
    }
}

//! Detection overlay parameters and boolean masks

use crate::quicklook::common::error::{QuicklookError, Result};
use crate::quicklook::common::plane::Plane;

/// Smoothing applied to the analyte plane before thresholding.
pub const DEFAULT_SIGMA: f64 = 2.0;
/// Kernel half-width in multiples of sigma.
pub const DEFAULT_TRUNCATE: f64 = 4.0;

pub const DEFAULT_THRESHOLD_START: f64 = 500.0;
pub const DEFAULT_THRESHOLD_STOP: f64 = 2000.0;
pub const DEFAULT_THRESHOLD_STEP: f64 = 50.0;

/// Row-major boolean grid, `lines x samples`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    lines: usize,
    samples: usize,
    data: Vec<bool>,
}

impl Mask {
    pub fn new(lines: usize, samples: usize) -> Self {
        Self {
            lines,
            samples,
            data: vec![false; lines * samples],
        }
    }

    /// Cells of `plane` strictly greater than `threshold`.
    pub fn above(plane: &Plane, threshold: f64) -> Self {
        Self {
            lines: plane.lines(),
            samples: plane.samples(),
            data: plane.data().iter().map(|&v| v > threshold).collect(),
        }
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.data[row * self.samples + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        self.data[row * self.samples + col] = value;
    }

    /// Value at a signed position; anything outside the grid is `false`.
    pub fn get_or_false(&self, row: isize, col: isize) -> bool {
        if row < 0 || col < 0 || row as usize >= self.lines || col as usize >= self.samples {
            return false;
        }
        self.get(row as usize, col as usize)
    }

    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&hit| hit).count()
    }

    pub fn data(&self) -> &[bool] {
        &self.data
    }
}

/// Neighbourhood used by binary erosion and dilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StructuringElement {
    /// 3x3 cross, 4-connectivity
    #[default]
    Cross,
    /// 3x3 square, 8-connectivity
    Square,
}

impl StructuringElement {
    /// Offsets `(drow, dcol)` covered by the element, centre included.
    pub fn offsets(self) -> &'static [(isize, isize)] {
        match self {
            StructuringElement::Cross => &[(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)],
            StructuringElement::Square => &[
                (-1, -1),
                (-1, 0),
                (-1, 1),
                (0, -1),
                (0, 0),
                (0, 1),
                (1, -1),
                (1, 0),
                (1, 1),
            ],
        }
    }
}

/// Strictly ascending detection thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdSequence {
    values: Vec<f64>,
}

impl ThresholdSequence {
    /// `start, start + step, ...` up to and including `stop`.
    pub fn evenly_spaced(start: f64, stop: f64, step: f64) -> Result<Self> {
        if !(step > 0.0) || !(start <= stop) {
            return Err(QuicklookError::InvalidParameter(format!(
                "threshold range {}..={} step {}",
                start, stop, step
            )));
        }
        let count = ((stop - start) / step + 1e-9).floor() as usize + 1;
        let values = (0..count).map(|i| start + i as f64 * step).collect();
        Ok(Self { values })
    }

    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() || values.windows(2).any(|w| !(w[0] < w[1])) {
            return Err(QuicklookError::InvalidParameter(
                "thresholds must be non-empty and strictly ascending".to_string(),
            ));
        }
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl Default for ThresholdSequence {
    fn default() -> Self {
        let count = ((DEFAULT_THRESHOLD_STOP - DEFAULT_THRESHOLD_START) / DEFAULT_THRESHOLD_STEP)
            as usize
            + 1;
        Self {
            values: (0..count)
                .map(|i| DEFAULT_THRESHOLD_START + i as f64 * DEFAULT_THRESHOLD_STEP)
                .collect(),
        }
    }
}

/// Fixed constants of the detection overlay, passed in explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayParams {
    pub thresholds: ThresholdSequence,
    pub sigma: f64,
    pub truncate: f64,
    pub element: StructuringElement,
}

impl Default for OverlayParams {
    fn default() -> Self {
        Self {
            thresholds: ThresholdSequence::default(),
            sigma: DEFAULT_SIGMA,
            truncate: DEFAULT_TRUNCATE,
            element: StructuringElement::default(),
        }
    }
}

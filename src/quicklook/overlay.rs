//! Detection overlay module
//!
//! Thresholds a smoothed analyte plane at an ascending series of levels,
//! cleans each hit mask with a morphological opening and paints the result
//! onto a base image.

pub mod color;
mod engine;
pub mod gaussian;
pub mod morphology;
pub mod types;

pub use color::ColorPolicy;
pub use engine::{Overlay, OverlayLayer, build_overlay};
pub use types::{Mask, OverlayParams, StructuringElement, ThresholdSequence};

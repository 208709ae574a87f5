//! Finishing step module
//!
//! Optional post-processing of written quicklooks by an external tool.

mod error;
mod finisher;
mod imagemagick;

pub use error::FinishError;
pub use finisher::{Finisher, NoopFinisher};
pub use imagemagick::{ConvertStep, DEFAULT_MAX_EDGE, ImageMagickFinisher, resized_path};

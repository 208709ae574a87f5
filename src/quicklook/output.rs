//! Image writing module
//!
//! Encodes composed quicklooks as PNG or TIFF.

mod png_writer;
mod standard_writer;
mod tiff_writer;
pub mod types;
mod writer;

pub use png_writer::PngWriter;
pub use standard_writer::StandardImageWriter;
pub use tiff_writer::TiffWriter;
pub use types::{OutputFormat, TiffCompression};
pub use writer::ImageWriter;

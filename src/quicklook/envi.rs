//! ENVI raster reading module
//!
//! Header parsing, sample decoding and memory-mapped band access.

pub mod header;
mod raster;
mod reader;
pub mod types;

pub use header::{HEADER_SUFFIX, header_path, read_header};
pub use raster::{BandSource, MemoryRaster, Raster};
pub use reader::{EnviReader, RasterReader};
pub use types::{ByteOrder, Interleave, RasterHeader, SampleType};

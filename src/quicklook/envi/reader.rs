use std::path::Path;

use crate::quicklook::common::error::Result;
use crate::quicklook::envi::header::{header_path, read_header};
use crate::quicklook::envi::raster::{BandSource, Raster};

/// Opens a raster and its metadata from a path.
pub trait RasterReader {
    type Source: BandSource;

    fn open(&self, path: &Path) -> Result<Self::Source>;
}

/// Reads `<path>.hdr`, then maps `<path>`.
pub struct EnviReader;

impl RasterReader for EnviReader {
    type Source = Raster;

    fn open(&self, path: &Path) -> Result<Raster> {
        let header = read_header(header_path(path))?;
        Raster::open(path, header)
    }
}

//! Memory-mapped, read-only access to ENVI raw rasters.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use tracing::debug;

use crate::quicklook::common::error::{QuicklookError, Result};
use crate::quicklook::common::plane::Plane;
use crate::quicklook::envi::types::RasterHeader;

/// Random access to the bands of a raster.
pub trait BandSource {
    fn header(&self) -> &RasterHeader;

    fn read(&self, row: usize, col: usize, band: usize) -> Result<f64>;

    /// Copies one band out as a plane.
    fn read_plane(&self, band: usize) -> Result<Plane>;
}

fn check_index(header: &RasterHeader, row: usize, col: usize, band: usize) -> Result<()> {
    if row >= header.lines || col >= header.samples || band >= header.bands {
        return Err(QuicklookError::IndexOutOfBounds { row, col, band });
    }
    Ok(())
}

/// A raw raster file mapped into memory. The mapping is released on drop.
pub struct Raster {
    header: RasterHeader,
    map: Mmap,
}

impl Raster {
    /// Maps `path` after checking it holds every sample `header` declares.
    pub fn open<P: AsRef<Path>>(path: P, header: RasterHeader) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            QuicklookError::InputReadError(format!("{}: {}", path.display(), e))
        })?;

        let actual = file.metadata()?.len();
        let expected = header.file_len()?;
        if actual < expected {
            return Err(QuicklookError::TruncatedRaster { expected, actual });
        }

        // SAFETY: the mapping is read-only and the file is not modified while a
        // quicklook is being produced.
        let map = unsafe { Mmap::map(&file) }.map_err(|e| {
            QuicklookError::InputReadError(format!("{}: {}", path.display(), e))
        })?;

        debug!(
            path = %path.display(),
            bytes = actual,
            "Mapped raster"
        );
        Ok(Self { header, map })
    }

    fn sample_at(&self, index: usize) -> f64 {
        let size = self.header.sample_type.size_bytes();
        let start = self.header.header_offset as usize + index * size;
        self.header
            .sample_type
            .decode(&self.map[start..start + size], self.header.byte_order)
    }
}

impl BandSource for Raster {
    fn header(&self) -> &RasterHeader {
        &self.header
    }

    fn read(&self, row: usize, col: usize, band: usize) -> Result<f64> {
        check_index(&self.header, row, col, band)?;
        Ok(self.sample_at(self.header.sample_index(row, col, band)))
    }

    fn read_plane(&self, band: usize) -> Result<Plane> {
        let header = &self.header;
        check_index(header, 0, 0, band)?;

        let mut data = Vec::with_capacity(header.lines * header.samples);
        for row in 0..header.lines {
            for col in 0..header.samples {
                data.push(self.sample_at(header.sample_index(row, col, band)));
            }
        }
        Plane::new(header.lines, header.samples, data)
    }
}

/// Bands already decoded into memory, one plane per band.
#[derive(Debug, Clone)]
pub struct MemoryRaster {
    header: RasterHeader,
    bands: Vec<Plane>,
}

impl MemoryRaster {
    pub fn new(header: RasterHeader, bands: Vec<Plane>) -> Result<Self> {
        if bands.len() != header.bands {
            return Err(QuicklookError::Format(format!(
                "header declares {} bands, {} supplied",
                header.bands,
                bands.len()
            )));
        }
        for plane in &bands {
            if plane.shape() != (header.lines, header.samples) {
                return Err(QuicklookError::ShapeMismatch {
                    expected: (header.lines, header.samples),
                    actual: plane.shape(),
                });
            }
        }
        Ok(Self { header, bands })
    }
}

impl BandSource for MemoryRaster {
    fn header(&self) -> &RasterHeader {
        &self.header
    }

    fn read(&self, row: usize, col: usize, band: usize) -> Result<f64> {
        check_index(&self.header, row, col, band)?;
        Ok(self.bands[band].get(row, col))
    }

    fn read_plane(&self, band: usize) -> Result<Plane> {
        check_index(&self.header, 0, 0, band)?;
        Ok(self.bands[band].clone())
    }
}

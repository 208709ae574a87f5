//! ENVI raster metadata types

use crate::quicklook::common::error::{QuicklookError, Result};

/// Numeric encoding of raster samples, keyed by the ENVI `data type` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleType {
    Int16,
    UInt16,
    UInt32,
    Float32,
    Float64,
}

impl SampleType {
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            2 => Ok(SampleType::Int16),
            12 => Ok(SampleType::UInt16),
            3 => Ok(SampleType::UInt32),
            4 => Ok(SampleType::Float32),
            5 => Ok(SampleType::Float64),
            other => Err(QuicklookError::Format(format!(
                "unsupported data type code {}",
                other
            ))),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            SampleType::Int16 => 2,
            SampleType::UInt16 => 12,
            SampleType::UInt32 => 3,
            SampleType::Float32 => 4,
            SampleType::Float64 => 5,
        }
    }

    pub fn size_bytes(self) -> usize {
        match self {
            SampleType::Int16 | SampleType::UInt16 => 2,
            SampleType::UInt32 | SampleType::Float32 => 4,
            SampleType::Float64 => 8,
        }
    }

    /// Decodes one sample from exactly `size_bytes()` bytes.
    pub fn decode(self, bytes: &[u8], order: ByteOrder) -> f64 {
        macro_rules! read {
            ($ty:ty, $n:expr) => {{
                let mut raw = [0u8; $n];
                raw.copy_from_slice(&bytes[..$n]);
                match order {
                    ByteOrder::LittleEndian => <$ty>::from_le_bytes(raw) as f64,
                    ByteOrder::BigEndian => <$ty>::from_be_bytes(raw) as f64,
                }
            }};
        }
        match self {
            SampleType::Int16 => read!(i16, 2),
            SampleType::UInt16 => read!(u16, 2),
            SampleType::UInt32 => read!(u32, 4),
            SampleType::Float32 => read!(f32, 4),
            SampleType::Float64 => read!(f64, 8),
        }
    }
}

/// Band layout of the raw file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interleave {
    /// Band interleaved by pixel: (line, sample, band)
    #[default]
    Bip,
    /// Band interleaved by line: (line, band, sample)
    Bil,
    /// Band sequential: (band, line, sample)
    Bsq,
}

impl Interleave {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bip" => Ok(Interleave::Bip),
            "bil" => Ok(Interleave::Bil),
            "bsq" => Ok(Interleave::Bsq),
            other => Err(QuicklookError::Format(format!(
                "unknown interleave '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    #[default]
    LittleEndian,
    BigEndian,
}

impl ByteOrder {
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(ByteOrder::LittleEndian),
            1 => Ok(ByteOrder::BigEndian),
            other => Err(QuicklookError::Format(format!(
                "unknown byte order {}",
                other
            ))),
        }
    }
}

/// Dimensions and encoding parsed from an ENVI `.hdr` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterHeader {
    pub lines: usize,
    pub samples: usize,
    pub bands: usize,
    pub sample_type: SampleType,
    pub interleave: Interleave,
    pub byte_order: ByteOrder,
    /// Bytes to skip at the start of the raw file
    pub header_offset: u64,
}

impl RasterHeader {
    /// Header for a little-endian BIP raster with no leading offset.
    pub fn new(lines: usize, samples: usize, bands: usize, sample_type: SampleType) -> Self {
        Self {
            lines,
            samples,
            bands,
            sample_type,
            interleave: Interleave::Bip,
            byte_order: ByteOrder::LittleEndian,
            header_offset: 0,
        }
    }

    /// Number of bytes of sample data the raw file must hold after the offset.
    ///
    /// Fails with `Format` when the declared shape does not fit in a `u64`.
    pub fn data_len(&self) -> Result<u64> {
        [self.samples, self.bands, self.sample_type.size_bytes()]
            .into_iter()
            .try_fold(self.lines as u64, |acc, n| acc.checked_mul(n as u64))
            .ok_or_else(|| {
                QuicklookError::Format(format!(
                    "{} lines x {} samples x {} bands overflows the addressable size",
                    self.lines, self.samples, self.bands
                ))
            })
    }

    /// Offset plus data length: the smallest valid raw file size.
    pub fn file_len(&self) -> Result<u64> {
        self.header_offset
            .checked_add(self.data_len()?)
            .ok_or_else(|| {
                QuicklookError::Format(format!(
                    "header offset {} overflows the addressable size",
                    self.header_offset
                ))
            })
    }

    /// Position of a sample, counted in samples from the start of the data.
    pub fn sample_index(&self, row: usize, col: usize, band: usize) -> usize {
        match self.interleave {
            Interleave::Bip => (row * self.samples + col) * self.bands + band,
            Interleave::Bil => (row * self.bands + band) * self.samples + col,
            Interleave::Bsq => (band * self.lines + row) * self.samples + col,
        }
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::quicklook::{
    common::error::{QuicklookError, Result},
    common::image::RgbImage,
    common::timing::PipelineTimings,
    compose::{OutputMode, compose},
    config::QuicklookConfig,
    envi::{BandSource, EnviReader, RasterReader},
    finish::{FinishError, Finisher, NoopFinisher},
    output::{ImageWriter, StandardImageWriter},
};

/// What a successful conversion left on disk.
#[derive(Debug)]
pub struct QuicklookOutput {
    pub image_path: PathBuf,
    /// Files made by the finishing step, or why it failed. Never fatal.
    pub finished: std::result::Result<Vec<PathBuf>, FinishError>,
}

pub struct QuicklookPipeline<R: RasterReader, W: ImageWriter, F: Finisher> {
    reader: R,
    writer: W,
    finisher: F,
    config: QuicklookConfig,
}

impl QuicklookPipeline<EnviReader, StandardImageWriter, NoopFinisher> {
    pub fn new(config: QuicklookConfig) -> Self {
        Self {
            reader: EnviReader,
            writer: StandardImageWriter,
            finisher: NoopFinisher,
            config,
        }
    }
}

impl<R: RasterReader, W: ImageWriter, F: Finisher> QuicklookPipeline<R, W, F> {
    pub fn with_custom(reader: R, writer: W, finisher: F, config: QuicklookConfig) -> Self {
        Self {
            reader,
            writer,
            finisher,
            config,
        }
    }

    fn validate_dimensions(&self, lines: usize, samples: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if lines == 0 || samples == 0 {
            return Err(QuicklookError::InvalidDimensions(lines, samples));
        }

        if let Some(max) = self.config.max_dimension {
            if lines > max || samples > max {
                warn!(lines, samples, max, "Raster exceeds maximum dimension");
                return Err(QuicklookError::InvalidDimensions(lines, samples));
            }
        }

        Ok(())
    }

    /// Builds the quicklook image for `mode` from an opened raster.
    #[instrument(skip(self, source), fields(lines = source.header().lines, samples = source.header().samples))]
    pub fn convert<S: BandSource>(&self, source: &S, mode: OutputMode) -> Result<RgbImage> {
        let header = source.header();
        self.validate_dimensions(header.lines, header.samples)?;
        compose(source, mode, &self.config)
    }

    /// Encodes `image` in memory with the configured writer.
    pub fn encode(&self, image: &RgbImage) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.writer.write_image(image, &mut buffer, &self.config)?;
        Ok(buffer)
    }

    /// `<output_dir>/<name for mode>` for the raster at `input_path`.
    pub fn output_path(&self, input_path: &Path, output_dir: &Path, mode: OutputMode) -> Result<PathBuf> {
        let basename = input_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                QuicklookError::InputReadError(format!("{}: no usable file name", input_path.display()))
            })?;
        Ok(output_dir.join(mode.file_name(basename, self.config.format)))
    }

    #[instrument(skip(self, input_path, output_dir))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_dir: Q,
        mode: OutputMode,
    ) -> Result<QuicklookOutput> {
        self.convert_file_with_timings(input_path, output_dir, mode)
            .map(|(output, _)| output)
    }

    pub fn convert_file_with_timings<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_dir: Q,
        mode: OutputMode,
    ) -> Result<(QuicklookOutput, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        let input_path = input_path.as_ref();
        let output_path = self.output_path(input_path, output_dir.as_ref(), mode)?;

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            %mode,
            "Converting raster"
        );

        let image = {
            let source = timings.time("open_raster", || {
                let _span = tracing::info_span!("open_raster").entered();
                self.reader.open(input_path)
            })?;
            timings.time("compose", || {
                let _span = tracing::info_span!("compose", %mode).entered();
                self.convert(&source, mode)
            })?
        };

        let encoded = timings.time("encode", || {
            let _span = tracing::info_span!("encode", format = ?self.config.format).entered();
            self.encode(&image)
        })?;

        timings.time("write_output", || {
            let _span = tracing::info_span!("write_output").entered();
            write_output(&output_path, &encoded)
        })?;

        if self.config.share_permissions {
            if let Err(e) = share_permissions(&output_path) {
                warn!(path = %output_path.display(), error = %e, "Could not widen permissions");
            }
        }

        let finished = timings.time("finish", || {
            let _span = tracing::info_span!("finish").entered();
            self.finisher.finish(&output_path)
        });
        if let Err(e) = &finished {
            warn!(path = %output_path.display(), error = %e, "Finishing step failed");
        }

        info!(
            lines = image.lines(),
            samples = image.samples(),
            "Conversion complete"
        );
        Ok((
            QuicklookOutput {
                image_path: output_path,
                finished,
            },
            timings,
        ))
    }

    /// Converts each raster in turn; one failure does not stop the others.
    pub fn convert_batch<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        inputs: &[P],
        output_dir: Q,
        mode: OutputMode,
    ) -> Vec<(PathBuf, Result<(QuicklookOutput, PipelineTimings)>)> {
        inputs
            .iter()
            .map(|input| {
                let input = input.as_ref();
                let result = self.convert_file_with_timings(input, output_dir.as_ref(), mode);
                if let Err(e) = &result {
                    warn!(input = %input.display(), error = %e, "Conversion failed");
                }
                (input.to_path_buf(), result)
            })
            .collect()
    }

    pub fn config(&self) -> &QuicklookConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: QuicklookConfig) {
        self.config = config;
    }
}

/// Writes `bytes` to `path`, removing whatever was written if that fails.
fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|e| {
        let _ = fs::remove_file(path);
        QuicklookError::OutputWriteError(format!("{}: {}", path.display(), e))
    })
}

#[cfg(unix)]
fn share_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o666);
    fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn share_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

use std::path::{Path, PathBuf};

use crate::quicklook::finish::error::FinishError;

/// Post-processing applied to a quicklook that has already been written.
///
/// Returns the files it produced besides the input.
pub trait Finisher {
    fn finish(&self, image_path: &Path) -> Result<Vec<PathBuf>, FinishError>;
}

impl<F: Finisher + ?Sized> Finisher for Box<F> {
    fn finish(&self, image_path: &Path) -> Result<Vec<PathBuf>, FinishError> {
        (**self).finish(image_path)
    }
}

/// Leaves the written image alone.
pub struct NoopFinisher;

impl Finisher for NoopFinisher {
    fn finish(&self, _image_path: &Path) -> Result<Vec<PathBuf>, FinishError> {
        Ok(Vec::new())
    }
}

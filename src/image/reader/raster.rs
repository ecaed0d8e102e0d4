use std::path::{Path, PathBuf};

use ::image::ImageError;

use super::super::{Image, ImageReader};
use crate::error::Error;

/// Decodes any raster format supported by the `image` crate into RGB8.
pub struct RasterImageReader {
    path: PathBuf,
}

impl RasterImageReader {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    fn convert_error(&self, error: ImageError) -> Error {
        let path = self.path.display().to_string();
        match error {
            ImageError::IoError(io_error) => Error::UnableToOpenInputFileForReading(path, io_error),
            other => Error::UnableToDecodeImage(path, other),
        }
    }
}

impl ImageReader for RasterImageReader {
    fn read_image(&mut self) -> crate::Result<Image> {
        let decoded = ::image::open(&self.path).map_err(|e| self.convert_error(e))?;
        Ok(Image::from(decoded.to_rgb8()))
    }
}

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::{Image, ImageReader};
use crate::error::Error;
use crate::Result;

pub mod ppm;
pub mod raster;

pub use ppm::PPMImageReader;
pub use raster::RasterImageReader;

const PPM_EXTENSION: &str = "ppm";

fn has_ppm_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case(PPM_EXTENSION))
}

/// Decodes the file at `path`, choosing the reader from its extension.
pub fn open_image(path: &Path) -> Result<Image> {
    if has_ppm_extension(path) {
        let file = File::open(path).map_err(|e| {
            Error::UnableToOpenInputFileForReading(path.display().to_string(), e)
        })?;
        PPMImageReader::new(BufReader::new(file)).read_image()
    } else {
        RasterImageReader::new(path).read_image()
    }
}

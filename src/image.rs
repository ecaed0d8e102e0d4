use ::image::RgbImage;

use crate::color::RGBColorFormat;
use crate::error::Error;
use crate::Result;

pub mod reader;
pub mod sampler;

/// Read access to a grid of RGB pixels.
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Fails with [`Error::PixelOutOfBounds`] for coordinates outside the image.
    fn pixel(&self, x: u32, y: u32) -> Result<RGBColorFormat<u8>>;
}

pub trait ImageReader {
    fn read_image(&mut self) -> Result<Image>;
}

/// A decoded image owned by the caller, stored row-major.
#[derive(Clone, Debug)]
pub struct Image {
    width: u32,
    height: u32,
    dots: Vec<RGBColorFormat<u8>>,
}

impl Image {
    pub fn new(width: u32, height: u32, dots: Vec<RGBColorFormat<u8>>) -> Result<Self> {
        if width as usize * height as usize != dots.len() {
            return Err(Error::MismatchOfSizeBetweenHeaderAndValues);
        }
        Ok(Self {
            width,
            height,
            dots,
        })
    }

    pub fn filled(width: u32, height: u32, color: RGBColorFormat<u8>) -> Self {
        Self {
            width,
            height,
            dots: vec![color; width as usize * height as usize],
        }
    }

    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> RGBColorFormat<u8>,
    {
        let mut dots = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                dots.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            dots,
        }
    }
}

fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Error {
    Error::PixelOutOfBounds {
        x,
        y,
        width,
        height,
    }
}

impl PixelSource for Image {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> Result<RGBColorFormat<u8>> {
        if x >= self.width || y >= self.height {
            return Err(out_of_bounds(x, y, self.width, self.height));
        }
        let index = x as usize + y as usize * self.width as usize;
        self.dots
            .get(index)
            .copied()
            .ok_or_else(|| out_of_bounds(x, y, self.width, self.height))
    }
}

impl PixelSource for RgbImage {
    fn width(&self) -> u32 {
        RgbImage::width(self)
    }

    fn height(&self) -> u32 {
        RgbImage::height(self)
    }

    fn pixel(&self, x: u32, y: u32) -> Result<RGBColorFormat<u8>> {
        let [red, green, blue] = self
            .get_pixel_checked(x, y)
            .ok_or_else(|| out_of_bounds(x, y, RgbImage::width(self), RgbImage::height(self)))?
            .0;
        Ok(RGBColorFormat { red, green, blue })
    }
}

impl From<RgbImage> for Image {
    fn from(value: RgbImage) -> Self {
        let (width, height) = value.dimensions();
        let dots = value
            .pixels()
            .map(|pixel| {
                let [red, green, blue] = pixel.0;
                RGBColorFormat { red, green, blue }
            })
            .collect();
        Self {
            width,
            height,
            dots,
        }
    }
}

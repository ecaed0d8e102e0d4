use super::PixelSource;
use crate::color::HexColorEncoder;
use crate::error::Error;
use crate::mosaic::SampleGrid;
use crate::Result;

/// Picks one pixel from the center of every `block_size` x `block_size` block.
///
/// Sample positions start at `block_size / 2` on both axes and advance by
/// `block_size` while they stay inside the image, in row-major order. A
/// trailing partial block is only sampled when its center offset still lies
/// inside the image, so the visited column count can fall short of
/// [`SampleGrid::grid_width`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sampler {
    block_size: u32,
}

impl Sampler {
    pub fn new(block_size: i64) -> Result<Self> {
        if block_size <= 0 {
            return Err(Error::NonPositiveBlockSize(block_size));
        }
        let block_size =
            u32::try_from(block_size).map_err(|_| Error::NonPositiveBlockSize(block_size))?;
        Ok(Self { block_size })
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    fn offset(&self) -> u32 {
        self.block_size / 2
    }

    /// Coordinates visited along an axis of the given length.
    fn positions(&self, length: u32) -> impl Iterator<Item = u32> {
        (self.offset()..length).step_by(self.block_size as usize)
    }

    /// Number of positions along an axis, without walking them.
    fn position_count(&self, length: u32) -> u32 {
        match length.checked_sub(self.offset()) {
            Some(remaining) if remaining > 0 => (remaining - 1) / self.block_size + 1,
            _ => 0,
        }
    }

    fn grid_width(&self, width: u32) -> u32 {
        width.div_ceil(self.block_size)
    }

    pub fn sample<P: PixelSource + ?Sized>(&self, image: &P) -> Result<SampleGrid> {
        let width = image.width();
        let height = image.height();
        let visited_columns = self.position_count(width);
        let visited_rows = self.position_count(height);
        // dimensions are untrusted until the pixels have been read
        let mut colors = Vec::new();
        for y in self.positions(height) {
            for x in self.positions(width) {
                let color = image.pixel(x, y)?;
                colors.push(HexColorEncoder::encode_rgb(&color));
            }
        }
        Ok(SampleGrid::new(
            colors,
            self.grid_width(width),
            visited_columns,
            visited_rows,
        ))
    }
}

/// Samples `image` with a freshly validated [`Sampler`].
pub fn sample<P: PixelSource + ?Sized>(image: &P, block_size: i64) -> Result<SampleGrid> {
    Sampler::new(block_size)?.sample(image)
}

use std::io::Write;

use super::{GridWriter, OutputMode, SampleGrid};
use crate::error::Error;

/// Serializes grids as JSON, either the full grid or its distinct colors.
pub struct JsonGridWriter<T: Write> {
    writer: T,
    mode: OutputMode,
}

impl<T: Write> JsonGridWriter<T> {
    pub fn new(writer: T, mode: OutputMode) -> Self {
        Self { writer, mode }
    }

    pub fn into_inner(self) -> T {
        self.writer
    }
}

impl<T: Write> GridWriter for JsonGridWriter<T> {
    fn write_grid(&mut self, grid: &SampleGrid) -> crate::Result<()> {
        let written = match self.mode {
            OutputMode::Grid => serde_json::to_writer(&mut self.writer, grid),
            OutputMode::Palette => serde_json::to_writer(&mut self.writer, &grid.distinct_colors()),
        };
        written.map_err(Error::FailedToWriteGrid)?;
        self.writer
            .flush()
            .map_err(|e| Error::FailedToWriteGrid(serde_json::Error::io(e)))
    }
}

use std::collections::HashSet;

use clap::builder::PossibleValue;
use clap::ValueEnum;
use serde::Serialize;

use crate::Arguments;

pub mod json;

/// Colors sampled from one image, flattened row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SampleGrid {
    #[serde(rename = "Name")]
    label: Option<String>,
    #[serde(rename = "Width")]
    grid_width: u32,
    #[serde(rename = "Colours")]
    colors: Vec<String>,
    #[serde(skip)]
    visited_columns: u32,
    #[serde(skip)]
    visited_rows: u32,
}

impl SampleGrid {
    pub(crate) fn new(
        colors: Vec<String>,
        grid_width: u32,
        visited_columns: u32,
        visited_rows: u32,
    ) -> Self {
        Self {
            label: None,
            grid_width,
            colors,
            visited_columns,
            visited_rows,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    /// Nominal columns, `ceil(width / block_size)`.
    ///
    /// This is larger than [`Self::visited_columns`] whenever the last partial
    /// block is too thin to contain its center, so reshaping [`Self::colors`]
    /// by this width misaligns rows for such images.
    pub fn grid_width(&self) -> u32 {
        self.grid_width
    }

    pub fn visited_columns(&self) -> u32 {
        self.visited_columns
    }

    pub fn visited_rows(&self) -> u32 {
        self.visited_rows
    }

    pub fn is_width_consistent(&self) -> bool {
        self.grid_width == self.visited_columns
    }

    /// Rows of the grid, split by the number of columns actually sampled.
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        let columns = self.visited_columns.max(1) as usize;
        self.colors.chunks(columns)
    }

    /// Every color once, in order of first occurrence.
    pub fn distinct_colors(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.colors
            .iter()
            .map(String::as_str)
            .filter(|color| seen.insert(*color))
            .collect()
    }
}

/// What gets written for every sampled image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutputMode {
    /// name, grid width and every sampled color
    Grid,
    /// the distinct colors only
    Palette,
}

impl ValueEnum for OutputMode {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Grid, Self::Palette]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Grid => Some(PossibleValue::new("Grid")),
            Self::Palette => Some(PossibleValue::new("Palette")),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MosaicOptions {
    pub block_size: i64,
    pub mode: OutputMode,
    pub label: Option<String>,
}

impl From<&Arguments> for MosaicOptions {
    fn from(value: &Arguments) -> Self {
        Self {
            block_size: value.block_size,
            mode: value.mode,
            label: value.label.clone(),
        }
    }
}

pub trait GridWriter {
    fn write_grid(&mut self, grid: &SampleGrid) -> crate::Result<()>;
}

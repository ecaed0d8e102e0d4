use std::path::Path;

use crate::mosaic::SampleGrid;

const LOG_CONFIGURATION_FILE: &str = "log4rs.yaml";

#[ctor::ctor]
fn init() {
    if let Err(e) = log4rs::init_file(LOG_CONFIGURATION_FILE, Default::default()) {
        eprintln!(
            "Logging disabled, unable to load '{}': {}",
            LOG_CONFIGURATION_FILE, e
        );
    }
}

pub fn log_sample_grid(source: &Path, grid: &SampleGrid) {
    log::info!(
        "{}: {} colors in {}x{} samples, grid width {}",
        source.display(),
        grid.colors().len(),
        grid.visited_columns(),
        grid.visited_rows(),
        grid.grid_width()
    );
    if !grid.is_width_consistent() {
        log::warn!(
            "{}: trailing column too thin to sample, rows reshaped by grid width {} will not align with {} sampled columns",
            source.display(),
            grid.grid_width(),
            grid.visited_columns()
        );
    }
}

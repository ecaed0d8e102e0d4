use std::{
    collections::HashMap,
    fs::{self, File, OpenOptions},
    io::BufWriter,
    path::{Path, PathBuf},
};

use batch::{file_stem, list_images, sample_file, sample_files, BatchOptions};
pub use cli::CLIParser;
pub use color::{HexColorEncoder, RGBColorFormat};
pub use error::{Error, ErrorKind};
pub use crate::image::sampler::{sample, Sampler};
pub use crate::image::{Image, PixelSource};
use mosaic::{json::JsonGridWriter, GridWriter, MosaicOptions};
pub use mosaic::{OutputMode, SampleGrid};
use threadpool::ThreadPool;

pub mod batch;
mod cli;
pub mod color;
mod error;
pub mod image;
mod logger;
pub mod mosaic;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    input: PathBuf,
    output_directory: PathBuf,
    block_size: i64,
    extension: String,
    mode: OutputMode,
    label: Option<String>,
    number_of_threads: usize,
}

const OUTPUT_EXTENSION: &str = "json";

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| Error::UnableToOpenOutputFileForWriting(file_path.display().to_string(), e))
}

fn create_output_directory(directory: &Path) -> Result<()> {
    fs::create_dir_all(directory)
        .map_err(|e| Error::UnableToOpenOutputFileForWriting(directory.display().to_string(), e))
}

fn output_path(output_directory: &Path, source: &Path) -> PathBuf {
    output_directory.join(format!("{}.{}", file_stem(source), OUTPUT_EXTENSION))
}

fn collision_key(path: &Path) -> String {
    // case-insensitive file systems map both spellings onto one file
    path.to_string_lossy().to_lowercase()
}

/// Splits `images` into those with a unique output file and those whose
/// output file would also be written for another image.
fn partition_output_collisions(
    images: Vec<PathBuf>,
    output_directory: &Path,
) -> (Vec<PathBuf>, Vec<(PathBuf, Error)>) {
    let mut sources_per_output: HashMap<String, usize> = HashMap::new();
    for image in &images {
        let key = collision_key(&output_path(output_directory, image));
        *sources_per_output.entry(key).or_default() += 1;
    }
    let mut unique = Vec::with_capacity(images.len());
    let mut colliding = Vec::new();
    for image in images {
        let path = output_path(output_directory, &image);
        match sources_per_output[&collision_key(&path)] {
            1 => unique.push(image),
            sources => {
                let error = Error::OutputPathCollision(path.display().to_string(), sources);
                colliding.push((image, error));
            }
        }
    }
    (unique, colliding)
}

/// Writes `grid` as JSON next to the other outputs and returns the file path.
fn write_grid(
    grid: &SampleGrid,
    source: &Path,
    output_directory: &Path,
    options: &MosaicOptions,
) -> Result<PathBuf> {
    let path = output_path(output_directory, source);
    let output_file = open_output_file(&path)?;
    let mut writer = JsonGridWriter::new(BufWriter::new(output_file), options.mode);
    writer.write_grid(grid)?;
    log::info!("Wrote {}", path.display());
    Ok(path)
}

fn extract_single_image(
    options: &MosaicOptions,
    batch_options: &BatchOptions,
) -> Result<Vec<PathBuf>> {
    let source = &batch_options.input;
    let sampler = Sampler::new(options.block_size)?;
    let label = options.label.clone().unwrap_or_else(|| file_stem(source));
    let grid = sample_file(source, &sampler, &label)?;
    logger::log_sample_grid(source, &grid);
    let path = write_grid(&grid, source, &batch_options.output_directory, options)?;
    Ok(vec![path])
}

fn extract_directory(
    options: &MosaicOptions,
    batch_options: &BatchOptions,
) -> Result<Vec<PathBuf>> {
    let sampler = Sampler::new(options.block_size)?;
    let images = list_images(&batch_options.input, &batch_options.extension)?;
    let total = images.len();
    log::info!(
        "Sampling {} '{}' images from {} on {} threads",
        total,
        batch_options.extension,
        batch_options.input.display(),
        batch_options.number_of_threads
    );
    if options.label.is_some() {
        log::warn!("Ignoring name for directory input, every grid is named after its file");
    }
    let (images, colliding) = partition_output_collisions(images, &batch_options.output_directory);
    for (source, e) in &colliding {
        log::error!("{}: {}", source.display(), e);
    }
    let threadpool = ThreadPool::new(batch_options.number_of_threads.max(1));
    let mut written = Vec::with_capacity(total);
    for (source, result) in sample_files(images, sampler, &threadpool) {
        let written_path = result.and_then(|grid| {
            logger::log_sample_grid(&source, &grid);
            write_grid(&grid, &source, &batch_options.output_directory, options)
        });
        match written_path {
            Ok(path) => written.push(path),
            Err(e) => log::error!("{}: {}", source.display(), e),
        }
    }
    if written.len() != total {
        return Err(Error::BatchItemsFailed(total - written.len(), total));
    }
    Ok(written)
}

/// Samples the input file, or every matching file of the input directory, and
/// writes one JSON document per image. Returns the written paths.
pub fn extract_mosaic(arguments: &Arguments) -> Result<Vec<PathBuf>> {
    let options = MosaicOptions::from(arguments);
    let batch_options = BatchOptions::from(arguments);
    log::debug!(
        "block size {}, mode {:?}, output to {}",
        options.block_size,
        options.mode,
        batch_options.output_directory.display()
    );
    create_output_directory(&batch_options.output_directory)?;
    if batch_options.input.is_dir() {
        extract_directory(&options, &batch_options)
    } else {
        extract_single_image(&options, &batch_options)
    }
}

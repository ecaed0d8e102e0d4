use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use threadpool::ThreadPool;

use crate::error::Error;
use crate::image::reader::open_image;
use crate::image::sampler::Sampler;
use crate::mosaic::SampleGrid;
use crate::{Arguments, Result};

pub struct BatchOptions {
    pub input: PathBuf,
    pub output_directory: PathBuf,
    pub extension: String,
    pub number_of_threads: usize,
}

impl From<&Arguments> for BatchOptions {
    fn from(value: &Arguments) -> Self {
        Self {
            input: value.input.clone(),
            output_directory: value.output_directory.clone(),
            extension: value.extension.clone(),
            number_of_threads: value.number_of_threads,
        }
    }
}

fn matches_extension(path: &Path, extension: &str) -> bool {
    let extension = extension.trim_start_matches('.');
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

/// Regular files in `directory` with the given extension, sorted by path.
pub fn list_images(directory: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let to_error = |e| Error::UnableToReadInputDirectory(directory.display().to_string(), e);
    let mut images = Vec::new();
    for entry in fs::read_dir(directory).map_err(to_error)? {
        let path = entry.map_err(to_error)?.path();
        if path.is_file() && matches_extension(&path, extension) {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Decodes and samples one file, labelling the grid with `label`.
pub fn sample_file(path: &Path, sampler: &Sampler, label: &str) -> Result<SampleGrid> {
    let image = open_image(path)?;
    let grid = sampler.sample(&image)?;
    Ok(grid.with_label(label))
}

/// Samples every path on the pool; results come back in the order of `paths`.
///
/// Items whose job died without reporting are missing from the result.
pub fn sample_files(
    paths: Vec<PathBuf>,
    sampler: Sampler,
    threadpool: &ThreadPool,
) -> Vec<(PathBuf, Result<SampleGrid>)> {
    let (sender, receiver) = mpsc::channel();
    for (index, path) in paths.into_iter().enumerate() {
        let sender = sender.clone();
        threadpool.execute(move || {
            let label = file_stem(&path);
            let result = sample_file(&path, &sampler, &label);
            // the receiver outlives every job
            let _ = sender.send((index, path, result));
        });
    }
    drop(sender);
    let mut results: Vec<(usize, PathBuf, Result<SampleGrid>)> = receiver.iter().collect();
    results.sort_by_key(|(index, _, _)| *index);
    results
        .into_iter()
        .map(|(_, path, result)| (path, result))
        .collect()
}

#[cfg(test)]
mod test {
    use std::fs;
    use std::path::{Path, PathBuf};

    use threadpool::ThreadPool;

    use super::{file_stem, list_images, matches_extension, sample_files};
    use crate::image::sampler::Sampler;

    fn scratch_directory(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("mosaic-sampler-{}-{}", std::process::id(), name));
        if path.exists() {
            fs::remove_dir_all(&path).expect("Cleanup of scratch directory failed");
        }
        fs::create_dir_all(&path).expect("Creation of scratch directory failed");
        path
    }

    fn write_ppm(directory: &Path, name: &str, red: u8) -> PathBuf {
        let path = directory.join(name);
        let content = format!("P3 2 2 255 {0} 0 0 {0} 0 0 {0} 0 0 {0} 0 0", red);
        fs::write(&path, content).expect("Writing test image failed");
        path
    }

    #[test]
    fn extension_match_ignores_case_and_dot() {
        assert!(matches_extension(Path::new("a/b.PNG"), "png"));
        assert!(matches_extension(Path::new("a/b.png"), ".png"));
        assert!(!matches_extension(Path::new("a/b.jpg"), "png"));
        assert!(!matches_extension(Path::new("a/png"), "png"));
    }

    #[test]
    fn stem_of_path() {
        assert_eq!(file_stem(Path::new("images/portrait.ppm")), "portrait");
        assert_eq!(file_stem(Path::new("")), "");
    }

    #[test]
    fn list_only_matching_files_sorted() {
        let directory = scratch_directory("list");
        write_ppm(&directory, "b.ppm", 1);
        write_ppm(&directory, "a.ppm", 2);
        fs::write(directory.join("notes.txt"), "ignored").unwrap();
        fs::create_dir(directory.join("nested.ppm")).unwrap();
        let images = list_images(&directory, "ppm").unwrap();
        fs::remove_dir_all(&directory).unwrap();
        let names: Vec<String> = images.iter().map(|p| file_stem(p)).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn list_missing_directory_fails() {
        assert!(list_images(Path::new("does/not/exist"), "png").is_err());
    }

    #[test]
    fn sample_files_preserves_input_order() {
        let directory = scratch_directory("order");
        let paths: Vec<PathBuf> = (0..8u8)
            .map(|i| write_ppm(&directory, &format!("tile{}.ppm", i), i * 17))
            .collect();
        let mut paths_with_missing = paths.clone();
        paths_with_missing.insert(3, directory.join("missing.ppm"));
        let threadpool = ThreadPool::new(4);
        let sampler = Sampler::new(2).unwrap();
        let results = sample_files(paths_with_missing.clone(), sampler, &threadpool);
        fs::remove_dir_all(&directory).unwrap();

        assert_eq!(results.len(), 9);
        for ((path, result), expected_path) in results.iter().zip(&paths_with_missing) {
            assert_eq!(path, expected_path);
            if path.ends_with("missing.ppm") {
                assert!(result.is_err());
            } else {
                let grid = result.as_ref().unwrap();
                assert_eq!(grid.label(), Some(file_stem(path).as_str()));
                assert_eq!(grid.colors().len(), 1);
            }
        }
        let first = results[0].1.as_ref().unwrap();
        assert_eq!(first.colors(), ["#000"]);
        let last = results[8].1.as_ref().unwrap();
        assert_eq!(last.colors(), ["#700"]);
    }
}

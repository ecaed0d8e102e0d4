use std::fmt::Display;

/// Coarse classification of [`Error`] variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    OutOfBounds,
    Input,
    Output,
}

#[derive(Debug)]
pub enum Error {
    NonPositiveBlockSize(i64),
    ColorChannelOutOfRange(&'static str, i64),
    ColorComponentExceedsMaximum(u16, u16),
    MismatchOfSizeBetweenHeaderAndValues,
    PixelOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    PPMFileDoesNotContainRequiredToken(&'static str),
    ParsingOfTokenFailed(&'static str),
    IncompletePixelParsed(usize),
    FailedToReadInput(std::io::Error),
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    UnableToReadInputDirectory(String, std::io::Error),
    UnableToDecodeImage(String, ::image::ImageError),
    FailedToWriteGrid(serde_json::Error),
    OutputPathCollision(String, usize),
    BatchItemsFailed(usize, usize),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NonPositiveBlockSize(_)
            | Self::ColorChannelOutOfRange(_, _)
            | Self::ColorComponentExceedsMaximum(_, _)
            | Self::MismatchOfSizeBetweenHeaderAndValues => ErrorKind::InvalidArgument,
            Self::PixelOutOfBounds { .. } => ErrorKind::OutOfBounds,
            Self::PPMFileDoesNotContainRequiredToken(_)
            | Self::ParsingOfTokenFailed(_)
            | Self::IncompletePixelParsed(_)
            | Self::FailedToReadInput(_)
            | Self::UnableToOpenInputFileForReading(_, _)
            | Self::UnableToReadInputDirectory(_, _)
            | Self::UnableToDecodeImage(_, _) => ErrorKind::Input,
            Self::UnableToOpenOutputFileForWriting(_, _)
            | Self::FailedToWriteGrid(_)
            | Self::OutputPathCollision(_, _)
            | Self::BatchItemsFailed(_, _) => ErrorKind::Output,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveBlockSize(block_size) => {
                write!(f, "Block size must be positive, but was {}", block_size)
            }
            Self::ColorChannelOutOfRange(channel, value) => {
                write!(
                    f,
                    "Value {} of color channel '{}' is outside of 0..=255",
                    value, channel
                )
            }
            Self::ColorComponentExceedsMaximum(value, max) => {
                write!(
                    f,
                    "Color component {} is greater than the declared maximum of {}",
                    value, max
                )
            }
            Self::MismatchOfSizeBetweenHeaderAndValues => {
                write!(f, "Number of pixels does not match the image dimensions")
            }
            Self::PixelOutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "Pixel ({}, {}) is outside of the {}x{} image",
                    x, y, width, height
                )
            }
            Self::PPMFileDoesNotContainRequiredToken(token_name) => {
                write!(f, "Expected token '{}' not found in PPM file", token_name)
            }
            Self::ParsingOfTokenFailed(token_name) => {
                write!(f, "Parsing of token '{}' failed", token_name)
            }
            Self::IncompletePixelParsed(number_of_tokens_parsed) => {
                write!(
                    f,
                    "Incomplete pixel parsed. Expected 3 components, but got {}.",
                    number_of_tokens_parsed
                )
            }
            Self::FailedToReadInput(error) => write!(f, "Failed to read input: {}", error),
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::UnableToReadInputDirectory(path, error) => {
                write!(f, "Unable to list input directory '{}': {}", path, error)
            }
            Self::UnableToDecodeImage(path, error) => {
                write!(f, "Unable to decode image '{}': {}", path, error)
            }
            Self::FailedToWriteGrid(error) => write!(f, "Failed to write sample grid: {}", error),
            Self::OutputPathCollision(path, sources) => {
                write!(
                    f,
                    "Output file '{}' would be written by {} images",
                    path, sources
                )
            }
            Self::BatchItemsFailed(failed, total) => {
                write!(f, "{} of {} images could not be processed", failed, total)
            }
        }
    }
}

impl std::error::Error for Error {}

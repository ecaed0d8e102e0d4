use std::io::{ErrorKind, Read};

use super::super::Image;
use super::super::ImageReader;
use crate::color::{RGBColorFormat, RangeColorFormat};
use crate::error::Error;

/// Reads plain (`P3`) PPM images.
pub struct PPMImageReader<T: Read> {
    reader: T,
}

impl<T: Read> PPMImageReader<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }
}

impl<T: Read> ImageReader for PPMImageReader<T> {
    fn read_image(&mut self) -> crate::Result<Image> {
        let mut tokenizer = PPMTokenizer::new(&mut self.reader);
        let mut parser = PPMParser::new(&mut tokenizer);
        parser.parse_tokens()
    }
}

struct PPMTokenizer<'a, R: Read> {
    reader: &'a mut R,
    buffer: Vec<u8>,
}

impl<'a, R: Read> PPMTokenizer<'a, R> {
    fn new(reader: &'a mut R) -> Self {
        PPMTokenizer {
            reader,
            buffer: Vec::new(),
        }
    }
}

impl<R: Read> PPMTokenizer<'_, R> {
    fn read_byte(&mut self) -> crate::Result<Option<u8>> {
        let mut byte = [0; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::FailedToReadInput(e)),
            }
        }
    }

    fn read_token(&mut self) -> crate::Result<Option<String>> {
        self.buffer.clear();
        let mut in_comment = false;

        while let Some(byte) = self.read_byte()? {
            if in_comment {
                if byte == b'\n' {
                    in_comment = false;
                }
                continue;
            }
            if byte == b'#' {
                in_comment = true;
                continue;
            }
            if byte.is_ascii_whitespace() {
                if !self.buffer.is_empty() {
                    break;
                }
            } else {
                self.buffer.push(byte);
            }
        }

        if self.buffer.is_empty() {
            return Ok(None);
        }

        // non-UTF-8 bytes surface later as a token parse failure
        Ok(Some(String::from_utf8_lossy(&self.buffer).into_owned()))
    }
}

impl<R: Read> Iterator for PPMTokenizer<'_, R> {
    type Item = crate::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_token().transpose()
    }
}

const P3_HEADER_TOKEN_NAME: &str = "P3 Header";
const WIDTH_HEADER_TOKEN_NAME: &str = "Width Header";
const HEIGHT_HEADER_TOKEN_NAME: &str = "Height Header";
const MAX_VALUE_HEADER_TOKEN_NAME: &str = "Max Value Header";
const COLOR_COMPONENT_VALUE_TOKEN_NAME: &str = "Color Component Value";

#[derive(Clone, Copy)]
struct Dot {
    buffer: [u16; 3],
    index: usize,
}

impl Dot {
    fn new() -> Self {
        Self {
            buffer: [u16::default(); 3],
            index: 0,
        }
    }

    fn push_color_component(&mut self, component: u16) {
        if self.is_complete() {
            return;
        }
        self.buffer[self.index] = component;
        self.index += 1;
    }

    fn is_complete(&self) -> bool {
        self.index == 3
    }

    fn reset(&mut self) {
        self.index = 0;
    }

    fn is_empty(&self) -> bool {
        self.index == 0
    }

    fn to_rgb(self, max_value: u16) -> crate::Result<RGBColorFormat<u8>> {
        let [red, green, blue] = self.buffer;
        let range_color = RangeColorFormat::new(max_value, red, green, blue)?;
        Ok(RGBColorFormat::from(&range_color))
    }
}

struct PPMParser<'a, T> {
    tokenizer: &'a mut T,
}

impl<'a, T> PPMParser<'a, T>
where
    T: Iterator<Item = crate::Result<String>>,
{
    fn new(tokenizer: &'a mut T) -> Self {
        Self { tokenizer }
    }

    fn parse_tokens(&mut self) -> crate::Result<Image> {
        let header = self.parse_header()?;
        Self::check_header_version(&header)?;
        let width = self.parse_dimension(WIDTH_HEADER_TOKEN_NAME)?;
        let height = self.parse_dimension(HEIGHT_HEADER_TOKEN_NAME)?;
        let max_value = self.parse_max_value()?;
        let dots = self.parse_all_dots()?;
        let dots = dots
            .into_iter()
            .map(|dot| dot.to_rgb(max_value))
            .collect::<crate::Result<Vec<RGBColorFormat<u8>>>>()?;
        Image::new(width, height, dots)
    }

    fn check_header_version(header: &str) -> crate::Result<()> {
        if header != "P3" {
            return Err(Error::PPMFileDoesNotContainRequiredToken(
                P3_HEADER_TOKEN_NAME,
            ));
        }
        Ok(())
    }

    fn next_token(&mut self, token_name: &'static str) -> crate::Result<String> {
        self.tokenizer
            .next()
            .ok_or(Error::PPMFileDoesNotContainRequiredToken(token_name))?
    }

    fn parse_header(&mut self) -> crate::Result<String> {
        self.next_token(P3_HEADER_TOKEN_NAME)
    }

    fn parse_dimension(&mut self, token_name: &'static str) -> crate::Result<u32> {
        self.next_token(token_name)?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(token_name))
    }

    fn parse_max_value(&mut self) -> crate::Result<u16> {
        self.next_token(MAX_VALUE_HEADER_TOKEN_NAME)?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(MAX_VALUE_HEADER_TOKEN_NAME))
    }

    fn parse_all_dots(&mut self) -> crate::Result<Vec<Dot>> {
        let mut current_dot = Dot::new();
        let mut dots = Vec::new();
        for token in self.tokenizer.by_ref() {
            let component = Self::parse_color_value(&token?)?;
            current_dot.push_color_component(component);
            if current_dot.is_complete() {
                dots.push(current_dot);
                current_dot.reset();
            }
        }
        Self::check_pixel_was_complete(&current_dot)?;
        Ok(dots)
    }

    fn check_pixel_was_complete(dot: &Dot) -> crate::Result<()> {
        if !dot.is_empty() {
            return Err(Error::IncompletePixelParsed(dot.index));
        }
        Ok(())
    }

    fn parse_color_value(token: &str) -> crate::Result<u16> {
        token
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(COLOR_COMPONENT_VALUE_TOKEN_NAME))
    }
}

#[cfg(test)]
mod test {
    use std::io::{self, Read};

    use crate::{
        color::RGBColorFormat,
        error::{Error, ErrorKind},
        image::{Image, ImageReader, PixelSource},
        Result,
    };

    use super::PPMImageReader;

    fn parse_ppm_tokens(token_string: &str) -> Result<Image> {
        PPMImageReader::new(token_string.as_bytes()).read_image()
    }

    #[test]
    fn read_string() {
        let string = "P3\n# Example PPM image string\n3 2\n255\n255 0 0   0 255 0   0 0 255\n255 255 0  255 0 255  0 255 255";
        let image = parse_ppm_tokens(string).unwrap();
        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
        assert_eq!(image.pixel(1, 0).unwrap(), RGBColorFormat::new(0, 255, 0));
        assert_eq!(image.pixel(2, 1).unwrap(), RGBColorFormat::new(0, 255, 255));
    }

    #[test]
    fn read_continuous_string() {
        let string = "P3 3 2 255 255 0 0   0 255 0   0 0 255 255 255 0  255 0 255  0 255 255";
        let image = parse_ppm_tokens(string).unwrap();
        assert_eq!(image.height(), 2);
    }

    #[test]
    fn read_newline_string() {
        let string = "P3\n# Example PPM image newlines\n3\n2\n255\n255\n0\n0\n0\n255\n0\n0\n0\n255\n255\n255\n0\n255\n0\n255\n0\n255\n255";
        let image = parse_ppm_tokens(string).unwrap();
        assert_eq!(image.height(), 2);
    }

    #[test]
    fn scale_components_to_eight_bits() {
        let string = "P3 2 1 15 15 0 8  0 0 0";
        let image = parse_ppm_tokens(string).unwrap();
        assert_eq!(image.pixel(0, 0).unwrap(), RGBColorFormat::new(255, 0, 136));
    }

    #[test]
    fn component_above_max_value() {
        let string = "P3 1 1 100 0 101 0";
        if let Err(Error::ColorComponentExceedsMaximum(101, 100)) = parse_ppm_tokens(string) {
            return;
        }
        panic!("Component above declared maximum not detected");
    }

    #[test]
    fn wrong_header() {
        let string = "P6 1 1 255 0 0 0";
        if let Err(Error::PPMFileDoesNotContainRequiredToken(_)) = parse_ppm_tokens(string) {
            return;
        }
        panic!("Unsupported PPM version not detected");
    }

    /// Hands out `data`, then fails every further read.
    struct FailingReader {
        data: &'static [u8],
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "connection lost"));
            }
            let count = buf.len().min(self.data.len());
            buf[..count].copy_from_slice(&self.data[..count]);
            self.data = &self.data[count..];
            Ok(count)
        }
    }

    #[test]
    fn read_failure_in_pixel_data() {
        let reader = FailingReader {
            data: b"P3 2 1 255 10 20 30 ",
        };
        let result = PPMImageReader::new(reader).read_image();
        match result {
            Err(Error::FailedToReadInput(error)) => {
                assert_eq!(error.kind(), io::ErrorKind::BrokenPipe)
            }
            Err(other) => panic!("Read failure reported as: {}", other),
            Ok(_) => panic!("Read failure not detected"),
        }
    }

    #[test]
    fn read_failure_in_header() {
        let reader = FailingReader { data: b"P3 2" };
        let error = PPMImageReader::new(reader)
            .read_image()
            .expect_err("Read failure not detected");
        assert_eq!(error.kind(), ErrorKind::Input);
        assert!(matches!(error, Error::FailedToReadInput(_)));
    }

    #[test]
    fn incomplete_pixel() {
        let string = "P3\n3 2 255 0 0 255 0 0";
        if let Err(Error::IncompletePixelParsed(n)) = parse_ppm_tokens(string) {
            if n != 2 {
                panic!("Number of parsed pixels should be 2, but was {}", n);
            }
            return;
        };
        panic!("Incomplete pixel not detected");
    }

    #[test]
    fn wrong_size() {
        let string = "P3\n3 2 255 0 0 255";
        if let Err(Error::MismatchOfSizeBetweenHeaderAndValues) = parse_ppm_tokens(string) {
            return;
        };
        panic!("Mismatch of size in header and actual pixels was not detected!");
    }
}

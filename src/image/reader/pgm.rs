use std::io::Read;

use super::super::ImageReader;
use crate::demosaic::{Rounding, SampleGrid};
use crate::Error;

pub struct PGMImageReader<T: Read> {
    reader: T,
}

impl<T: Read> PGMImageReader<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }
}

impl<T: Read> ImageReader for PGMImageReader<T> {
    fn read_image(&mut self) -> crate::Result<SampleGrid> {
        let mut tokenizer = PGMTokenizer::new(&mut self.reader);
        let mut parser = PGMParser::new(&mut tokenizer);
        parser.parse_tokens()
    }
}

struct PGMTokenizer<'a, R: Read> {
    reader: &'a mut R,
    buffer: Vec<u8>,
}

impl<'a, R: Read> PGMTokenizer<'a, R> {
    fn new(reader: &'a mut R) -> Self {
        PGMTokenizer {
            reader,
            buffer: Vec::new(),
        }
    }

    /// Reads raw bytes following the last token. The whitespace byte that
    /// terminated that token has already been consumed.
    ///
    /// The buffer grows with the data actually present, so a header claiming
    /// a huge raster cannot force a huge allocation up front.
    fn read_raw_bytes(&mut self, length: usize) -> std::io::Result<Vec<u8>> {
        let limit = u64::try_from(length).unwrap_or(u64::MAX);
        let mut bytes = Vec::new();
        self.reader.by_ref().take(limit).read_to_end(&mut bytes)?;
        if bytes.len() != length {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("expected {} bytes, got {}", length, bytes.len()),
            ));
        }
        Ok(bytes)
    }
}

impl<R: Read> Iterator for PGMTokenizer<'_, R> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        let mut byte = [0; 1];
        let mut in_comment = false;

        while self.reader.read(&mut byte).unwrap_or(0) > 0 {
            if in_comment {
                if byte[0] == b'\n' {
                    in_comment = false;
                }
                continue;
            }
            if byte[0] == b'#' {
                in_comment = true;
                continue;
            }
            if byte[0].is_ascii_whitespace() {
                if !self.buffer.is_empty() {
                    break;
                }
            } else {
                self.buffer.push(byte[0]);
            }
        }

        if self.buffer.is_empty() {
            return None;
        }

        Some(String::from_utf8_lossy(&self.buffer).into_owned())
    }
}

const MAGIC_NUMBER_TOKEN_NAME: &str = "Magic Number";
const WIDTH_HEADER_TOKEN_NAME: &str = "Width Header";
const HEIGHT_HEADER_TOKEN_NAME: &str = "Height Header";
const MAX_VALUE_HEADER_TOKEN_NAME: &str = "Max Value Header";
const SAMPLE_VALUE_TOKEN_NAME: &str = "Sample Value";

const FULL_RANGE_MAX_VALUE: u16 = 255;

#[derive(Clone, Copy, Debug, PartialEq)]
enum PGMFormat {
    /// `P2`, samples as decimal tokens
    Ascii,
    /// `P5`, one byte per sample
    Binary,
}

struct PGMParser<'a, 'b, R: Read> {
    tokenizer: &'a mut PGMTokenizer<'b, R>,
}

impl<'a, 'b, R: Read> PGMParser<'a, 'b, R> {
    fn new(tokenizer: &'a mut PGMTokenizer<'b, R>) -> Self {
        Self { tokenizer }
    }

    fn parse_tokens(&mut self) -> crate::Result<SampleGrid> {
        let format = self.parse_magic_number()?;
        let width = self.parse_dimension(WIDTH_HEADER_TOKEN_NAME)?;
        let height = self.parse_dimension(HEIGHT_HEADER_TOKEN_NAME)?;
        let max_value = self.parse_max_value()?;
        let number_of_samples = width
            .checked_mul(height)
            .ok_or(Error::MismatchOfSizeBetweenHeaderAndValues)?;
        let samples = match format {
            PGMFormat::Ascii => self.parse_all_samples()?,
            PGMFormat::Binary => self.read_binary_samples(number_of_samples)?,
        };
        Self::check_parsed_samples_length_match_header_information(&samples, number_of_samples)?;
        let samples = samples
            .into_iter()
            .map(|sample| Self::scale_to_full_range(sample, max_value))
            .collect::<crate::Result<Vec<u8>>>()?;
        log::debug!(
            "Parsed {:?} PGM with {}x{} samples and max value {}",
            format,
            width,
            height,
            max_value
        );
        SampleGrid::new(width, height, samples)
    }

    fn parse_magic_number(&mut self) -> crate::Result<PGMFormat> {
        let magic_number = self
            .tokenizer
            .next()
            .ok_or(Error::PGMFileDoesNotContainRequiredToken(
                MAGIC_NUMBER_TOKEN_NAME,
            ))?;
        match magic_number.as_str() {
            "P2" => Ok(PGMFormat::Ascii),
            "P5" => Ok(PGMFormat::Binary),
            _ => Err(Error::UnsupportedMagicNumber(magic_number)),
        }
    }

    fn parse_dimension(&mut self, token_name: &'static str) -> crate::Result<usize> {
        self.tokenizer
            .next()
            .ok_or(Error::PGMFileDoesNotContainRequiredToken(token_name))?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(token_name))
    }

    fn parse_max_value(&mut self) -> crate::Result<u16> {
        let max_value: u16 = self
            .tokenizer
            .next()
            .ok_or(Error::PGMFileDoesNotContainRequiredToken(
                MAX_VALUE_HEADER_TOKEN_NAME,
            ))?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(MAX_VALUE_HEADER_TOKEN_NAME))?;
        if max_value == 0 || max_value > FULL_RANGE_MAX_VALUE {
            return Err(Error::MaxValueOutOfRange(max_value));
        }
        Ok(max_value)
    }

    fn parse_all_samples(&mut self) -> crate::Result<Vec<u16>> {
        self.tokenizer
            .by_ref()
            .map(|token| Self::parse_sample_value(&token))
            .collect()
    }

    fn read_binary_samples(&mut self, number_of_samples: usize) -> crate::Result<Vec<u16>> {
        let bytes = self
            .tokenizer
            .read_raw_bytes(number_of_samples)
            .map_err(Error::IncompleteRasterData)?;
        Ok(bytes.into_iter().map(u16::from).collect())
    }

    fn check_parsed_samples_length_match_header_information(
        samples: &[u16],
        number_of_samples: usize,
    ) -> crate::Result<()> {
        if samples.len() != number_of_samples {
            return Err(Error::MismatchOfSizeBetweenHeaderAndValues);
        }
        Ok(())
    }

    fn parse_sample_value(token: &str) -> crate::Result<u16> {
        token
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(SAMPLE_VALUE_TOKEN_NAME))
    }

    fn scale_to_full_range(sample: u16, max_value: u16) -> crate::Result<u8> {
        if sample > max_value {
            return Err(Error::SampleExceedsMaxValue(sample, max_value));
        }
        if max_value == FULL_RANGE_MAX_VALUE {
            return Ok(sample as u8);
        }
        let scaled = f64::from(sample) * f64::from(FULL_RANGE_MAX_VALUE) / f64::from(max_value);
        Ok(Rounding::default().round(scaled) as u8)
    }
}

#[cfg(test)]
mod test {
    use crate::{demosaic::SampleGrid, error::Error, Result};

    use super::{PGMParser, PGMTokenizer};

    fn parse_pgm_bytes(mut bytes: &[u8]) -> Result<SampleGrid> {
        let mut tokenizer = PGMTokenizer::new(&mut bytes);
        let mut parser = PGMParser::new(&mut tokenizer);
        parser.parse_tokens()
    }

    fn parse_pgm_tokens(token_string: &str) -> Result<SampleGrid> {
        parse_pgm_bytes(token_string.as_bytes())
    }

    #[test]
    fn read_string() {
        let string = "P2\n# Example PGM image string\n3 2\n255\n10 20 30\n40 50 60";
        let grid = parse_pgm_tokens(string).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.sample(2, 1).unwrap(), 60);
    }

    #[test]
    fn read_continuous_string() {
        let string = "P2 2 2 255 1 2 3 4";
        let grid = parse_pgm_tokens(string).unwrap();
        assert_eq!(grid.sample(1, 0).unwrap(), 2);
        assert_eq!(grid.sample(0, 1).unwrap(), 3);
    }

    #[test]
    fn read_newline_string() {
        let string = "P2\n# Example PGM image newlines\n2\n2\n255\n0\n# inline comment\n128\n255\n7";
        let grid = parse_pgm_tokens(string).unwrap();
        assert_eq!(grid.sample(1, 0).unwrap(), 128);
        assert_eq!(grid.sample(1, 1).unwrap(), 7);
    }

    #[test]
    fn read_binary() {
        let mut bytes = b"P5\n# binary\n2 3\n255\n".to_vec();
        bytes.extend_from_slice(&[0, 32, 64, 96, 128, 255]);
        let grid = parse_pgm_bytes(&bytes).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.sample(0, 2).unwrap(), 128);
        assert_eq!(grid.sample(1, 2).unwrap(), 255);
    }

    #[test]
    fn binary_raster_may_start_with_whitespace_byte() {
        let mut bytes = b"P5 2 2 255\n".to_vec();
        bytes.extend_from_slice(&[b' ', b'\n', b'#', 9]);
        let grid = parse_pgm_bytes(&bytes).unwrap();
        assert_eq!(grid.sample(0, 0).unwrap(), b' ');
        assert_eq!(grid.sample(1, 0).unwrap(), b'\n');
        assert_eq!(grid.sample(0, 1).unwrap(), b'#');
        assert_eq!(grid.sample(1, 1).unwrap(), 9);
    }

    #[test]
    fn truncated_binary_raster() {
        let mut bytes = b"P5 2 2 255\n".to_vec();
        bytes.extend_from_slice(&[1, 2, 3]);
        assert!(matches!(
            parse_pgm_bytes(&bytes),
            Err(Error::IncompleteRasterData(_))
        ));
    }

    #[test]
    fn oversized_binary_header_is_an_error() {
        let mut bytes = b"P5 4000000000 4000000000 255\n".to_vec();
        bytes.extend_from_slice(&[1, 2]);
        assert!(matches!(
            parse_pgm_bytes(&bytes),
            Err(Error::IncompleteRasterData(_)) | Err(Error::MismatchOfSizeBetweenHeaderAndValues)
        ));

        let mut bytes = b"P5 100000 100000 255\n".to_vec();
        bytes.extend_from_slice(&[1, 2, 3, 4]);
        assert!(matches!(
            parse_pgm_bytes(&bytes),
            Err(Error::IncompleteRasterData(_))
        ));
    }

    #[test]
    fn rescale_smaller_max_value() {
        let string = "P2 2 2 15 0 15 5 10";
        let grid = parse_pgm_tokens(string).unwrap();
        assert_eq!(grid.sample(0, 0).unwrap(), 0);
        assert_eq!(grid.sample(1, 0).unwrap(), 255);
        assert_eq!(grid.sample(0, 1).unwrap(), 85);
        assert_eq!(grid.sample(1, 1).unwrap(), 170);
    }

    #[test]
    fn unsupported_magic_number() {
        let string = "P3 2 2 255 0 0 0 0";
        if let Err(Error::UnsupportedMagicNumber(magic)) = parse_pgm_tokens(string) {
            assert_eq!(magic, "P3");
            return;
        }
        panic!("Unsupported magic number not detected");
    }

    #[test]
    fn missing_header_token() {
        let string = "P2 2 2";
        assert!(matches!(
            parse_pgm_tokens(string),
            Err(Error::PGMFileDoesNotContainRequiredToken(_))
        ));
    }

    #[test]
    fn max_value_out_of_range() {
        assert!(matches!(
            parse_pgm_tokens("P2 2 2 65535 0 0 0 0"),
            Err(Error::MaxValueOutOfRange(65535))
        ));
        assert!(matches!(
            parse_pgm_tokens("P2 2 2 0 0 0 0 0"),
            Err(Error::MaxValueOutOfRange(0))
        ));
    }

    #[test]
    fn sample_above_max_value() {
        assert!(matches!(
            parse_pgm_tokens("P2 2 2 100 0 101 0 0"),
            Err(Error::SampleExceedsMaxValue(101, 100))
        ));
    }

    #[test]
    fn unparsable_sample() {
        assert!(matches!(
            parse_pgm_tokens("P2 2 2 255 0 x 0 0"),
            Err(Error::ParsingOfTokenFailed(_))
        ));
    }

    #[test]
    fn wrong_size() {
        let string = "P2\n3 2 255 0 0 255";
        if let Err(Error::MismatchOfSizeBetweenHeaderAndValues) = parse_pgm_tokens(string) {
            return;
        };
        panic!("Mismatch of size in header and actual samples was not detected!");
    }

    #[test]
    fn dimensions_too_small() {
        assert!(matches!(
            parse_pgm_tokens("P2 1 3 255 0 0 0"),
            Err(Error::InvalidDimensions(1, 3))
        ));
    }
}

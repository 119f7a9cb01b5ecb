use std::fmt::Display;

const INPUT_FILE_NOT_FOUND_EXIT_CODE: i32 = 2;
const GENERAL_FAILURE_EXIT_CODE: i32 = 1;

#[derive(Debug)]
pub enum Error {
    PGMFileDoesNotContainRequiredToken(&'static str),
    ParsingOfTokenFailed(&'static str),
    UnsupportedMagicNumber(String),
    MaxValueOutOfRange(u16),
    SampleExceedsMaxValue(u16, u16),
    MismatchOfSizeBetweenHeaderAndValues,
    IncompleteRasterData(std::io::Error),
    InputFileNotFound(String),
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    FailedToWriteImageData(std::io::Error),
    InvalidDimensions(usize, usize),
    SampleCountDoesNotMatchDimensions(usize, usize),
    CoordinateOutOfRange(usize, usize, usize, usize),
    ReconstructionJobFailed(usize),
}

impl Error {
    /// Process exit code the command line tool reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InputFileNotFound(_) => INPUT_FILE_NOT_FOUND_EXIT_CODE,
            _ => GENERAL_FAILURE_EXIT_CODE,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PGMFileDoesNotContainRequiredToken(token_name) => {
                write!(f, "Expected token '{}' not found in PGM file", token_name)
            }
            Self::ParsingOfTokenFailed(token_name) => {
                write!(f, "Parsing of token '{}' failed", token_name)
            }
            Self::UnsupportedMagicNumber(magic) => {
                write!(
                    f,
                    "Unsupported magic number '{}'. Expected 'P2' or 'P5'.",
                    magic
                )
            }
            Self::MaxValueOutOfRange(max_value) => {
                write!(
                    f,
                    "Max value {} is out of range. Supported range is 1 to 255.",
                    max_value
                )
            }
            Self::SampleExceedsMaxValue(sample, max_value) => {
                write!(
                    f,
                    "Sample value {} exceeds the max value {} given in header",
                    sample, max_value
                )
            }
            Self::MismatchOfSizeBetweenHeaderAndValues => {
                write!(
                    f,
                    "Number of samples does not match the size provided in header"
                )
            }
            Self::IncompleteRasterData(error) => {
                write!(f, "Binary raster data ended early: {}", error)
            }
            Self::InputFileNotFound(path) => {
                write!(f, "Cannot find specified image '{}'", path)
            }
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
            Self::FailedToWriteImageData(error) => {
                write!(f, "Failed to write image data: {}", error)
            }
            Self::InvalidDimensions(width, height) => {
                write!(
                    f,
                    "Invalid dimensions {}x{}. Width and height must be at least 2.",
                    width, height
                )
            }
            Self::SampleCountDoesNotMatchDimensions(expected, actual) => {
                write!(
                    f,
                    "Expected {} samples for the given dimensions, but got {}",
                    expected, actual
                )
            }
            Self::CoordinateOutOfRange(x, y, width, height) => {
                write!(
                    f,
                    "Coordinate ({}, {}) is outside of the {}x{} grid",
                    x, y, width, height
                )
            }
            Self::ReconstructionJobFailed(band_index) => {
                write!(
                    f,
                    "Reconstruction job for band {} did not deliver a result",
                    band_index
                )
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod test {
    use super::Error;

    #[test]
    fn missing_input_file_exits_with_two() {
        let error = Error::InputFileNotFound("missing.pgm".to_owned());
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn other_errors_exit_with_one() {
        assert_eq!(Error::InvalidDimensions(1, 5).exit_code(), 1);
        assert_eq!(Error::MismatchOfSizeBetweenHeaderAndValues.exit_code(), 1);
    }

    #[test]
    fn display_names_coordinate_and_grid() {
        let message = Error::CoordinateOutOfRange(7, 2, 4, 4).to_string();
        assert_eq!(message, "Coordinate (7, 2) is outside of the 4x4 grid");
    }
}

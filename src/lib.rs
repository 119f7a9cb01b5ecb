use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

pub use cli::CLIParser;
use demosaic::{reconstruct_image_with, ReconstructionOptions, Rounding};
pub use error::Error;
use image::{
    reader::pgm::PGMImageReader,
    writer::ppm::{PPMImageWriter, PixelEncoding},
    ImageReader, ImageWriter,
};

mod cli;
pub mod demosaic;
mod error;
pub mod image;
mod logger;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    input_file: PathBuf,
    output_file: PathBuf,
    number_of_threads: usize,
    rounding: Rounding,
    pixel_encoding: PixelEncoding,
}

fn check_input_file_exists(file_path: &Path) -> Result<()> {
    if !file_path.exists() {
        return Err(Error::InputFileNotFound(file_path.display().to_string()));
    }
    Ok(())
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path).map_err(|e| {
        Error::UnableToOpenInputFileForReading(file_path.display().to_string(), e)
    })
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| {
            Error::UnableToOpenOutputFileForWriting(file_path.display().to_string(), e)
        })
}

/// Decodes the PGM mosaic, reconstructs every pixel and writes the result as PPM.
pub fn convert_pgm_to_ppm(arguments: &Arguments) -> Result<()> {
    check_input_file_exists(&arguments.input_file)?;
    let input_file = open_input_file(&arguments.input_file)?;
    let grid = PGMImageReader::new(BufReader::new(&input_file)).read_image()?;
    log::info!(
        "Decoded {}x{} mosaic from '{}'",
        grid.width(),
        grid.height(),
        arguments.input_file.display()
    );

    let options = ReconstructionOptions::from(arguments);
    let image = reconstruct_image_with(grid, &options)?;

    let output_file = open_output_file(&arguments.output_file)?;
    let mut writer = PPMImageWriter::new(BufWriter::new(&output_file), arguments.pixel_encoding);
    writer.write_image(&image)?;
    log::info!(
        "Wrote reconstructed image to '{}'",
        arguments.output_file.display()
    );
    Ok(())
}

use std::io::Write;

use clap::builder::PossibleValue;
use clap::ValueEnum;

use super::super::ImageWriter;
use crate::demosaic::PixelGrid;
use crate::Error;

const MAX_VALUE: u8 = 255;

/// Raster encoding of the written PPM file.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PixelEncoding {
    /// `P6`, three bytes per pixel
    #[default]
    Binary,
    /// `P3`, one pixel per line as decimal triples
    Ascii,
}

impl PixelEncoding {
    fn magic_number(&self) -> &'static str {
        match self {
            Self::Binary => "P6",
            Self::Ascii => "P3",
        }
    }
}

impl ValueEnum for PixelEncoding {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Binary, Self::Ascii]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Binary => Some(PossibleValue::new("Binary")),
            Self::Ascii => Some(PossibleValue::new("Ascii")),
        }
    }
}

pub struct PPMImageWriter<T: Write> {
    writer: T,
    encoding: PixelEncoding,
}

impl<T: Write> PPMImageWriter<T> {
    pub fn new(writer: T, encoding: PixelEncoding) -> Self {
        Self { writer, encoding }
    }

    fn write_header(&mut self, image: &PixelGrid) -> std::io::Result<()> {
        write!(
            self.writer,
            "{}\n{} {}\n{}\n",
            self.encoding.magic_number(),
            image.width(),
            image.height(),
            MAX_VALUE
        )
    }

    fn write_binary_raster(&mut self, image: &PixelGrid) -> std::io::Result<()> {
        for row in image.rows() {
            let bytes: Vec<u8> = row.iter().flat_map(|dot| dot.components()).collect();
            self.writer.write_all(&bytes)?;
        }
        Ok(())
    }

    fn write_ascii_raster(&mut self, image: &PixelGrid) -> std::io::Result<()> {
        for dot in image.dots() {
            writeln!(self.writer, "{} {} {}", dot.red, dot.green, dot.blue)?;
        }
        Ok(())
    }

    fn write_all_parts(&mut self, image: &PixelGrid) -> std::io::Result<()> {
        self.write_header(image)?;
        match self.encoding {
            PixelEncoding::Binary => self.write_binary_raster(image)?,
            PixelEncoding::Ascii => self.write_ascii_raster(image)?,
        }
        self.writer.flush()
    }
}

impl<T: Write> ImageWriter for PPMImageWriter<T> {
    fn write_image(&mut self, image: &PixelGrid) -> crate::Result<()> {
        self.write_all_parts(image)
            .map_err(Error::FailedToWriteImageData)?;
        log::debug!(
            "Wrote {}x{} {} image",
            image.width(),
            image.height(),
            self.encoding.magic_number()
        );
        Ok(())
    }
}
